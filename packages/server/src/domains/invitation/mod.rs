//! Invitation domain - recruiting users into clans
//!
//! An invitation is created Pending by the clan's leader and resolved once to
//! Accepted or Declined; both are terminal.

pub mod model;
pub mod service;

pub use model::{Invitation, InvitationStatus};
pub use service::InvitationService;
