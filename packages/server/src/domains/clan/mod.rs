//! Clan domain - sub-groupings within a community, each with one leader
//!
//! The leader recorded at creation time authorizes invitations and kicks.

pub mod model;
pub mod service;

pub use model::Clan;
pub use service::ClanService;
