//! User domain - account creation and affiliation transitions
//!
//! A user belongs to at most one community and at most one clan within it.
//! Points are reset to zero on every affiliation change.

pub mod model;
pub mod service;

pub use model::User;
pub use service::UserService;
