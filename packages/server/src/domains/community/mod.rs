//! Community domain - the top-level grouping a user optionally joins

pub mod model;
pub mod service;

pub use model::Community;
pub use service::CommunityService;
