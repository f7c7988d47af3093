// Shared types used across domains
pub mod error;

pub use error::CoreError;
