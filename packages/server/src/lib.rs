// Warband - clan membership API
//
// Backend for tracking communities, clans nested inside them, and users who
// belong to at most one of each, plus the invitation workflow for recruiting
// users into clans. Business rules live in domains/*/service.rs; everything
// under kernel/ and server/ is storage and transport plumbing.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::Config;
