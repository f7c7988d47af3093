// Business domains
pub mod clan;
pub mod community;
pub mod invitation;
pub mod user;
