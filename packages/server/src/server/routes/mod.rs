pub mod clans;
pub mod communities;
pub mod health;
pub mod invitations;
pub mod users;

pub use clans::{clans_by_community, create_clan, get_clan, kick_member};
pub use communities::{create_community, get_community};
pub use health::health_handler;
pub use invitations::{invite_to_clan, pending_invitations, respond_invitation};
pub use users::{create_user, get_user, join_clan, join_community, leave_clan};
