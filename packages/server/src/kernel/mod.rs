// Storage and composition plumbing
//
// traits.rs defines the persistence interface the services are written
// against; postgres.rs and memory.rs implement it. deps.rs wires stores and
// services together (explicit constructor composition, no container).

pub mod deps;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use deps::{Services, Stores};
pub use memory::MemoryStore;
pub use postgres::{PgClanStore, PgCommunityStore, PgInvitationStore, PgUserStore};
pub use traits::{ClanStore, CommunityStore, InvitationStore, UserStore};
