//! Explicit composition of stores and services
//!
//! No container: the binary builds a `Stores` over its chosen backend and
//! hands it to `Services::new`, which wires the four domain services in
//! dependency order.

use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::clan::ClanService;
use crate::domains::community::CommunityService;
use crate::domains::invitation::InvitationService;
use crate::domains::user::UserService;
use crate::kernel::memory::MemoryStore;
use crate::kernel::postgres::{PgClanStore, PgCommunityStore, PgInvitationStore, PgUserStore};
use crate::kernel::traits::{ClanStore, CommunityStore, InvitationStore, UserStore};

/// The persistence collaborator, one handle per entity.
#[derive(Clone)]
pub struct Stores {
    pub communities: Arc<dyn CommunityStore>,
    pub clans: Arc<dyn ClanStore>,
    pub users: Arc<dyn UserStore>,
    pub invitations: Arc<dyn InvitationStore>,
}

impl Stores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            communities: Arc::new(PgCommunityStore::new(pool.clone())),
            clans: Arc::new(PgClanStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            invitations: Arc::new(PgInvitationStore::new(pool.clone())),
        }
    }

    /// All four handles share one `MemoryStore`.
    pub fn in_memory() -> Self {
        let store = MemoryStore::default();
        Self {
            communities: Arc::new(store.clone()),
            clans: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            invitations: Arc::new(store),
        }
    }
}

#[derive(Clone)]
pub struct Services {
    pub communities: Arc<CommunityService>,
    pub clans: Arc<ClanService>,
    pub users: Arc<UserService>,
    pub invitations: Arc<InvitationService>,
}

impl Services {
    pub fn new(stores: Stores) -> Self {
        Self {
            communities: Arc::new(CommunityService::new(stores.communities.clone())),
            clans: Arc::new(ClanService::new(
                stores.clans.clone(),
                stores.communities.clone(),
                stores.users.clone(),
            )),
            users: Arc::new(UserService::new(
                stores.users.clone(),
                stores.communities.clone(),
                stores.clans.clone(),
            )),
            invitations: Arc::new(InvitationService::new(
                stores.invitations,
                stores.clans,
                stores.users,
            )),
        }
    }
}
