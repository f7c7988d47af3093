//! In-memory implementation of the store traits
//!
//! Serves as the test double for the service unit tests and as storage for
//! local runs without Postgres. A single mutex over all four maps makes the
//! multi-entity store methods atomic, mirroring the transactions in
//! postgres.rs; version checks on user updates mirror the conditional SQL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::clan::Clan;
use crate::domains::community::Community;
use crate::domains::invitation::{Invitation, InvitationStatus};
use crate::domains::user::User;
use crate::kernel::traits::{ClanStore, CommunityStore, InvitationStore, UserStore};

#[derive(Default)]
struct MemoryInner {
    communities: HashMap<Uuid, Community>,
    clans: HashMap<Uuid, Clan>,
    users: HashMap<Uuid, User>,
    invitations: HashMap<Uuid, Invitation>,
}

impl MemoryInner {
    fn update_user_versioned(&mut self, user: &User) -> Result<User, CoreError> {
        let stored = self
            .users
            .get_mut(&user.id)
            .filter(|stored| stored.version == user.version)
            .ok_or_else(|| CoreError::conflict("user was modified concurrently"))?;

        *stored = User {
            version: user.version + 1,
            ..user.clone()
        };
        Ok(stored.clone())
    }
}

/// Clones share the same backing maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[async_trait]
impl CommunityStore for MemoryStore {
    async fn create(&self, community: &Community) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.communities.insert(community.id, community.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Community>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.communities.get(&id).cloned())
    }
}

#[async_trait]
impl ClanStore for MemoryStore {
    async fn create_with_leader(&self, clan: &Clan, leader: &User) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        // Check the leader first so a conflict leaves no clan behind.
        inner.update_user_versioned(leader)?;
        inner.clans.insert(clan.id, clan.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Clan>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clans.get(&id).cloned())
    }

    async fn by_community(&self, community_id: Uuid) -> Result<Vec<Clan>, CoreError> {
        let inner = self.inner.lock().unwrap();
        let mut clans: Vec<Clan> = inner
            .clans
            .values()
            .filter(|clan| clan.community_id == community_id)
            .cloned()
            .collect();
        clans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clans)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.update_user_versioned(user)
    }
}

#[async_trait]
impl InvitationStore for MemoryStore {
    async fn create(&self, invitation: &Invitation) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.invitations.insert(invitation.id, invitation.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Invitation>, CoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.invitations.get(&id).cloned())
    }

    async fn pending_for_clan(&self, clan_id: Uuid) -> Result<Vec<Invitation>, CoreError> {
        let inner = self.inner.lock().unwrap();
        let mut invitations: Vec<Invitation> = inner
            .invitations
            .values()
            .filter(|invitation| {
                invitation.clan_id == clan_id && invitation.status == InvitationStatus::Pending
            })
            .cloned()
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    async fn resolve(
        &self,
        invitation_id: Uuid,
        status: InvitationStatus,
        user: Option<&User>,
    ) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        // User first: a version conflict must leave the invitation pending.
        if let Some(user) = user {
            inner.update_user_versioned(user)?;
        }
        if let Some(invitation) = inner.invitations.get_mut(&invitation_id) {
            invitation.status = status;
        }
        Ok(())
    }
}
