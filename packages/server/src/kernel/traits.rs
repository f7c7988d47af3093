// Persistence interface for the membership domains
//
// These are INFRASTRUCTURE traits only - no business rules. Validation and
// state transitions live in the domain services; implementations here just
// move entities in and out of storage.
//
// Multi-entity mutations (clan creation + leader assignment, invitation
// resolution + user update) are expressed as single trait methods so an
// implementation can make them atomic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::clan::Clan;
use crate::domains::community::Community;
use crate::domains::invitation::{Invitation, InvitationStatus};
use crate::domains::user::User;

#[async_trait]
pub trait CommunityStore: Send + Sync {
    async fn create(&self, community: &Community) -> Result<(), CoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<Community>, CoreError>;
}

#[async_trait]
pub trait ClanStore: Send + Sync {
    /// Insert the clan and persist the leader's updated affiliation in one
    /// atomic step. The leader update is versioned like `UserStore::update`.
    async fn create_with_leader(&self, clan: &Clan, leader: &User) -> Result<(), CoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Clan>, CoreError>;

    async fn by_community(&self, community_id: Uuid) -> Result<Vec<Clan>, CoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), CoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<User>, CoreError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, CoreError>;

    /// Conditional on the version the caller read; returns the stored row
    /// with the bumped version, or `Conflict` when the row changed (or
    /// disappeared) since that read.
    async fn update(&self, user: &User) -> Result<User, CoreError>;
}

#[async_trait]
pub trait InvitationStore: Send + Sync {
    async fn create(&self, invitation: &Invitation) -> Result<(), CoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Invitation>, CoreError>;

    async fn pending_for_clan(&self, clan_id: Uuid) -> Result<Vec<Invitation>, CoreError>;

    /// Persist the terminal status and, for accepts, the invited user's new
    /// affiliation in one atomic step.
    async fn resolve(
        &self,
        invitation_id: Uuid,
        status: InvitationStatus,
        user: Option<&User>,
    ) -> Result<(), CoreError>;
}
