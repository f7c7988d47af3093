//! Postgres implementations of the store traits (sqlx)

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::clan::Clan;
use crate::domains::community::Community;
use crate::domains::invitation::{Invitation, InvitationStatus};
use crate::domains::user::User;
use crate::kernel::traits::{ClanStore, CommunityStore, InvitationStore, UserStore};

#[derive(Clone)]
pub struct PgCommunityStore {
    pool: PgPool,
}

impl PgCommunityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityStore for PgCommunityStore {
    async fn create(&self, community: &Community) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO communities (id, name, description, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(community.id)
        .bind(&community.name)
        .bind(&community.description)
        .bind(community.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Community>, CoreError> {
        let community = sqlx::query_as::<_, Community>("SELECT * FROM communities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(community)
    }
}

#[derive(Clone)]
pub struct PgClanStore {
    pool: PgPool,
}

impl PgClanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClanStore for PgClanStore {
    async fn create_with_leader(&self, clan: &Clan, leader: &User) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO clans (id, community_id, leader_user_id, name, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(clan.id)
        .bind(clan.community_id)
        .bind(clan.leader_user_id)
        .bind(&clan.name)
        .bind(clan.created_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE users
             SET clan_id = $2, points = $3, version = version + 1
             WHERE id = $1 AND version = $4",
        )
        .bind(leader.id)
        .bind(leader.clan_id)
        .bind(leader.points)
        .bind(leader.version)
        .execute(&mut *tx)
        .await?;

        // Dropping the transaction without commit rolls the insert back.
        if updated.rows_affected() == 0 {
            return Err(CoreError::conflict("leader was modified concurrently"));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Clan>, CoreError> {
        let clan = sqlx::query_as::<_, Clan>("SELECT * FROM clans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(clan)
    }

    async fn by_community(&self, community_id: Uuid) -> Result<Vec<Clan>, CoreError> {
        let clans = sqlx::query_as::<_, Clan>(
            "SELECT * FROM clans WHERE community_id = $1 ORDER BY created_at DESC",
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clans)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &User) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO users (id, username, community_id, clan_id, points, version, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.community_id)
        .bind(user.clan_id)
        .bind(user.points)
        .bind(user.version)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, CoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, CoreError> {
        let updated = sqlx::query_as::<_, User>(
            "UPDATE users
             SET username = $2, community_id = $3, clan_id = $4, points = $5,
                 version = version + 1
             WHERE id = $1 AND version = $6
             RETURNING *",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(user.community_id)
        .bind(user.clan_id)
        .bind(user.points)
        .bind(user.version)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| CoreError::conflict("user was modified concurrently"))
    }
}

#[derive(Clone)]
pub struct PgInvitationStore {
    pool: PgPool,
}

impl PgInvitationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for PgInvitationStore {
    async fn create(&self, invitation: &Invitation) -> Result<(), CoreError> {
        sqlx::query(
            "INSERT INTO invitations (id, clan_id, user_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(invitation.id)
        .bind(invitation.clan_id)
        .bind(invitation.user_id)
        .bind(invitation.status)
        .bind(invitation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Invitation>, CoreError> {
        let invitation = sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invitation)
    }

    async fn pending_for_clan(&self, clan_id: Uuid) -> Result<Vec<Invitation>, CoreError> {
        let invitations = sqlx::query_as::<_, Invitation>(
            "SELECT * FROM invitations
             WHERE clan_id = $1 AND status = 'pending'
             ORDER BY created_at DESC",
        )
        .bind(clan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invitations)
    }

    async fn resolve(
        &self,
        invitation_id: Uuid,
        status: InvitationStatus,
        user: Option<&User>,
    ) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE invitations SET status = $2 WHERE id = $1")
            .bind(invitation_id)
            .bind(status)
            .execute(&mut *tx)
            .await?;

        if let Some(user) = user {
            let updated = sqlx::query(
                "UPDATE users
                 SET clan_id = $2, points = $3, version = version + 1
                 WHERE id = $1 AND version = $4",
            )
            .bind(user.id)
            .bind(user.clan_id)
            .bind(user.points)
            .bind(user.version)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                return Err(CoreError::conflict("user was modified concurrently"));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
