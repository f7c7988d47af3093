use std::sync::Arc;

use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::clan::Clan;
use crate::kernel::{ClanStore, CommunityStore, UserStore};

/// Creates clans scoped to a community and handles leader-authorized kicks.
pub struct ClanService {
    clans: Arc<dyn ClanStore>,
    communities: Arc<dyn CommunityStore>,
    users: Arc<dyn UserStore>,
}

impl ClanService {
    pub fn new(
        clans: Arc<dyn ClanStore>,
        communities: Arc<dyn CommunityStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            clans,
            communities,
            users,
        }
    }

    /// Create a clan led by `leader_user_id` inside `community_id`.
    ///
    /// The leader must already belong to the community. The clan insert and
    /// the leader's `clan_id` assignment are persisted in one transaction.
    pub async fn create(
        &self,
        community_id: Uuid,
        leader_user_id: Uuid,
        name: &str,
    ) -> Result<Clan, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::validation("clan name is required"));
        }

        self.communities
            .get(community_id)
            .await?
            .ok_or(CoreError::NotFound("community"))?;

        let mut leader = self
            .users
            .get(leader_user_id)
            .await?
            .ok_or(CoreError::NotFound("leader user"))?;

        if leader.community_id != Some(community_id) {
            return Err(CoreError::invalid_state(
                "clan leader does not belong to the target community",
            ));
        }

        let clan = Clan::new(community_id, leader_user_id, name);
        // The leader keeps their points when founding a clan; only the
        // affiliation changes.
        leader.clan_id = Some(clan.id);
        self.clans.create_with_leader(&clan, &leader).await?;

        tracing::info!(clan_id = %clan.id, community_id = %community_id, "clan created");
        Ok(clan)
    }

    pub async fn get(&self, id: Uuid) -> Result<Clan, CoreError> {
        self.clans.get(id).await?.ok_or(CoreError::NotFound("clan"))
    }

    /// All clans owned by a community, one pass over backing storage.
    pub async fn by_community(&self, community_id: Uuid) -> Result<Vec<Clan>, CoreError> {
        self.clans.by_community(community_id).await
    }

    /// Remove `target_user_id` from the clan. Only the clan's recorded
    /// leader may kick; leader and target must both currently be affiliated
    /// with this clan. The leader's own state is untouched.
    pub async fn kick_member(
        &self,
        clan_id: Uuid,
        leader_user_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<(), CoreError> {
        let mut target = self
            .users
            .get(target_user_id)
            .await?
            .ok_or(CoreError::NotFound("target user"))?;
        if target.clan_id.is_none() {
            return Err(CoreError::invalid_state("target user is not in a clan"));
        }

        let leader = self
            .users
            .get(leader_user_id)
            .await?
            .ok_or(CoreError::NotFound("leader user"))?;
        if leader.clan_id.is_none() {
            return Err(CoreError::invalid_state("leader is not in a clan"));
        }

        let clan = self
            .clans
            .get(clan_id)
            .await?
            .ok_or(CoreError::NotFound("clan"))?;

        if leader.id != clan.leader_user_id {
            return Err(CoreError::invalid_state(
                "user is not the leader of this clan",
            ));
        }
        if target.clan_id != Some(clan.id) {
            return Err(CoreError::invalid_state(
                "target user is not a member of this clan",
            ));
        }

        target.clear_clan();
        self.users.update(&target).await?;

        tracing::info!(clan_id = %clan_id, target_user_id = %target_user_id, "member kicked");
        Ok(())
    }
}
