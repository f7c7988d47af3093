use std::sync::Arc;

use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::user::User;
use crate::kernel::{ClanStore, CommunityStore, UserStore};

/// Creates users and coordinates their affiliation transitions.
///
/// Every transition loads the entities involved, validates the membership
/// invariants, mutates the user in memory, and persists through the versioned
/// `UserStore::update` so concurrent mutations of the same user cannot lose
/// writes.
pub struct UserService {
    users: Arc<dyn UserStore>,
    communities: Arc<dyn CommunityStore>,
    clans: Arc<dyn ClanStore>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        communities: Arc<dyn CommunityStore>,
        clans: Arc<dyn ClanStore>,
    ) -> Self {
        Self {
            users,
            communities,
            clans,
        }
    }

    pub async fn create(&self, username: &str) -> Result<User, CoreError> {
        if username.trim().is_empty() {
            return Err(CoreError::validation("username is required"));
        }

        if self.users.get_by_username(username).await?.is_some() {
            return Err(CoreError::conflict("username is already taken"));
        }

        let user = User::new(username);
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, CoreError> {
        self.users.get(id).await?.ok_or(CoreError::NotFound("user"))
    }

    /// Move the user into a community. Moving to a different community
    /// forfeits clan membership and points; re-joining the current one is a
    /// plain re-assignment.
    pub async fn join_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> Result<User, CoreError> {
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;

        self.communities
            .get(community_id)
            .await?
            .ok_or(CoreError::NotFound("community"))?;

        user.assign_community(community_id);
        let user = self.users.update(&user).await?;

        tracing::info!(user_id = %user_id, community_id = %community_id, "user joined community");
        Ok(user)
    }

    /// Move the user into a clan of their own community. Switching from a
    /// different clan resets points first.
    pub async fn join_clan(&self, user_id: Uuid, clan_id: Uuid) -> Result<User, CoreError> {
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;

        let clan = self
            .clans
            .get(clan_id)
            .await?
            .ok_or(CoreError::NotFound("clan"))?;

        if user.community_id != Some(clan.community_id) {
            return Err(CoreError::invalid_state(
                "user does not belong to the clan's community",
            ));
        }

        user.assign_clan(clan.id);
        let user = self.users.update(&user).await?;

        tracing::info!(user_id = %user_id, clan_id = %clan_id, "user joined clan");
        Ok(user)
    }

    /// Leave `clan_id`, forfeiting points. The user must actually hold that
    /// clan membership.
    pub async fn leave_clan(&self, user_id: Uuid, clan_id: Uuid) -> Result<User, CoreError> {
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;
        if user.clan_id.is_none() {
            return Err(CoreError::NotFound("user's clan"));
        }

        let clan = self
            .clans
            .get(clan_id)
            .await?
            .ok_or(CoreError::NotFound("clan"))?;

        if user.clan_id != Some(clan.id) {
            return Err(CoreError::invalid_state(
                "user is not a member of this clan",
            ));
        }

        user.clear_clan();
        let user = self.users.update(&user).await?;

        tracing::info!(user_id = %user_id, clan_id = %clan_id, "user left clan");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::clan::ClanService;
    use crate::domains::community::CommunityService;
    use crate::kernel::Stores;

    struct Fixture {
        stores: Stores,
        communities: CommunityService,
        clans: ClanService,
        users: UserService,
    }

    fn fixture() -> Fixture {
        let stores = Stores::in_memory();
        Fixture {
            communities: CommunityService::new(stores.communities.clone()),
            clans: ClanService::new(
                stores.clans.clone(),
                stores.communities.clone(),
                stores.users.clone(),
            ),
            users: UserService::new(
                stores.users.clone(),
                stores.communities.clone(),
                stores.clans.clone(),
            ),
            stores,
        }
    }

    impl Fixture {
        /// Award points directly through the store; no service operation
        /// grants points in this core.
        async fn grant_points(&self, user_id: Uuid, points: i32) {
            let mut user = self.stores.users.get(user_id).await.unwrap().unwrap();
            user.points = points;
            self.stores.users.update(&user).await.unwrap();
        }
    }

    #[tokio::test]
    async fn create_starts_unaffiliated() {
        let f = fixture();

        let user = f.users.create("grunt").await.unwrap();

        assert_eq!(user.community_id, None);
        assert_eq!(user.clan_id, None);
        assert_eq!(user.points, 0);
    }

    #[tokio::test]
    async fn create_rejects_blank_and_duplicate_usernames() {
        let f = fixture();

        let err = f.users.create(" ").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        f.users.create("grunt").await.unwrap();
        let err = f.users.create("grunt").await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn join_community_requires_both_sides() {
        let f = fixture();
        let community = f.communities.create("horde", "").await.unwrap();
        let user = f.users.create("grunt").await.unwrap();

        let err = f
            .users
            .join_community(Uuid::new_v4(), community.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("user")));

        let err = f
            .users
            .join_community(user.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("community")));
    }

    #[tokio::test]
    async fn moving_community_forfeits_clan_and_points() {
        let f = fixture();
        let horde = f.communities.create("horde", "").await.unwrap();
        let alliance = f.communities.create("alliance", "").await.unwrap();

        let leader = f.users.create("thrall").await.unwrap();
        f.users.join_community(leader.id, horde.id).await.unwrap();
        let clan = f.clans.create(horde.id, leader.id, "frostwolves").await.unwrap();

        let user = f.users.create("grunt").await.unwrap();
        f.users.join_community(user.id, horde.id).await.unwrap();
        f.users.join_clan(user.id, clan.id).await.unwrap();
        f.grant_points(user.id, 50).await;

        let moved = f.users.join_community(user.id, alliance.id).await.unwrap();

        assert_eq!(moved.community_id, Some(alliance.id));
        assert_eq!(moved.clan_id, None);
        assert_eq!(moved.points, 0);
    }

    #[tokio::test]
    async fn join_clan_requires_matching_community() {
        let f = fixture();
        let horde = f.communities.create("horde", "").await.unwrap();
        let alliance = f.communities.create("alliance", "").await.unwrap();

        let leader = f.users.create("thrall").await.unwrap();
        f.users.join_community(leader.id, horde.id).await.unwrap();
        let clan = f.clans.create(horde.id, leader.id, "frostwolves").await.unwrap();

        let outsider = f.users.create("anduin").await.unwrap();
        f.users.join_community(outsider.id, alliance.id).await.unwrap();

        let err = f.users.join_clan(outsider.id, clan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));

        // Unaffiliated users are rejected the same way.
        let drifter = f.users.create("drifter").await.unwrap();
        let err = f.users.join_clan(drifter.id, clan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[tokio::test]
    async fn leave_clan_clears_affiliation_and_points() {
        let f = fixture();
        let community = f.communities.create("horde", "").await.unwrap();
        let leader = f.users.create("thrall").await.unwrap();
        f.users.join_community(leader.id, community.id).await.unwrap();
        let clan = f.clans.create(community.id, leader.id, "frostwolves").await.unwrap();
        f.grant_points(leader.id, 75).await;

        let left = f.users.leave_clan(leader.id, clan.id).await.unwrap();

        assert_eq!(left.clan_id, None);
        assert_eq!(left.points, 0);
        // Community membership survives leaving a clan.
        assert_eq!(left.community_id, Some(community.id));
    }

    #[tokio::test]
    async fn leave_clan_with_wrong_clan_id_is_rejected() {
        let f = fixture();
        let community = f.communities.create("horde", "").await.unwrap();

        let thrall = f.users.create("thrall").await.unwrap();
        f.users.join_community(thrall.id, community.id).await.unwrap();
        let frostwolves = f.clans.create(community.id, thrall.id, "frostwolves").await.unwrap();

        let rexxar = f.users.create("rexxar").await.unwrap();
        f.users.join_community(rexxar.id, community.id).await.unwrap();
        let moknathal = f.clans.create(community.id, rexxar.id, "mok'nathal").await.unwrap();

        let err = f.users.leave_clan(thrall.id, moknathal.id).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));

        // Still a member of the original clan.
        let thrall = f.users.get(thrall.id).await.unwrap();
        assert_eq!(thrall.clan_id, Some(frostwolves.id));
    }

    #[tokio::test]
    async fn leave_clan_without_clan_is_not_found() {
        let f = fixture();
        let community = f.communities.create("horde", "").await.unwrap();
        let leader = f.users.create("thrall").await.unwrap();
        f.users.join_community(leader.id, community.id).await.unwrap();
        let clan = f.clans.create(community.id, leader.id, "frostwolves").await.unwrap();

        let loner = f.users.create("loner").await.unwrap();
        f.users.join_community(loner.id, community.id).await.unwrap();

        let err = f.users.leave_clan(loner.id, clan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn stale_user_write_is_rejected() {
        let f = fixture();
        let user = f.users.create("grunt").await.unwrap();

        // Two readers pick up the same version; the second write loses.
        let mut first = f.stores.users.get(user.id).await.unwrap().unwrap();
        let mut second = first.clone();

        first.points = 10;
        f.stores.users.update(&first).await.unwrap();

        second.points = 20;
        let err = f.stores.users.update(&second).await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));

        let current = f.users.get(user.id).await.unwrap();
        assert_eq!(current.points, 10);
    }
}
