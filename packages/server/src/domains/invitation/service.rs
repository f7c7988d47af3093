use std::sync::Arc;

use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::invitation::Invitation;
use crate::kernel::{ClanStore, InvitationStore, UserStore};

/// Creates pending invitations and resolves them, applying the same
/// affiliation invariants as the membership transitions on acceptance.
pub struct InvitationService {
    invitations: Arc<dyn InvitationStore>,
    clans: Arc<dyn ClanStore>,
    users: Arc<dyn UserStore>,
}

impl InvitationService {
    pub fn new(
        invitations: Arc<dyn InvitationStore>,
        clans: Arc<dyn ClanStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            invitations,
            clans,
            users,
        }
    }

    /// Invite `user_id` into `clan_id`. Only the clan's recorded leader may
    /// invite, and only users who already share the clan's community.
    pub async fn invite(
        &self,
        clan_id: Uuid,
        leader_user_id: Uuid,
        user_id: Uuid,
    ) -> Result<Invitation, CoreError> {
        let clan = self
            .clans
            .get(clan_id)
            .await?
            .ok_or(CoreError::NotFound("clan"))?;

        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or(CoreError::NotFound("user"))?;

        let leader = self
            .users
            .get(leader_user_id)
            .await?
            .ok_or(CoreError::NotFound("leader user"))?;

        if leader.id != clan.leader_user_id {
            return Err(CoreError::invalid_state(
                "user is not the leader of this clan",
            ));
        }
        if user.community_id != Some(clan.community_id) {
            return Err(CoreError::invalid_state(
                "user does not belong to the clan's community",
            ));
        }

        let invitation = Invitation::new(clan_id, user_id);
        self.invitations.create(&invitation).await?;

        tracing::info!(invitation_id = %invitation.id, clan_id = %clan_id, user_id = %user_id, "invitation created");
        Ok(invitation)
    }

    /// Resolve a pending invitation. Accepting moves the invited user into
    /// the clan and resets their points, overwriting any prior clan
    /// membership; the status update and the user mutation are persisted in
    /// one transaction. A non-pending invitation is rejected.
    ///
    /// The user's community is deliberately not re-checked here: the match
    /// was validated at invite time, and a community change in between is
    /// resolved in favor of the acceptance.
    pub async fn respond(
        &self,
        invitation_id: Uuid,
        accept: bool,
    ) -> Result<Invitation, CoreError> {
        let mut invitation = self
            .invitations
            .get(invitation_id)
            .await?
            .ok_or(CoreError::NotFound("invitation"))?;

        if !invitation.is_pending() {
            return Err(CoreError::invalid_state(
                "invitation has already been resolved",
            ));
        }

        if accept {
            invitation.accept();

            let mut user = self
                .users
                .get(invitation.user_id)
                .await?
                .ok_or(CoreError::NotFound("user"))?;
            user.points = 0;
            user.clan_id = Some(invitation.clan_id);

            self.invitations
                .resolve(invitation.id, invitation.status, Some(&user))
                .await?;
        } else {
            invitation.decline();
            self.invitations
                .resolve(invitation.id, invitation.status, None)
                .await?;
        }

        tracing::info!(invitation_id = %invitation_id, status = ?invitation.status, "invitation resolved");
        Ok(invitation)
    }

    /// Unresolved invitations for a clan.
    pub async fn pending_for_clan(&self, clan_id: Uuid) -> Result<Vec<Invitation>, CoreError> {
        self.clans
            .get(clan_id)
            .await?
            .ok_or(CoreError::NotFound("clan"))?;

        self.invitations.pending_for_clan(clan_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::clan::{Clan, ClanService};
    use crate::domains::community::CommunityService;
    use crate::domains::invitation::InvitationStatus;
    use crate::domains::user::{User, UserService};
    use crate::kernel::Stores;

    struct Fixture {
        communities: CommunityService,
        clans: ClanService,
        users: UserService,
        invitations: InvitationService,
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
            invitations: InvitationService::new(
                stores.invitations.clone(),
                stores.clans.clone(),
                stores.users.clone(),
            ),
        }
    }

    impl Fixture {
        /// Community with a clan led by "thrall" plus a clanless member of
        /// the same community.
        async fn seeded(&self) -> (Clan, User) {
            let community = self.communities.create("horde", "").await.unwrap();
            let leader = self.users.create("thrall").await.unwrap();
            self.users.join_community(leader.id, community.id).await.unwrap();
            let clan = self
                .clans
                .create(community.id, leader.id, "frostwolves")
                .await
                .unwrap();

            let member = self.users.create("grunt").await.unwrap();
            self.users.join_community(member.id, community.id).await.unwrap();
            (clan, member)
        }
    }

    #[tokio::test]
    async fn invite_produces_pending_invitation() {
        let f = fixture();
        let (clan, member) = f.seeded().await;

        let invitation = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.clan_id, clan.id);
        assert_eq!(invitation.user_id, member.id);
    }

    #[tokio::test]
    async fn only_the_recorded_leader_may_invite() {
        let f = fixture();
        let (clan, member) = f.seeded().await;

        let err = f
            .invitations
            .invite(clan.id, member.id, member.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[tokio::test]
    async fn invite_rejects_user_outside_the_community() {
        let f = fixture();
        let (clan, _) = f.seeded().await;
        let outsider = f.users.create("anduin").await.unwrap();

        let err = f
            .invitations
            .invite(clan.id, clan.leader_user_id, outsider.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[tokio::test]
    async fn invite_missing_entities_is_not_found() {
        let f = fixture();
        let (clan, member) = f.seeded().await;

        let err = f
            .invitations
            .invite(Uuid::new_v4(), clan.leader_user_id, member.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("clan")));

        let err = f
            .invitations
            .invite(clan.id, clan.leader_user_id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound("user")));
    }

    #[tokio::test]
    async fn accepting_moves_the_user_into_the_clan() {
        let f = fixture();
        let (clan, member) = f.seeded().await;
        let invitation = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        let resolved = f.invitations.respond(invitation.id, true).await.unwrap();

        assert_eq!(resolved.status, InvitationStatus::Accepted);
        let member = f.users.get(member.id).await.unwrap();
        assert_eq!(member.clan_id, Some(clan.id));
        assert_eq!(member.points, 0);
    }

    #[tokio::test]
    async fn accepting_overwrites_a_prior_clan_membership() {
        let f = fixture();
        let (clan, member) = f.seeded().await;

        // The member founds their own clan, then accepts an invitation into
        // another one.
        let own = f
            .clans
            .create(clan.community_id, member.id, "warsong")
            .await
            .unwrap();
        let invitation = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        f.invitations.respond(invitation.id, true).await.unwrap();

        let member = f.users.get(member.id).await.unwrap();
        assert_eq!(member.clan_id, Some(clan.id));
        assert_ne!(member.clan_id, Some(own.id));
        assert_eq!(member.points, 0);
    }

    #[tokio::test]
    async fn declining_leaves_the_user_untouched() {
        let f = fixture();
        let (clan, member) = f.seeded().await;
        let invitation = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        let resolved = f.invitations.respond(invitation.id, false).await.unwrap();

        assert_eq!(resolved.status, InvitationStatus::Declined);
        let member = f.users.get(member.id).await.unwrap();
        assert_eq!(member.clan_id, None);
    }

    #[tokio::test]
    async fn responding_twice_is_rejected() {
        let f = fixture();
        let (clan, member) = f.seeded().await;
        let invitation = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        f.invitations.respond(invitation.id, false).await.unwrap();

        let err = f.invitations.respond(invitation.id, true).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));

        // The decline stuck; the late accept did not move the user.
        let member = f.users.get(member.id).await.unwrap();
        assert_eq!(member.clan_id, None);
    }

    #[tokio::test]
    async fn respond_missing_invitation_is_not_found() {
        let f = fixture();

        let err = f.invitations.respond(Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound("invitation")));
    }

    #[tokio::test]
    async fn pending_for_clan_excludes_resolved_invitations() {
        let f = fixture();
        let (clan, member) = f.seeded().await;

        let declined = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();
        f.invitations.respond(declined.id, false).await.unwrap();

        let open = f
            .invitations
            .invite(clan.id, clan.leader_user_id, member.id)
            .await
            .unwrap();

        let pending = f.invitations.pending_for_clan(clan.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);

        // Unknown clan id is a lookup failure, not an empty list.
        let err = f.invitations.pending_for_clan(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound("clan")));
    }
}
