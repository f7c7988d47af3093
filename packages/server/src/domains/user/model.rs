use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user and their mutable affiliation state.
///
/// `clan_id`, when set, references a clan whose community matches
/// `community_id`; the services enforce this at every mutation boundary.
/// `version` is the optimistic-concurrency token checked by
/// `UserStore::update` - a stale write is rejected instead of clobbering a
/// concurrent affiliation change.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub community_id: Option<Uuid>,
    pub clan_id: Option<Uuid>,
    pub points: i32,
    #[serde(skip)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            community_id: None,
            clan_id: None,
            points: 0,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Assign a community. Moving to a different community forfeits any clan
    /// membership and accumulated points.
    pub fn assign_community(&mut self, community_id: Uuid) {
        if self.community_id.is_some_and(|current| current != community_id) {
            self.clan_id = None;
            self.points = 0;
        }
        self.community_id = Some(community_id);
    }

    /// Assign a clan. Switching from a different clan resets points first.
    pub fn assign_clan(&mut self, clan_id: Uuid) {
        if self.clan_id.is_some_and(|current| current != clan_id) {
            self.points = 0;
        }
        self.clan_id = Some(clan_id);
    }

    /// Leave the current clan, forfeiting points.
    pub fn clear_clan(&mut self) {
        self.clan_id = None;
        self.points = 0;
    }
}
