use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clan always belongs to exactly one community. `leader_user_id` is the
/// user recorded at creation time; the leader's own affiliation can change
/// afterwards without updating the clan record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Clan {
    pub id: Uuid,
    pub community_id: Uuid,
    pub leader_user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Clan {
    pub fn new(community_id: Uuid, leader_user_id: Uuid, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            community_id,
            leader_user_id,
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}
