use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

/// A proposal for a user to join a clan.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invitation {
    pub id: Uuid,
    pub clan_id: Uuid,
    pub user_id: Uuid,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(clan_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            clan_id,
            user_id,
            status: InvitationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    pub fn accept(&mut self) {
        self.status = InvitationStatus::Accepted;
    }

    pub fn decline(&mut self) {
        self.status = InvitationStatus::Declined;
    }
}
