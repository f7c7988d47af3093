use std::sync::Arc;

use uuid::Uuid;

use crate::common::CoreError;
use crate::domains::community::Community;
use crate::kernel::CommunityStore;

/// Creates and looks up communities. Leaf component; no dependencies on the
/// other domains.
pub struct CommunityService {
    communities: Arc<dyn CommunityStore>,
}

impl CommunityService {
    pub fn new(communities: Arc<dyn CommunityStore>) -> Self {
        Self { communities }
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Community, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::validation("community name is required"));
        }

        let community = Community::new(name, description);
        self.communities.create(&community).await?;

        tracing::info!(community_id = %community.id, "community created");
        Ok(community)
    }

    pub async fn get(&self, id: Uuid) -> Result<Community, CoreError> {
        self.communities
            .get(id)
            .await?
            .ok_or(CoreError::NotFound("community"))
    }
}
