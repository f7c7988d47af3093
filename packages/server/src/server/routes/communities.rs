use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::community::Community;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_community(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateCommunityRequest>,
) -> Result<(StatusCode, Json<Community>), ApiError> {
    let community = state
        .services
        .communities
        .create(&req.name, &req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(community)))
}

pub async fn get_community(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Community>, ApiError> {
    let community = state.services.communities.get(id).await?;
    Ok(Json(community))
}
