use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::clan::Clan;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct CreateClanRequest {
    pub community_id: Uuid,
    pub leader_user_id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct KickMemberRequest {
    pub leader_user_id: Uuid,
    pub target_user_id: Uuid,
}

pub async fn create_clan(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateClanRequest>,
) -> Result<(StatusCode, Json<Clan>), ApiError> {
    let clan = state
        .services
        .clans
        .create(req.community_id, req.leader_user_id, &req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(clan)))
}

pub async fn get_clan(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Clan>, ApiError> {
    let clan = state.services.clans.get(id).await?;
    Ok(Json(clan))
}

pub async fn clans_by_community(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Clan>>, ApiError> {
    let clans = state.services.clans.by_community(id).await?;
    Ok(Json(clans))
}

pub async fn kick_member(
    Extension(state): Extension<AppState>,
    Path(clan_id): Path<Uuid>,
    Json(req): Json<KickMemberRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .services
        .clans
        .kick_member(clan_id, req.leader_user_id, req.target_user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
