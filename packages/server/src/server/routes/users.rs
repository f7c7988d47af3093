use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::user::User;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Deserialize)]
pub struct JoinCommunityRequest {
    pub community_id: Uuid,
}

#[derive(Deserialize)]
pub struct ClanMembershipRequest {
    pub clan_id: Uuid,
}

pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.services.users.create(&req.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = state.services.users.get(id).await?;
    Ok(Json(user))
}

pub async fn join_community(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<JoinCommunityRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .services
        .users
        .join_community(user_id, req.community_id)
        .await?;

    Ok(Json(user))
}

pub async fn join_clan(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ClanMembershipRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.services.users.join_clan(user_id, req.clan_id).await?;
    Ok(Json(user))
}

pub async fn leave_clan(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ClanMembershipRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.services.users.leave_clan(user_id, req.clan_id).await?;
    Ok(Json(user))
}
