use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::invitation::Invitation;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Deserialize)]
pub struct InviteRequest {
    pub leader_user_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

pub async fn invite_to_clan(
    Extension(state): Extension<AppState>,
    Path(clan_id): Path<Uuid>,
    Json(req): Json<InviteRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    let invitation = state
        .services
        .invitations
        .invite(clan_id, req.leader_user_id, req.user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(invitation)))
}

pub async fn pending_invitations(
    Extension(state): Extension<AppState>,
    Path(clan_id): Path<Uuid>,
) -> Result<Json<Vec<Invitation>>, ApiError> {
    let invitations = state.services.invitations.pending_for_clan(clan_id).await?;
    Ok(Json(invitations))
}

pub async fn respond_invitation(
    Extension(state): Extension<AppState>,
    Path(invitation_id): Path<Uuid>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<Invitation>, ApiError> {
    let invitation = state
        .services
        .invitations
        .respond(invitation_id, req.accept)
        .await?;

    Ok(Json(invitation))
}
