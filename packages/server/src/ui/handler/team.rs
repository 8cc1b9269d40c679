//! Team endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{RoomId, TeamId},
    infrastructure::dto::http::{CreateTeamRequest, ParticipantDto, TeamDto},
    ui::{auth::AuthUser, error::ApiError, state::AppState},
};

pub async fn create_team(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamDto>), ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let team = state
        .manage_teams_usecase
        .create(user_id, room_id, request.name)
        .await?;
    Ok((StatusCode::CREATED, Json(TeamDto::from(&team))))
}

pub async fn delete_team(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let team_id = TeamId::try_from(team_id)?;
    state.manage_teams_usecase.delete(user_id, team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn join_team(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(team_id): Path<String>,
) -> Result<Json<ParticipantDto>, ApiError> {
    let team_id = TeamId::try_from(team_id)?;
    let participant = state.manage_teams_usecase.join(user_id, team_id).await?;
    Ok(Json(ParticipantDto::from(&participant)))
}
