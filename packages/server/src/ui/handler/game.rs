//! Game flow endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::{RoomId, ScoreDelta},
    infrastructure::dto::http::{
        AdvanceRoundRequest, AdvanceRoundResponse, RoomSummaryDto, StartGameRequest,
    },
    ui::{auth::AuthUser, error::ApiError, state::AppState},
    usecase::AdvanceOutcome,
};

pub async fn start_game(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<RoomSummaryDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let room = state
        .start_game_usecase
        .execute(user_id, room_id, request.number_of_rounds)
        .await?;
    Ok(Json(RoomSummaryDto::from(&room)))
}

/// Close the caller's turn with a score, or re-announce the speaker when `score` is absent.
pub async fn advance_round(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    request: Option<Json<AdvanceRoundRequest>>,
) -> Result<Json<AdvanceRoundResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let outcome = state
        .advance_round_usecase
        .execute(user_id, room_id, ScoreDelta::from(request.score))
        .await?;

    let response = match outcome {
        AdvanceOutcome::TurnAssigned { speaker, team } => AdvanceRoundResponse::TurnAssigned {
            speaker: speaker.to_string(),
            round: team.round,
            total_points: team.total_points,
        },
        AdvanceOutcome::WaitingForOtherTeams { team } => {
            AdvanceRoundResponse::WaitingForOtherTeams {
                round: team.round,
                total_points: team.total_points,
            }
        }
        AdvanceOutcome::GameOver { standings, .. } => AdvanceRoundResponse::GameOver {
            winners: standings.winners.iter().map(|id| id.to_string()).collect(),
        },
    };
    Ok(Json(response))
}

pub async fn reset_game(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSummaryDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let room = state.reset_game_usecase.execute(user_id, room_id).await?;
    Ok(Json(RoomSummaryDto::from(&room)))
}
