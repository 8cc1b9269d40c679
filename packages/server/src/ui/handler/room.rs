//! Room and membership endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ParticipantId, RoomId, UserId},
    infrastructure::dto::http::{
        ChangeVisibilityRequest, ChangeVisibilityResponse, CreateRoomRequest, CreateRoomResponse,
        JoinRoomRequest, JoinRoomResponse, PassAdminRequest, RoomDetailDto, RoomSummaryDto,
    },
    ui::{auth::AuthUser, error::ApiError, state::AppState},
};

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    let room = state
        .create_room_usecase
        .execute(user_id, request.name, request.is_open)
        .await?;

    let response = CreateRoomResponse {
        room_id: room.id.to_string(),
        invite_code: room
            .visibility
            .invite_code()
            .map(|code| code.as_str().to_string()),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<RoomSummaryDto>>, ApiError> {
    let rooms = state.get_rooms_usecase.list_all().await?;
    Ok(Json(rooms.iter().map(RoomSummaryDto::from).collect()))
}

pub async fn list_my_rooms(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RoomSummaryDto>>, ApiError> {
    let rooms = state.get_rooms_usecase.list_mine(&user_id).await?;
    Ok(Json(rooms.iter().map(RoomSummaryDto::from).collect()))
}

pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let detail = state.get_rooms_usecase.detail(&room_id).await?;

    // Domain Model から DTO への変換
    Ok(Json(RoomDetailDto::new(
        &detail.room,
        &detail.teams,
        &detail.participants,
        &user_id,
    )))
}

pub async fn change_visibility(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    Json(request): Json<ChangeVisibilityRequest>,
) -> Result<Json<ChangeVisibilityResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let room = state
        .change_visibility_usecase
        .execute(user_id, room_id, request.is_open)
        .await?;
    Ok(Json(ChangeVisibilityResponse {
        invite_code: room
            .visibility
            .invite_code()
            .map(|code| code.as_str().to_string()),
    }))
}

pub async fn pass_admin(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    Json(request): Json<PassAdminRequest>,
) -> Result<StatusCode, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let new_admin = UserId::try_from(request.user_id)?;
    state
        .pass_admin_usecase
        .execute(user_id, room_id, new_admin)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    state.delete_room_usecase.execute(user_id, room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(room_id): Path<String>,
    request: Option<Json<JoinRoomRequest>>,
) -> Result<(StatusCode, Json<JoinRoomResponse>), ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let participant = state
        .join_room_usecase
        .execute(user_id, room_id, request.invite_code.as_deref())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(JoinRoomResponse {
            participant_id: participant.id.to_string(),
        }),
    ))
}

pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.leave_room_usecase.leave(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn kick_participant(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path((room_id, participant_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let participant_id = ParticipantId::try_from(participant_id)?;
    state
        .leave_room_usecase
        .kick(user_id, room_id, participant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
