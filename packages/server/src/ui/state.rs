//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::Authenticator,
    usecase::{
        AdvanceRoundUseCase, ChangeVisibilityUseCase, ConnectParticipantUseCase,
        CreateRoomUseCase, DeleteRoomUseCase, DisconnectParticipantUseCase, GetRoomsUseCase,
        GetWordsUseCase, JoinRoomUseCase, LeaveRoomUseCase, ManageTeamsUseCase, PassAdminUseCase,
        ResetGameUseCase, StartGameUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// 資格情報をユーザー ID に解決する
    pub authenticator: Arc<dyn Authenticator>,
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub change_visibility_usecase: Arc<ChangeVisibilityUseCase>,
    pub pass_admin_usecase: Arc<PassAdminUseCase>,
    pub delete_room_usecase: Arc<DeleteRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub manage_teams_usecase: Arc<ManageTeamsUseCase>,
    pub start_game_usecase: Arc<StartGameUseCase>,
    pub advance_round_usecase: Arc<AdvanceRoundUseCase>,
    pub reset_game_usecase: Arc<ResetGameUseCase>,
    pub get_words_usecase: Arc<GetWordsUseCase>,
}
