//! UseCase 層
//!
//! 1 つの操作につき 1 つの構造体を置き、依存は `Arc<dyn Trait>` で受け取ります。

pub mod advance_round;
pub mod change_visibility;
pub mod connect_participant;
pub mod create_room;
pub mod delete_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_rooms;
pub mod get_words;
pub mod join_room;
pub mod leave_room;
pub mod manage_teams;
pub mod pass_admin;
pub mod reset_game;
pub mod settings;
pub mod start_game;
pub mod team_lock;

#[cfg(test)]
pub(crate) mod test_support;

pub use advance_round::{AdvanceOutcome, AdvanceRoundUseCase};
pub use change_visibility::ChangeVisibilityUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use delete_room::DeleteRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::GameError;
pub use get_rooms::{GetRoomsUseCase, RoomDetail};
pub use get_words::GetWordsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use manage_teams::ManageTeamsUseCase;
pub use pass_admin::PassAdminUseCase;
pub use reset_game::ResetGameUseCase;
pub use settings::GameSettings;
pub use start_game::StartGameUseCase;
pub use team_lock::TeamLocks;
