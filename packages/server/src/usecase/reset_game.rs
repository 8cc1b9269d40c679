//! UseCase: ゲームのリセット

use std::sync::Arc;

use crate::domain::{
    GameEvent, GameNotifier, RepositoryError, Room, RoomId, RoomRepository, RoomStatus,
    RoomStatusError, TeamRepository, UserId,
};

use super::error::GameError;

pub struct ResetGameUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    notifier: Arc<dyn GameNotifier>,
}

impl ResetGameUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        notifier: Arc<dyn GameNotifier>,
    ) -> Self {
        Self {
            rooms,
            teams,
            notifier,
        }
    }

    /// 進行中または終了したゲームを Waiting に戻し、チームの得点とラウンドを 0 にする
    pub async fn execute(&self, user_id: UserId, room_id: RoomId) -> Result<Room, GameError> {
        let room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        if !room.status.can_transition_to(RoomStatus::Waiting) {
            return Err(RoomStatusError {
                from: room.status,
                to: RoomStatus::Waiting,
            }
            .into());
        }

        let room = self
            .rooms
            .transition_status(&room_id, room.status, RoomStatus::Waiting)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    GameError::Conflict(format!("room '{}' changed state concurrently", room_id))
                }
                other => other.into(),
            })?;
        self.teams.reset_teams(&room_id).await?;

        tracing::info!("Game in room '{}' was reset", room_id);
        self.notifier
            .notify_session(&room_id, &GameEvent::GameReset)
            .await;
        Ok(room)
    }
}
