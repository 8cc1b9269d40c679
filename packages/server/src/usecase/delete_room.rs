//! UseCase: ルーム削除
//!
//! 参加者とチームは連鎖的に削除され、セッションも破棄される。

use std::sync::Arc;

use crate::domain::{
    GameEvent, GameNotifier, RoomId, RoomRepository, RoomSessionStore, TeamRepository, UserId,
};

use super::{error::GameError, team_lock::TeamLocks};

pub struct DeleteRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    sessions: Arc<dyn RoomSessionStore>,
    notifier: Arc<dyn GameNotifier>,
    team_locks: Arc<TeamLocks>,
}

impl DeleteRoomUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        sessions: Arc<dyn RoomSessionStore>,
        notifier: Arc<dyn GameNotifier>,
        team_locks: Arc<TeamLocks>,
    ) -> Self {
        Self {
            rooms,
            teams,
            sessions,
            notifier,
            team_locks,
        }
    }

    pub async fn execute(&self, user_id: UserId, room_id: RoomId) -> Result<(), GameError> {
        let room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }

        let teams = self.teams.list_teams(&room_id).await?;
        self.rooms.delete_room(&room_id).await?;

        self.notifier
            .notify_session(&room_id, &GameEvent::RoomClosed)
            .await;
        self.sessions.remove_session(&room_id).await;
        for team in &teams {
            self.team_locks.forget(&team.id).await;
        }
        tracing::info!("Room '{}' deleted by '{}'", room_id, user_id);
        Ok(())
    }
}
