//! UseCase: ルームへの参加
//!
//! ユーザーが参加できるルームは同時に 1 つだけ。参加記録の作成後、接続中であれば
//! ルームのセッションに attach する（失敗しても参加自体は成功する）。

use std::sync::Arc;

use kotoba_shared::time::Clock;

use crate::domain::{
    Participant, ParticipantRepository, Room, RoomId, RoomRepository, RoomSessionStore,
    SessionError, Timestamp, UserId,
};

use super::error::GameError;

pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    participants: Arc<dyn ParticipantRepository>,
    sessions: Arc<dyn RoomSessionStore>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        participants: Arc<dyn ParticipantRepository>,
        sessions: Arc<dyn RoomSessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            participants,
            sessions,
            clock,
        }
    }

    /// ルームに参加する
    ///
    /// # Arguments
    ///
    /// * `user_id` - 参加するユーザー
    /// * `room_id` - 参加先
    /// * `invite_code` - invite-only ルームの招待コード
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 作成された参加記録（チーム未所属）
    /// * `Err(GameError)` - ルームが無い（NotFound）、招待コード不一致・参加済み（BadRequest）
    pub async fn execute(
        &self,
        user_id: UserId,
        room_id: RoomId,
        invite_code: Option<&str>,
    ) -> Result<Participant, GameError> {
        let room = self.rooms.get_room(&room_id).await?;
        if !room.visibility.admits(invite_code) {
            return Err(GameError::BadRequest(format!(
                "invalid invite code for room '{}'",
                room_id
            )));
        }

        let participant = self
            .participants
            .add_participant(room_id, user_id, Timestamp::new(self.clock.now_millis()))
            .await?;
        tracing::info!("User '{}' joined room '{}'", user_id, room_id);

        self.attach(&room, user_id).await;
        Ok(participant)
    }

    async fn attach(&self, room: &Room, user_id: UserId) {
        let result = match self.sessions.attach(&room.id, user_id).await {
            Err(SessionError::NotFound(_)) => {
                match self.sessions.create_session(room.id, room.admin_id).await {
                    Ok(()) => self.sessions.attach(&room.id, user_id).await,
                    Err(e) => Err(e),
                }
            }
            other => other,
        };
        if let Err(e) = result {
            tracing::debug!("User '{}' not attached to '{}': {}", user_id, room.id, e);
        }
    }
}
