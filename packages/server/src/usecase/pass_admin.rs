//! UseCase: 管理者権限の委譲

use std::sync::Arc;

use crate::domain::{ParticipantRepository, Room, RoomId, RoomRepository, UserId};

use super::error::GameError;

pub struct PassAdminUseCase {
    rooms: Arc<dyn RoomRepository>,
    participants: Arc<dyn ParticipantRepository>,
}

impl PassAdminUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        participants: Arc<dyn ParticipantRepository>,
    ) -> Self {
        Self {
            rooms,
            participants,
        }
    }

    /// 管理者をルームの参加者 `new_admin` に変更する
    pub async fn execute(
        &self,
        user_id: UserId,
        room_id: RoomId,
        new_admin: UserId,
    ) -> Result<Room, GameError> {
        let mut room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        let participates = self
            .participants
            .find_by_user(&new_admin)
            .await?
            .is_some_and(|p| p.room_id == room_id);
        if !participates {
            return Err(GameError::BadRequest(format!(
                "user '{}' does not participate in room '{}'",
                new_admin, room_id
            )));
        }

        room.admin_id = new_admin;
        self.rooms.update_room(room.clone()).await?;
        tracing::info!("Admin of room '{}' passed to '{}'", room_id, new_admin);
        Ok(room)
    }
}
