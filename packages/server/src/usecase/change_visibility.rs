//! UseCase: ルームの公開範囲の変更

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository, UserId, Visibility};

use super::error::GameError;

pub struct ChangeVisibilityUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl ChangeVisibilityUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 公開範囲を変更する
    ///
    /// invite-only にするたびに招待コードを再発行し、open にすると招待コードは消える。
    pub async fn execute(
        &self,
        user_id: UserId,
        room_id: RoomId,
        is_open: bool,
    ) -> Result<Room, GameError> {
        let mut room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        room.visibility = Visibility::from_open_flag(is_open);
        self.rooms.update_room(room.clone()).await?;
        tracing::info!(
            "Room '{}' is now {}",
            room_id,
            if is_open { "open" } else { "invite-only" }
        );
        Ok(room)
    }
}
