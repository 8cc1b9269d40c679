//! UseCase: ルーム作成

use std::sync::Arc;

use kotoba_shared::time::Clock;

use crate::domain::{
    Room, RoomId, RoomName, RoomRepository, RoomSessionStore, Timestamp, UserId, Visibility,
};

use super::error::GameError;

pub struct CreateRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    sessions: Arc<dyn RoomSessionStore>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        sessions: Arc<dyn RoomSessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            sessions,
            clock,
        }
    }

    /// ルームを作成する
    ///
    /// invite-only のルームには招待コードが発行される。作成者が接続中であれば
    /// そのままルームのセッションも作る（接続していなければ接続時に作られる）。
    ///
    /// # Arguments
    ///
    /// * `admin_id` - 作成者（管理者になる）
    /// * `name` - ルーム名
    /// * `is_open` - 誰でも参加できるか
    pub async fn execute(
        &self,
        admin_id: UserId,
        name: String,
        is_open: bool,
    ) -> Result<Room, GameError> {
        let name = RoomName::new(name)?;
        let room = Room::new(
            RoomId::generate(),
            admin_id,
            name,
            Visibility::from_open_flag(is_open),
            Timestamp::new(self.clock.now_millis()),
        );
        self.rooms.insert_room(room.clone()).await?;
        tracing::info!("Room '{}' created by '{}'", room.id, admin_id);

        if let Err(e) = self.sessions.create_session(room.id, admin_id).await {
            tracing::debug!("Session for room '{}' deferred: {}", room.id, e);
        }
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{NOW, TestWorld};

    fn create_usecase(world: &TestWorld) -> CreateRoomUseCase {
        CreateRoomUseCase::new(
            world.rooms.clone(),
            world.sessions.clone(),
            world.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_create_invite_only_room_with_connected_admin() {
        // テスト項目: invite-only ルームは招待コード付きで作成され、接続中の管理者のセッションができる
        // given (前提条件):
        let world = TestWorld::new();
        let (admin, _rx) = world.connect().await;
        let usecase = create_usecase(&world);

        // when (操作):
        let room = usecase
            .execute(admin, "friday night".to_string(), false)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(room.visibility.invite_code().is_some());
        assert_eq!(room.created_at, Timestamp::new(NOW));
        assert_eq!(world.room(&room.id).await, room);
        assert_eq!(world.sessions.members(&room.id).await, Some(vec![admin]));
    }

    #[tokio::test]
    async fn test_create_room_without_connection_defers_session() {
        // テスト項目: 管理者が未接続でもルームは作成され、セッションは作られない
        // given (前提条件):
        let world = TestWorld::new();
        let usecase = create_usecase(&world);

        // when (操作):
        let room = usecase
            .execute(UserId::generate(), "lobby".to_string(), true)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(room.visibility.is_open());
        assert_eq!(world.sessions.members(&room.id).await, None);
    }

    #[tokio::test]
    async fn test_create_room_rejects_blank_name() {
        // テスト項目: 空のルーム名は BadRequest
        // given (前提条件):
        let world = TestWorld::new();
        let usecase = create_usecase(&world);

        // when (操作):
        let result = usecase
            .execute(UserId::generate(), "  ".to_string(), true)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(GameError::BadRequest(_))));
    }
}
