//! UseCase: ルームからの退出・参加者のキック

use std::sync::Arc;

use crate::domain::{
    Participant, ParticipantId, ParticipantRepository, RoomId, RoomRepository, RoomSessionStore,
    SessionError, UserId,
};

use super::error::GameError;

pub struct LeaveRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
    participants: Arc<dyn ParticipantRepository>,
    sessions: Arc<dyn RoomSessionStore>,
}

impl LeaveRoomUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        participants: Arc<dyn ParticipantRepository>,
        sessions: Arc<dyn RoomSessionStore>,
    ) -> Self {
        Self {
            rooms,
            participants,
            sessions,
        }
    }

    /// 自分の参加しているルームから抜ける
    pub async fn leave(&self, user_id: UserId) -> Result<Participant, GameError> {
        let participant = self
            .participants
            .find_by_user(&user_id)
            .await?
            .ok_or_else(|| {
                GameError::NotFound(format!("user '{}' does not participate in any room", user_id))
            })?;
        self.remove(&participant).await?;
        tracing::info!("User '{}' left room '{}'", user_id, participant.room_id);
        Ok(participant)
    }

    /// 管理者が参加者をルームから外す
    pub async fn kick(
        &self,
        user_id: UserId,
        room_id: RoomId,
        participant_id: ParticipantId,
    ) -> Result<Participant, GameError> {
        let room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        let participant = self.participants.get_participant(&participant_id).await?;
        if participant.room_id != room_id {
            return Err(GameError::NotFound(format!(
                "participant '{}' not found in room '{}'",
                participant_id, room_id
            )));
        }
        self.remove(&participant).await?;
        tracing::info!(
            "User '{}' was kicked from room '{}'",
            participant.user_id,
            room_id
        );
        Ok(participant)
    }

    async fn remove(&self, participant: &Participant) -> Result<(), GameError> {
        self.participants
            .remove_participant(&participant.id)
            .await?;
        match self
            .sessions
            .detach(&participant.room_id, &participant.user_id)
            .await
        {
            // セッションが無いのは正常
            Ok(()) | Err(SessionError::NotFound(_)) => {}
            Err(e) => tracing::debug!(
                "User '{}' not detached from '{}': {}",
                participant.user_id,
                participant.room_id,
                e
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::session::MockRoomSessionStore, usecase::test_support::TestWorld};

    fn create_usecase(world: &TestWorld) -> LeaveRoomUseCase {
        LeaveRoomUseCase::new(
            world.rooms.clone(),
            world.participants.clone(),
            world.sessions.clone(),
        )
    }

    #[tokio::test]
    async fn test_leave_removes_participant_and_detaches() {
        // テスト項目: 退出すると参加記録が消え、セッションから外れる
        // given (前提条件):
        let world = TestWorld::new();
        let (admin, _admin_rx) = world.connect().await;
        let (user, _user_rx) = world.connect().await;
        let room = world.create_room(admin).await;
        world.join(room.id, user, None).await;
        world.sessions.create_session(room.id, admin).await.unwrap();
        world.sessions.attach(&room.id, user).await.unwrap();
        let usecase = create_usecase(&world);

        // when (操作):
        let left = usecase.leave(user).await.unwrap();

        // then (期待する結果):
        assert_eq!(left.room_id, room.id);
        assert_eq!(world.participants.find_by_user(&user).await.unwrap(), None);
        assert_eq!(world.sessions.members(&room.id).await, Some(vec![admin]));
        assert!(matches!(usecase.leave(user).await, Err(GameError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_admin_kicks_participant() {
        // テスト項目: 管理者は参加者をキックでき、管理者以外はできない
        // given (前提条件):
        let world = TestWorld::new();
        let admin = UserId::generate();
        let room = world.create_room(admin).await;
        let victim = world.join(room.id, UserId::generate(), None).await;
        let bystander = world.join(room.id, UserId::generate(), None).await;
        let usecase = create_usecase(&world);

        // when (操作):
        let denied = usecase.kick(bystander.user_id, room.id, victim.id).await;
        let kicked = usecase.kick(admin, room.id, victim.id).await;

        // then (期待する結果):
        assert!(matches!(denied, Err(GameError::Forbidden(_))));
        assert_eq!(kicked.unwrap(), victim);
        assert_eq!(
            world.participants.list_by_room(&room.id).await.unwrap(),
            vec![bystander]
        );
    }

    #[tokio::test]
    async fn test_kick_participant_of_other_room_is_not_found() {
        // テスト項目: 別のルームの参加者はキックできない
        // given (前提条件):
        let world = TestWorld::new();
        let admin = UserId::generate();
        let room = world.create_room(admin).await;
        let other = world.create_room(UserId::generate()).await;
        let stranger = world.join(other.id, UserId::generate(), None).await;
        let usecase = create_usecase(&world);

        // when (操作):
        let result = usecase.kick(admin, room.id, stranger.id).await;

        // then (期待する結果):
        assert!(matches!(result, Err(GameError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_leave_succeeds_when_detach_fails() {
        // テスト項目: セッションからの切り離しに失敗しても退出自体は成功する
        // given (前提条件):
        let world = TestWorld::new();
        let room = world.create_room(UserId::generate()).await;
        let user = UserId::generate();
        world.join(room.id, user, None).await;
        let mut sessions = MockRoomSessionStore::new();
        sessions
            .expect_detach()
            .times(1)
            .returning(|_, user_id| Err(SessionError::NotConnected(user_id.to_string())));
        let usecase = LeaveRoomUseCase::new(
            world.rooms.clone(),
            world.participants.clone(),
            Arc::new(sessions),
        );

        // when (操作):
        let result = usecase.leave(user).await;

        // then (期待する結果):
        assert_eq!(result.map(|p| p.user_id), Ok(user));
        assert_eq!(world.participants.find_by_user(&user).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_leave_without_session_succeeds() {
        // テスト項目: セッションが存在しないルームからも退出できる
        // given (前提条件):
        let world = TestWorld::new();
        let room = world.create_room(UserId::generate()).await;
        let user = UserId::generate();
        world.join(room.id, user, None).await;
        let usecase = create_usecase(&world);

        // when (操作):
        let result = usecase.leave(user).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(world.participants.find_by_user(&user).await.unwrap(), None);
    }
}
