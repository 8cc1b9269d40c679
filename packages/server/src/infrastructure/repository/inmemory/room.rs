//! InMemory Room Repository 実装

use std::sync::Arc;

use async_trait::async_trait;

use super::InMemoryDatabase;
use crate::domain::{RepositoryError, Room, RoomId, RoomRepository, RoomStatus, UserId};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    db: Arc<InMemoryDatabase>,
}

impl InMemoryRoomRepository {
    pub fn new(db: Arc<InMemoryDatabase>) -> Self {
        Self { db }
    }
}

fn room_not_found(room_id: &RoomId) -> RepositoryError {
    RepositoryError::RoomNotFound(room_id.to_string())
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        if tables.rooms.iter().any(|r| r.id == room.id) {
            return Err(RepositoryError::Conflict(format!(
                "room '{}' already exists",
                room.id
            )));
        }
        tables.rooms.push(room);
        Ok(())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let tables = self.db.lock().await;
        tables
            .rooms
            .iter()
            .find(|r| &r.id == room_id)
            .cloned()
            .ok_or_else(|| room_not_found(room_id))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let tables = self.db.lock().await;
        Ok(tables.rooms.clone())
    }

    async fn list_rooms_by_admin(&self, admin_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        let tables = self.db.lock().await;
        Ok(tables
            .rooms
            .iter()
            .filter(|r| &r.admin_id == admin_id)
            .cloned()
            .collect())
    }

    async fn update_room(&self, room: Room) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        let slot = tables
            .rooms
            .iter_mut()
            .find(|r| r.id == room.id)
            .ok_or_else(|| room_not_found(&room.id))?;
        *slot = room;
        Ok(())
    }

    async fn transition_status(
        &self,
        room_id: &RoomId,
        expected: RoomStatus,
        to: RoomStatus,
    ) -> Result<Room, RepositoryError> {
        let mut tables = self.db.lock().await;
        let room = tables
            .rooms
            .iter_mut()
            .find(|r| &r.id == room_id)
            .ok_or_else(|| room_not_found(room_id))?;

        if room.status != expected {
            return Err(RepositoryError::Conflict(format!(
                "room '{}' is {:?}, expected {:?}",
                room_id, room.status, expected
            )));
        }
        room.transition_to(to)
            .map_err(|e| RepositoryError::Conflict(e.to_string()))?;
        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        let before = tables.rooms.len();
        tables.rooms.retain(|r| &r.id != room_id);
        if tables.rooms.len() == before {
            return Err(room_not_found(room_id));
        }
        tables.teams.retain(|t| &t.room_id != room_id);
        tables.participants.retain(|p| &p.room_id != room_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ParticipantRepository, RoomName, Team, TeamId, TeamName, TeamRepository, Timestamp,
            Visibility,
        },
        infrastructure::repository::{InMemoryParticipantRepository, InMemoryTeamRepository},
    };

    fn create_test_room(admin_id: UserId) -> Room {
        Room::new(
            RoomId::generate(),
            admin_id,
            RoomName::new("lobby".to_string()).unwrap(),
            Visibility::Open,
            Timestamp::new(1000),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get_room() {
        // テスト項目: 保存した Room を取得できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(Arc::new(InMemoryDatabase::new()));
        let room = create_test_room(UserId::generate());

        // when (操作):
        repo.insert_room(room.clone()).await.unwrap();
        let result = repo.get_room(&room.id).await;

        // then (期待する結果):
        assert_eq!(result, Ok(room));
    }

    #[tokio::test]
    async fn test_get_missing_room_is_not_found() {
        // テスト項目: 存在しない Room の取得は RoomNotFound になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(Arc::new(InMemoryDatabase::new()));
        let room_id = RoomId::generate();

        // when (操作):
        let result = repo.get_room(&room_id).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomNotFound(room_id.to_string())));
    }

    #[tokio::test]
    async fn test_list_rooms_by_admin() {
        // テスト項目: 管理者で Room を絞り込める
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(Arc::new(InMemoryDatabase::new()));
        let alice = UserId::generate();
        let mine = create_test_room(alice);
        repo.insert_room(mine.clone()).await.unwrap();
        repo.insert_room(create_test_room(UserId::generate()))
            .await
            .unwrap();

        // when (操作):
        let rooms = repo.list_rooms_by_admin(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(rooms, vec![mine]);
        assert_eq!(repo.list_rooms().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_transition_status_is_conditional() {
        // テスト項目: 期待するステータスと一致しない場合、遷移は Conflict になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new(Arc::new(InMemoryDatabase::new()));
        let room = create_test_room(UserId::generate());
        repo.insert_room(room.clone()).await.unwrap();

        // when (操作):
        let started = repo
            .transition_status(&room.id, RoomStatus::Waiting, RoomStatus::InProgress)
            .await;
        let again = repo
            .transition_status(&room.id, RoomStatus::Waiting, RoomStatus::InProgress)
            .await;

        // then (期待する結果):
        assert_eq!(started.unwrap().status, RoomStatus::InProgress);
        assert!(matches!(again, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_room_cascades() {
        // テスト項目: Room を削除すると参加者とチームも削除される
        // given (前提条件):
        let db = Arc::new(InMemoryDatabase::new());
        let rooms = InMemoryRoomRepository::new(db.clone());
        let teams = InMemoryTeamRepository::new(db.clone());
        let participants = InMemoryParticipantRepository::new(db.clone());
        let room = create_test_room(UserId::generate());
        rooms.insert_room(room.clone()).await.unwrap();
        teams
            .insert_team(Team::new(
                TeamId::generate(),
                room.id,
                TeamName::new("red".to_string()).unwrap(),
            ))
            .await
            .unwrap();
        let bob = UserId::generate();
        participants
            .add_participant(room.id, bob, Timestamp::new(2000))
            .await
            .unwrap();

        // when (操作):
        rooms.delete_room(&room.id).await.unwrap();

        // then (期待する結果):
        assert!(teams.list_teams(&room.id).await.unwrap().is_empty());
        assert_eq!(participants.find_by_user(&bob).await.unwrap(), None);
        assert!(matches!(
            rooms.delete_room(&room.id).await,
            Err(RepositoryError::RoomNotFound(_))
        ));
    }
}
