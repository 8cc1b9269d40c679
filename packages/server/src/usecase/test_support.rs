//! UseCase テスト用の共通フィクスチャ
//!
//! 実際のインメモリ実装を組み立て、接続ごとの受信チャンネルから通知を読み取れるようにする。

use std::sync::Arc;

use kotoba_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        MessagePusher, NumberOfRounds, Participant, ParticipantRepository, Room, RoomId, RoomName,
        RoomRepository, RoomStatus, RotationPolicy, Team, TeamId, TeamName, TeamRepository, Timestamp, UserId,
        Visibility, rotation::Rosters,
    },
    infrastructure::{
        dto::websocket::GameMessage,
        message_pusher::WebSocketMessagePusher,
        notifier::PushGameNotifier,
        repository::{
            InMemoryDatabase, InMemoryParticipantRepository, InMemoryRoomRepository,
            InMemoryTeamRepository,
        },
        session::InMemoryRoomSessionStore,
        word_provider::RandomWordProvider,
    },
};

use super::team_lock::TeamLocks;

pub const NOW: i64 = 1_700_000_000_000;

pub struct TestWorld {
    pub rooms: Arc<InMemoryRoomRepository>,
    pub teams: Arc<InMemoryTeamRepository>,
    pub participants: Arc<InMemoryParticipantRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub sessions: Arc<InMemoryRoomSessionStore>,
    pub notifier: Arc<PushGameNotifier>,
    pub words: Arc<RandomWordProvider>,
    pub team_locks: Arc<TeamLocks>,
    pub clock: Arc<FixedClock>,
}

impl TestWorld {
    pub fn new() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let sessions = Arc::new(InMemoryRoomSessionStore::new(pusher.clone()));
        Self {
            rooms: Arc::new(InMemoryRoomRepository::new(db.clone())),
            teams: Arc::new(InMemoryTeamRepository::new(db.clone())),
            participants: Arc::new(InMemoryParticipantRepository::new(db)),
            notifier: Arc::new(PushGameNotifier::new(pusher.clone(), sessions.clone())),
            pusher,
            sessions,
            words: Arc::new(RandomWordProvider::builtin()),
            team_locks: Arc::new(TeamLocks::new()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    /// 接続を登録したユーザーを作る
    pub async fn connect(&self) -> (UserId, mpsc::UnboundedReceiver<String>) {
        let user_id = UserId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(user_id, tx).await;
        (user_id, rx)
    }

    pub async fn create_room(&self, admin_id: UserId) -> Room {
        let room = Room::new(
            RoomId::generate(),
            admin_id,
            RoomName::new("lobby".to_string()).unwrap(),
            Visibility::Open,
            Timestamp::new(NOW),
        );
        self.rooms.insert_room(room.clone()).await.unwrap();
        room
    }

    pub async fn create_team(&self, room_id: RoomId, name: &str) -> Team {
        let team = Team::new(
            TeamId::generate(),
            room_id,
            TeamName::new(name.to_string()).unwrap(),
        );
        self.teams.insert_team(team.clone()).await.unwrap();
        team
    }

    pub async fn join(
        &self,
        room_id: RoomId,
        user_id: UserId,
        team_id: Option<TeamId>,
    ) -> Participant {
        let participant = self
            .participants
            .add_participant(room_id, user_id, Timestamp::new(NOW))
            .await
            .unwrap();
        self.participants
            .assign_team(&participant.id, team_id)
            .await
            .unwrap()
    }

    /// ルームを InProgress にし、現在のメンバー構成でローテーション長を確定する
    pub async fn start(&self, room_id: RoomId, number_of_rounds: u32) -> Room {
        let participants = self.participants.list_by_room(&room_id).await.unwrap();
        let teams = self.teams.list_teams(&room_id).await.unwrap();
        let lengths = Rosters::from_participants(&participants)
            .rotation_lengths(&teams, RotationPolicy::LargestTeam);
        self.teams.start_teams(&room_id, lengths).await.unwrap();

        let mut room = self.rooms.get_room(&room_id).await.unwrap();
        room.number_of_rounds = Some(NumberOfRounds::new(number_of_rounds).unwrap());
        room.transition_to(RoomStatus::InProgress).unwrap();
        self.rooms.update_room(room.clone()).await.unwrap();
        room
    }

    pub async fn team(&self, team_id: &TeamId) -> Team {
        self.teams.get_team(team_id).await.unwrap()
    }

    pub async fn room(&self, room_id: &RoomId) -> Room {
        self.rooms.get_room(room_id).await.unwrap()
    }
}

/// 受信済みの通知をすべて取り出す
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<GameMessage> {
    let mut messages = Vec::new();
    while let Ok(json) = rx.try_recv() {
        messages.push(serde_json::from_str(&json).unwrap());
    }
    messages
}
