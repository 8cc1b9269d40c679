//! UseCase: ルーム一覧・詳細の取得

use std::sync::Arc;

use crate::domain::{
    Participant, ParticipantRepository, Room, RoomId, RoomRepository, Team, TeamRepository,
    UserId,
};

use super::error::GameError;

/// ルームの詳細（チームと参加順の参加者を含む）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: Room,
    pub teams: Vec<Team>,
    pub participants: Vec<Participant>,
}

pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    participants: Arc<dyn ParticipantRepository>,
}

impl GetRoomsUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        participants: Arc<dyn ParticipantRepository>,
    ) -> Self {
        Self {
            rooms,
            teams,
            participants,
        }
    }

    /// 全ルームを作成順に取得
    pub async fn list_all(&self) -> Result<Vec<Room>, GameError> {
        Ok(self.rooms.list_rooms().await?)
    }

    /// 自分が管理者のルームを取得
    pub async fn list_mine(&self, user_id: &UserId) -> Result<Vec<Room>, GameError> {
        Ok(self.rooms.list_rooms_by_admin(user_id).await?)
    }

    pub async fn detail(&self, room_id: &RoomId) -> Result<RoomDetail, GameError> {
        let room = self.rooms.get_room(room_id).await?;
        let teams = self.teams.list_teams(room_id).await?;
        let participants = self.participants.list_by_room(room_id).await?;
        Ok(RoomDetail {
            room,
            teams,
            participants,
        })
    }
}
