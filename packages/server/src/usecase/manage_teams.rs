//! UseCase: チームの作成・削除・所属変更
//!
//! ゲーム進行中（InProgress）はローテーションが変わってしまうため、いずれも受け付けない。

use std::sync::Arc;

use crate::domain::{
    Participant, ParticipantRepository, Room, RoomId, RoomRepository, RoomStatus, Team, TeamId,
    TeamName, TeamRepository, UserId,
};

use super::{error::GameError, team_lock::TeamLocks};

pub struct ManageTeamsUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    participants: Arc<dyn ParticipantRepository>,
    team_locks: Arc<TeamLocks>,
}

fn ensure_not_in_progress(room: &Room) -> Result<(), GameError> {
    if room.status == RoomStatus::InProgress {
        return Err(GameError::BadRequest(format!(
            "teams of room '{}' cannot change during a game",
            room.id
        )));
    }
    Ok(())
}

impl ManageTeamsUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        participants: Arc<dyn ParticipantRepository>,
        team_locks: Arc<TeamLocks>,
    ) -> Self {
        Self {
            rooms,
            teams,
            participants,
            team_locks,
        }
    }

    /// チームを作成する（管理者のみ）
    pub async fn create(
        &self,
        user_id: UserId,
        room_id: RoomId,
        name: String,
    ) -> Result<Team, GameError> {
        let name = TeamName::new(name)?;
        let room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        ensure_not_in_progress(&room)?;

        let team = Team::new(TeamId::generate(), room_id, name);
        self.teams.insert_team(team.clone()).await?;
        tracing::info!("Team '{}' created in room '{}'", team.id, room_id);
        Ok(team)
    }

    /// チームを削除する（管理者のみ、メンバーはチーム未所属に戻る）
    pub async fn delete(&self, user_id: UserId, team_id: TeamId) -> Result<(), GameError> {
        let team = self.teams.get_team(&team_id).await?;
        let room = self.rooms.get_room(&team.room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room.id));
        }
        ensure_not_in_progress(&room)?;

        self.teams.delete_team(&team_id).await?;
        self.team_locks.forget(&team_id).await;
        tracing::info!("Team '{}' deleted from room '{}'", team_id, room.id);
        Ok(())
    }

    /// 自分をチームに所属させる（同じルームの参加者のみ）
    pub async fn join(&self, user_id: UserId, team_id: TeamId) -> Result<Participant, GameError> {
        let team = self.teams.get_team(&team_id).await?;
        let room = self.rooms.get_room(&team.room_id).await?;
        ensure_not_in_progress(&room)?;

        let participant = self
            .participants
            .find_by_user(&user_id)
            .await?
            .filter(|p| p.room_id == team.room_id)
            .ok_or_else(|| {
                GameError::BadRequest(format!(
                    "user '{}' does not participate in room '{}'",
                    user_id, team.room_id
                ))
            })?;

        let participant = self
            .participants
            .assign_team(&participant.id, Some(team_id))
            .await?;
        tracing::info!("User '{}' joined team '{}'", user_id, team_id);
        Ok(participant)
    }
}
