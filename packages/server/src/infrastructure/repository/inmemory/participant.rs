//! InMemory Participant Repository 実装

use std::sync::Arc;

use async_trait::async_trait;

use super::InMemoryDatabase;
use crate::domain::{
    Participant, ParticipantId, ParticipantRepository, RepositoryError, RoomId, TeamId,
    Timestamp, UserId,
};

/// インメモリ Participant Repository 実装
///
/// 参加者は参加順に保持され、`joined_seq` は DB 全体で単調増加する。
pub struct InMemoryParticipantRepository {
    db: Arc<InMemoryDatabase>,
}

impl InMemoryParticipantRepository {
    pub fn new(db: Arc<InMemoryDatabase>) -> Self {
        Self { db }
    }
}

fn participant_not_found(participant_id: &ParticipantId) -> RepositoryError {
    RepositoryError::ParticipantNotFound(participant_id.to_string())
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn add_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
        joined_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let mut tables = self.db.lock().await;
        if !tables.rooms.iter().any(|r| r.id == room_id) {
            return Err(RepositoryError::RoomNotFound(room_id.to_string()));
        }
        if tables.participants.iter().any(|p| p.user_id == user_id) {
            return Err(RepositoryError::AlreadyParticipating(user_id.to_string()));
        }

        tables.next_joined_seq += 1;
        let participant = Participant {
            id: ParticipantId::generate(),
            room_id,
            user_id,
            team_id: None,
            joined_seq: tables.next_joined_seq,
            joined_at,
        };
        tables.participants.push(participant.clone());
        Ok(participant)
    }

    async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, RepositoryError> {
        let tables = self.db.lock().await;
        tables
            .participants
            .iter()
            .find(|p| &p.id == participant_id)
            .cloned()
            .ok_or_else(|| participant_not_found(participant_id))
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Participant>, RepositoryError> {
        let tables = self.db.lock().await;
        Ok(tables
            .participants
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError> {
        let tables = self.db.lock().await;
        Ok(tables
            .participants
            .iter()
            .filter(|p| &p.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn assign_team(
        &self,
        participant_id: &ParticipantId,
        team_id: Option<TeamId>,
    ) -> Result<Participant, RepositoryError> {
        let mut tables = self.db.lock().await;
        if let Some(team_id) = team_id {
            if !tables.teams.iter().any(|t| t.id == team_id) {
                return Err(RepositoryError::TeamNotFound(team_id.to_string()));
            }
        }
        let participant = tables
            .participants
            .iter_mut()
            .find(|p| &p.id == participant_id)
            .ok_or_else(|| participant_not_found(participant_id))?;
        participant.team_id = team_id;
        Ok(participant.clone())
    }

    async fn remove_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        let before = tables.participants.len();
        tables.participants.retain(|p| &p.id != participant_id);
        if tables.participants.len() == before {
            return Err(participant_not_found(participant_id));
        }
        Ok(())
    }
}
