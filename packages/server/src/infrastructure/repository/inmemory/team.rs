//! InMemory Team Repository 実装

use std::sync::Arc;

use async_trait::async_trait;

use super::InMemoryDatabase;
use crate::domain::{RepositoryError, RoomId, Score, Team, TeamId, TeamRepository};

/// インメモリ Team Repository 実装
pub struct InMemoryTeamRepository {
    db: Arc<InMemoryDatabase>,
}

impl InMemoryTeamRepository {
    pub fn new(db: Arc<InMemoryDatabase>) -> Self {
        Self { db }
    }
}

fn team_not_found(team_id: &TeamId) -> RepositoryError {
    RepositoryError::TeamNotFound(team_id.to_string())
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn insert_team(&self, team: Team) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        if !tables.rooms.iter().any(|r| r.id == team.room_id) {
            return Err(RepositoryError::RoomNotFound(team.room_id.to_string()));
        }
        tables.teams.push(team);
        Ok(())
    }

    async fn get_team(&self, team_id: &TeamId) -> Result<Team, RepositoryError> {
        let tables = self.db.lock().await;
        tables
            .teams
            .iter()
            .find(|t| &t.id == team_id)
            .cloned()
            .ok_or_else(|| team_not_found(team_id))
    }

    async fn list_teams(&self, room_id: &RoomId) -> Result<Vec<Team>, RepositoryError> {
        let tables = self.db.lock().await;
        Ok(tables
            .teams
            .iter()
            .filter(|t| &t.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn apply_score_if_round(
        &self,
        team_id: &TeamId,
        expected_round: u64,
        score: Score,
    ) -> Result<Team, RepositoryError> {
        let mut tables = self.db.lock().await;
        let team = tables
            .teams
            .iter_mut()
            .find(|t| &t.id == team_id)
            .ok_or_else(|| team_not_found(team_id))?;

        if team.round != expected_round {
            return Err(RepositoryError::Conflict(format!(
                "team '{}' is at round {}, expected {}",
                team_id, team.round, expected_round
            )));
        }
        team.apply_score(score)
            .map_err(|e| RepositoryError::Rejected(format!("team '{}': {}", team_id, e)))?;
        Ok(team.clone())
    }

    async fn reset_teams(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        tables
            .teams
            .iter_mut()
            .filter(|t| &t.room_id == room_id)
            .for_each(Team::reset);
        Ok(())
    }

    async fn start_teams(
        &self,
        room_id: &RoomId,
        rotation_lengths: Vec<(TeamId, u64)>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        for team in tables.teams.iter_mut().filter(|t| &t.room_id == room_id) {
            let length = rotation_lengths
                .iter()
                .find(|(team_id, _)| *team_id == team.id)
                .map_or(0, |(_, length)| *length);
            team.start_rotation(length);
        }
        Ok(())
    }

    async fn delete_team(&self, team_id: &TeamId) -> Result<(), RepositoryError> {
        let mut tables = self.db.lock().await;
        let before = tables.teams.len();
        tables.teams.retain(|t| &t.id != team_id);
        if tables.teams.len() == before {
            return Err(team_not_found(team_id));
        }
        tables
            .participants
            .iter_mut()
            .filter(|p| p.team_id.as_ref() == Some(team_id))
            .for_each(|p| p.team_id = None);
        Ok(())
    }
}
