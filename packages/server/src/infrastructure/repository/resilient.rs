//! タイムアウトと 1 回リトライを付ける Repository デコレータ
//!
//! 各操作はタイムアウト付きで実行する。
//!
//! - 読み取りと上書き型の更新（`run`）は、一時的な失敗（`Unavailable`、タイムアウト）の
//!   場合に限り 1 回だけ再試行する。
//! - 冪等でない書き込み（`run_write`）は、ストアが明示的に `Unavailable` を返した場合のみ
//!   再試行する。タイムアウトは反映済みかどうか分からないため、再試行せず `Unavailable` を返す。
//!
//! 2 回目も失敗すればそのまま呼び出し元へ返す。

use std::{future::Future, time::Duration};

use async_trait::async_trait;

use crate::domain::{
    Participant, ParticipantId, ParticipantRepository, RepositoryError, Room, RoomId,
    RoomRepository, RoomStatus, Score, Team, TeamId, TeamRepository, Timestamp, UserId,
};

/// 永続化操作のタイムアウト既定値
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    timeout: Duration,
}

impl RetryPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `operation` をタイムアウト付きで実行し、一時的な失敗なら 1 回だけ再試行する
    pub async fn run<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, RepositoryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        match self.attempt(operation, &mut f).await {
            Err(e) if e.is_transient() => {
                tracing::warn!("{} failed ({}), retrying once", operation, e);
                self.attempt(operation, &mut f).await
            }
            other => other,
        }
    }

    /// 冪等でない書き込みを実行する
    ///
    /// ストアが `Unavailable` を返した場合のみ 1 回再試行し、タイムアウトは再試行しない。
    pub async fn run_write<T, F, Fut>(
        &self,
        operation: &str,
        mut f: F,
    ) -> Result<T, RepositoryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.timeout, f()).await {
            Ok(Err(e)) if e.is_transient() => {
                tracing::warn!("{} failed ({}), retrying once", operation, e);
                self.attempt(operation, &mut f).await
            }
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "{} timed out after {:?}, outcome unknown",
                    operation,
                    self.timeout
                );
                Err(self.timed_out(operation))
            }
        }
    }

    async fn attempt<T, F, Fut>(&self, operation: &str, f: &mut F) -> Result<T, RepositoryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        tokio::time::timeout(self.timeout, f())
            .await
            .unwrap_or_else(|_| Err(self.timed_out(operation)))
    }

    fn timed_out(&self, operation: &str) -> RepositoryError {
        RepositoryError::Unavailable(format!("{} timed out after {:?}", operation, self.timeout))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Repository を `RetryPolicy` で包む
pub struct ResilientRepository<R> {
    inner: R,
    policy: RetryPolicy,
}

impl<R> ResilientRepository<R> {
    pub fn new(inner: R, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<R: RoomRepository> RoomRepository for ResilientRepository<R> {
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError> {
        self.policy
            .run_write("insert_room", || self.inner.insert_room(room.clone()))
            .await
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        self.policy
            .run("get_room", || self.inner.get_room(room_id))
            .await
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        self.policy
            .run("list_rooms", || self.inner.list_rooms())
            .await
    }

    async fn list_rooms_by_admin(&self, admin_id: &UserId) -> Result<Vec<Room>, RepositoryError> {
        self.policy
            .run("list_rooms_by_admin", || {
                self.inner.list_rooms_by_admin(admin_id)
            })
            .await
    }

    async fn update_room(&self, room: Room) -> Result<(), RepositoryError> {
        self.policy
            .run("update_room", || self.inner.update_room(room.clone()))
            .await
    }

    async fn transition_status(
        &self,
        room_id: &RoomId,
        expected: RoomStatus,
        to: RoomStatus,
    ) -> Result<Room, RepositoryError> {
        self.policy
            .run_write("transition_status", || {
                self.inner.transition_status(room_id, expected, to)
            })
            .await
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.policy
            .run_write("delete_room", || self.inner.delete_room(room_id))
            .await
    }
}

#[async_trait]
impl<R: TeamRepository> TeamRepository for ResilientRepository<R> {
    async fn insert_team(&self, team: Team) -> Result<(), RepositoryError> {
        self.policy
            .run_write("insert_team", || self.inner.insert_team(team.clone()))
            .await
    }

    async fn get_team(&self, team_id: &TeamId) -> Result<Team, RepositoryError> {
        self.policy
            .run("get_team", || self.inner.get_team(team_id))
            .await
    }

    async fn list_teams(&self, room_id: &RoomId) -> Result<Vec<Team>, RepositoryError> {
        self.policy
            .run("list_teams", || self.inner.list_teams(room_id))
            .await
    }

    async fn apply_score_if_round(
        &self,
        team_id: &TeamId,
        expected_round: u64,
        score: Score,
    ) -> Result<Team, RepositoryError> {
        self.policy
            .run_write("apply_score_if_round", || {
                self.inner.apply_score_if_round(team_id, expected_round, score)
            })
            .await
    }

    async fn reset_teams(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.policy
            .run("reset_teams", || self.inner.reset_teams(room_id))
            .await
    }

    async fn start_teams(
        &self,
        room_id: &RoomId,
        rotation_lengths: Vec<(TeamId, u64)>,
    ) -> Result<(), RepositoryError> {
        self.policy
            .run("start_teams", || {
                self.inner.start_teams(room_id, rotation_lengths.clone())
            })
            .await
    }

    async fn delete_team(&self, team_id: &TeamId) -> Result<(), RepositoryError> {
        self.policy
            .run_write("delete_team", || self.inner.delete_team(team_id))
            .await
    }
}

#[async_trait]
impl<R: ParticipantRepository> ParticipantRepository for ResilientRepository<R> {
    async fn add_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
        joined_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        self.policy
            .run_write("add_participant", || {
                self.inner.add_participant(room_id, user_id, joined_at)
            })
            .await
    }

    async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, RepositoryError> {
        self.policy
            .run("get_participant", || {
                self.inner.get_participant(participant_id)
            })
            .await
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Participant>, RepositoryError> {
        self.policy
            .run("find_by_user", || self.inner.find_by_user(user_id))
            .await
    }

    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError> {
        self.policy
            .run("list_by_room", || self.inner.list_by_room(room_id))
            .await
    }

    async fn assign_team(
        &self,
        participant_id: &ParticipantId,
        team_id: Option<TeamId>,
    ) -> Result<Participant, RepositoryError> {
        self.policy
            .run("assign_team", || {
                self.inner.assign_team(participant_id, team_id)
            })
            .await
    }

    async fn remove_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<(), RepositoryError> {
        self.policy
            .run_write("remove_participant", || {
                self.inner.remove_participant(participant_id)
            })
            .await
    }
}
