//! Repository trait 定義
//!
//! ドメイン層が必要とする永続化のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 実装が守るべき契約
//!
//! - 参加者の一覧は常に `joined_seq`（参加順）の昇順で返す。ターン順はこの順序で決まる。
//! - チームの一覧は作成順で返す。
//! - `apply_score_if_round` はチームの現在ラウンドが期待値と一致する場合のみ更新する
//!   条件付き更新で、不一致なら `RepositoryError::Conflict` を返す。合計得点が溢れる
//!   場合は何も変えずに `RepositoryError::Rejected` を返す。
//! - `delete_room` は参加者とチームを、`delete_team` はメンバーのチーム割当を連鎖的に消す。

use async_trait::async_trait;

use super::{
    Participant, ParticipantId, RepositoryError, Room, RoomId, RoomStatus, Score, Team, TeamId,
    Timestamp, UserId,
};

/// Room Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を保存
    async fn insert_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// Room を取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 全ての Room を作成順に取得
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    /// 指定ユーザーが管理者の Room を取得
    async fn list_rooms_by_admin(&self, admin_id: &UserId) -> Result<Vec<Room>, RepositoryError>;

    /// Room を上書き保存
    async fn update_room(&self, room: Room) -> Result<(), RepositoryError>;

    /// 現在のステータスが `expected` の場合のみ `to` に遷移させる
    async fn transition_status(
        &self,
        room_id: &RoomId,
        expected: RoomStatus,
        to: RoomStatus,
    ) -> Result<Room, RepositoryError>;

    /// Room を削除（参加者・チームも削除される）
    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError>;
}

/// Team Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn insert_team(&self, team: Team) -> Result<(), RepositoryError>;

    async fn get_team(&self, team_id: &TeamId) -> Result<Team, RepositoryError>;

    /// Room のチームを作成順に取得
    async fn list_teams(&self, room_id: &RoomId) -> Result<Vec<Team>, RepositoryError>;

    /// ラウンドが `expected_round` のときだけ得点を加算しラウンドを進める
    async fn apply_score_if_round(
        &self,
        team_id: &TeamId,
        expected_round: u64,
        score: Score,
    ) -> Result<Team, RepositoryError>;

    /// Room の全チームを `round = 0, total_points = 0, rotation_length = 0` に戻す
    async fn reset_teams(&self, room_id: &RoomId) -> Result<(), RepositoryError>;

    /// Room の全チームを 0 に戻し、ゲーム開始時のローテーション長を記録する
    ///
    /// `rotation_lengths` に含まれないチームは 0（ローテーション外）になる。
    async fn start_teams(
        &self,
        room_id: &RoomId,
        rotation_lengths: Vec<(TeamId, u64)>,
    ) -> Result<(), RepositoryError>;

    /// チームを削除（メンバーのチーム割当も外れる）
    async fn delete_team(&self, team_id: &TeamId) -> Result<(), RepositoryError>;
}

/// Participant Repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 参加者を追加（参加順の連番を採番する）
    ///
    /// ユーザーが既にいずれかのルームに参加している場合は `AlreadyParticipating`。
    async fn add_participant(
        &self,
        room_id: RoomId,
        user_id: UserId,
        joined_at: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, RepositoryError>;

    /// ユーザーの参加記録を取得（ユーザーあたり高々 1 件）
    async fn find_by_user(&self, user_id: &UserId)
    -> Result<Option<Participant>, RepositoryError>;

    /// Room の参加者を参加順に取得
    async fn list_by_room(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError>;

    /// チーム割当を変更
    async fn assign_team(
        &self,
        participant_id: &ParticipantId,
        team_id: Option<TeamId>,
    ) -> Result<Participant, RepositoryError>;

    /// 参加者を削除
    async fn remove_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<(), RepositoryError>;
}
