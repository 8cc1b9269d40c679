//! エンティティ
//!
//! Room / Team / Participant と、ルームのライフサイクル（有限状態機械）。

use serde::{Deserialize, Serialize};

use super::{
    error::{RoomStatusError, ValueObjectError},
    value_object::{
        InviteCode, NumberOfRounds, ParticipantId, RoomId, RoomName, Score, TeamId, TeamName,
        Timestamp, UserId,
    },
};

/// ルームのライフサイクル
///
/// ```text
/// Waiting ──start──▶ InProgress ──end-game──▶ Finished
///    ▲                   │                       │
///    └──────reset────────┴────────reset──────────┘
/// Finished ──start──▶ InProgress
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Finished,
}

impl RoomStatus {
    pub fn can_transition_to(self, to: RoomStatus) -> bool {
        use RoomStatus::*;
        matches!(
            (self, to),
            (Waiting, InProgress)
                | (InProgress, Finished)
                | (InProgress, Waiting)
                | (Finished, Waiting)
                | (Finished, InProgress)
        )
    }
}

/// ルームの公開範囲
///
/// 招待コードは invite-only のときだけ存在する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Open,
    InviteOnly(InviteCode),
}

impl Visibility {
    /// 公開範囲を生成（invite-only なら新しい招待コードを発行）
    pub fn from_open_flag(is_open: bool) -> Self {
        if is_open {
            Self::Open
        } else {
            Self::InviteOnly(InviteCode::generate())
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn invite_code(&self) -> Option<&InviteCode> {
        match self {
            Self::Open => None,
            Self::InviteOnly(code) => Some(code),
        }
    }

    /// 指定の招待コードで参加できるか
    pub fn admits(&self, invite_code: Option<&str>) -> bool {
        match self {
            Self::Open => true,
            Self::InviteOnly(code) => invite_code == Some(code.as_str()),
        }
    }
}

/// ゲームルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub admin_id: UserId,
    pub name: RoomName,
    pub visibility: Visibility,
    pub status: RoomStatus,
    /// ゲーム開始時に設定される
    pub number_of_rounds: Option<NumberOfRounds>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(
        id: RoomId,
        admin_id: UserId,
        name: RoomName,
        visibility: Visibility,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            admin_id,
            name,
            visibility,
            status: RoomStatus::Waiting,
            number_of_rounds: None,
            created_at,
        }
    }

    pub fn is_admin(&self, user_id: &UserId) -> bool {
        &self.admin_id == user_id
    }

    /// ステータスを遷移させる（不正な遷移はエラー）
    pub fn transition_to(&mut self, to: RoomStatus) -> Result<(), RoomStatusError> {
        if !self.status.can_transition_to(to) {
            return Err(RoomStatusError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// チーム
///
/// `round` はメンバー個々のターン数の累計（ローテーション数ではない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub room_id: RoomId,
    pub name: TeamName,
    pub round: u64,
    pub total_points: i64,
    /// ゲーム開始時に確定したローテーション長（0 はローテーション外）
    pub rotation_length: u64,
}

impl Team {
    pub fn new(id: TeamId, room_id: RoomId, name: TeamName) -> Self {
        Self {
            id,
            room_id,
            name,
            round: 0,
            total_points: 0,
            rotation_length: 0,
        }
    }

    /// 得点を加算した後の合計（溢れる場合はエラー）
    pub fn checked_total(&self, score: Score) -> Result<i64, ValueObjectError> {
        self.total_points
            .checked_add(score.value())
            .ok_or(ValueObjectError::ScoreOverflow)
    }

    /// 得点を加算し、ターンを 1 進める（溢れる場合は何も変えない）
    pub fn apply_score(&mut self, score: Score) -> Result<(), ValueObjectError> {
        self.total_points = self.checked_total(score)?;
        self.round += 1;
        Ok(())
    }

    /// ラウンドと得点を 0 に戻し、ローテーション長を設定する
    pub fn start_rotation(&mut self, rotation_length: u64) {
        self.round = 0;
        self.total_points = 0;
        self.rotation_length = rotation_length;
    }

    pub fn reset(&mut self) {
        self.start_rotation(0);
    }
}

/// ルームへの参加記録
///
/// `joined_seq` はリポジトリが採番する参加順の連番で、ターン順の基準になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub team_id: Option<TeamId>,
    pub joined_seq: u64,
    pub joined_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_room() -> Room {
        Room::new(
            RoomId::generate(),
            UserId::generate(),
            RoomName::new("lobby".to_string()).unwrap(),
            Visibility::Open,
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_room_status_legal_transitions() {
        // テスト項目: 定義された遷移のみが許可される
        // given (前提条件):
        use RoomStatus::*;

        // then (期待する結果):
        assert!(Waiting.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Finished));
        assert!(Finished.can_transition_to(Waiting));
        assert!(Finished.can_transition_to(InProgress));
        assert!(!Waiting.can_transition_to(Finished));
        assert!(!InProgress.can_transition_to(InProgress));
        assert!(!Waiting.can_transition_to(Waiting));
    }

    #[test]
    fn test_room_transition_rejects_illegal_move() {
        // テスト項目: Waiting から Finished への遷移はエラーになり、状態は変わらない
        // given (前提条件):
        let mut room = create_test_room();

        // when (操作):
        let result = room.transition_to(RoomStatus::Finished);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomStatusError {
                from: RoomStatus::Waiting,
                to: RoomStatus::Finished
            })
        );
        assert_eq!(room.status, RoomStatus::Waiting);
    }

    #[test]
    fn test_invite_only_room_admits_matching_code_only() {
        // テスト項目: invite-only ルームは正しい招待コードでのみ参加できる
        // given (前提条件):
        let visibility = Visibility::InviteOnly(InviteCode::new("secret".to_string()));

        // then (期待する結果):
        assert!(visibility.admits(Some("secret")));
        assert!(!visibility.admits(Some("wrong")));
        assert!(!visibility.admits(None));
        assert!(Visibility::Open.admits(None));
    }

    #[test]
    fn test_team_apply_score_and_reset() {
        // テスト項目: 得点加算でラウンドが 1 進み、リセットで 0 に戻る
        // given (前提条件):
        let mut team = Team::new(
            TeamId::generate(),
            RoomId::generate(),
            TeamName::new("red".to_string()).unwrap(),
        );

        // when (操作):
        team.apply_score(Score::new(5)).unwrap();
        team.apply_score(Score::new(-2)).unwrap();

        // then (期待する結果):
        assert_eq!((team.round, team.total_points), (2, 3));
        team.reset();
        assert_eq!((team.round, team.total_points), (0, 0));
    }

    #[test]
    fn test_team_apply_score_rejects_overflow_without_change() {
        // テスト項目: 合計が i64 を溢れる加算は拒否され、状態は変わらない
        // given (前提条件):
        let mut team = Team::new(
            TeamId::generate(),
            RoomId::generate(),
            TeamName::new("red".to_string()).unwrap(),
        );
        team.apply_score(Score::new(i64::MAX)).unwrap();

        // when (操作):
        let result = team.apply_score(Score::new(1));

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ScoreOverflow));
        assert_eq!((team.round, team.total_points), (1, i64::MAX));
    }

    #[test]
    fn test_team_start_rotation_records_length() {
        // テスト項目: 開始時にローテーション長が記録され、リセットで 0 に戻る
        // given (前提条件):
        let mut team = Team::new(
            TeamId::generate(),
            RoomId::generate(),
            TeamName::new("red".to_string()).unwrap(),
        );
        team.apply_score(Score::new(3)).unwrap();

        // when (操作):
        team.start_rotation(3);

        // then (期待する結果):
        assert_eq!((team.round, team.total_points, team.rotation_length), (0, 0, 3));
        team.reset();
        assert_eq!(team.rotation_length, 0);
    }
}
