//! ゲーム通知
//!
//! 通知の意味（イベント）だけを定義し、シリアライズと送信は Infrastructure 層の
//! `GameNotifier` 実装が受け持つ。

use async_trait::async_trait;

use super::{NumberOfRounds, RoomId, UserId};

/// 参加者へ送る通知イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// あなたの番。説明する単語の候補
    TurnAssigned { words: Vec<String> },
    /// チームメイトの番なので待機
    Wait,
    /// 自チームは全ラウンド終了。他チームの終了待ち
    WaitForResults,
    Win { total_points: i64 },
    Lose { total_points: i64 },
    GameStart { number_of_rounds: NumberOfRounds },
    /// 管理者がゲームをリセットした
    GameReset,
    /// ルームが削除された
    RoomClosed,
}

/// 通知の送信先と内容の組
pub type Dispatch = (GameEvent, Vec<UserId>);

/// 通知の配送
///
/// 送信先ごとに独立して送る。接続の無い送信先は黙って捨て、エラーにはしない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameNotifier: Send + Sync {
    /// 送信先それぞれにイベントを送り、届いた数を返す
    async fn notify(&self, event: &GameEvent, recipients: &[UserId]) -> usize;

    /// 複数の (イベント, 送信先) をまとめて送る
    async fn notify_batch(&self, batch: Vec<Dispatch>) -> usize;

    /// ルームセッションに接続中の全員へ送る
    async fn notify_session(&self, room_id: &RoomId, event: &GameEvent) -> usize;
}
