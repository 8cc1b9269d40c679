//! InMemory Repository 実装
//!
//! 3 つの Repository は 1 つの `InMemoryDatabase` を共有します。テーブルは単一の
//! Mutex で守られるため、連鎖削除や条件付き更新はロック 1 回の中で完結します。
//!
//! テーブルは `Vec` で保持し、挿入順がそのまま一覧の順序（作成順・参加順）になります。

mod participant;
mod room;
mod team;

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{Participant, Room, Team};

pub use participant::InMemoryParticipantRepository;
pub use room::InMemoryRoomRepository;
pub use team::InMemoryTeamRepository;

#[derive(Debug, Default)]
struct Tables {
    rooms: Vec<Room>,
    teams: Vec<Team>,
    participants: Vec<Participant>,
    /// 次に採番する参加順の連番
    next_joined_seq: u64,
}

/// インメモリ DB
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().await
    }
}
