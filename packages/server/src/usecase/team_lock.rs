//! チーム単位の排他制御
//!
//! チームの `round` / `total_points` の read-modify-write はチームごとに直列化する。
//! 異なるチーム同士は独立に進む。

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::TeamId;

#[derive(Debug, Default)]
pub struct TeamLocks {
    locks: Mutex<HashMap<TeamId, Arc<Mutex<()>>>>,
}

impl TeamLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// チームのロックを取得（ガードを drop するまで保持）
    pub async fn acquire(&self, team_id: TeamId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(team_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// 削除されたチームのロックを捨てる
    pub async fn forget(&self, team_id: &TeamId) {
        self.locks.lock().await.remove(team_id);
    }
}
