//! UseCase: ターン進行
//!
//! チームメンバーからの advance 要求を受け、得点を加算してラウンドを進め、
//! 次の話者の決定・チーム完了・ゲーム終了のいずれかを通知する。
//!
//! ## 排他制御
//!
//! チームの `round` / `total_points` の読み出しから書き込みまでをチーム単位のロックで直列化し、
//! さらに Repository の条件付き更新（期待するラウンド値の一致）で保護する。
//! 条件付き更新が競合した場合は 1 回だけ読み直して再試行し、それでも競合すれば
//! `GameError::Unavailable` を返す。
//!
//! ゲーム終了はルームの `InProgress → Finished` 遷移を取れた呼び出しだけが通知する。
//!
//! ## ローテーション長
//!
//! 各チームのローテーション長はゲーム開始時に確定した `Team::rotation_length` を使う。
//! 途中でメンバーが抜けても長さは変わらず、話者は残ったメンバーの中で巡回する。
//! 完了済みチームの advance は、その時点で全チームが終了扱いならゲームを終了させる。

use std::sync::Arc;

use crate::domain::{
    GameEvent, GameNotifier, NumberOfRounds, ParticipantRepository, RepositoryError, RoomId,
    RoomRepository, RoomStatus, ScoreDelta, Team, TeamId, TeamRepository, UserId, WordProvider,
    rotation::{self, Rosters, Standings, TurnDecision},
};

use super::{error::GameError, settings::GameSettings, team_lock::TeamLocks};

/// advance の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// 次の話者が決まった（`team` は更新後の状態）
    TurnAssigned { speaker: UserId, team: Team },
    /// 自チームは全ラウンド終了、他チームの終了待ち
    WaitingForOtherTeams { team: Team },
    /// 全チームが終了しゲームが終わった
    GameOver { standings: Standings, teams: Vec<Team> },
}

/// 得点反映の結果
enum AppliedDelta {
    /// ラウンドが 1 進んだ
    Scored(Team),
    /// 得点なし（状態は変わっていない）
    Unchanged(Team),
    /// チームは既に全ラウンドを終えている
    TeamAlreadyDone,
}

/// ターン進行のユースケース
pub struct AdvanceRoundUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    participants: Arc<dyn ParticipantRepository>,
    word_provider: Arc<dyn WordProvider>,
    notifier: Arc<dyn GameNotifier>,
    team_locks: Arc<TeamLocks>,
    settings: GameSettings,
}

impl AdvanceRoundUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        participants: Arc<dyn ParticipantRepository>,
        word_provider: Arc<dyn WordProvider>,
        notifier: Arc<dyn GameNotifier>,
        team_locks: Arc<TeamLocks>,
        settings: GameSettings,
    ) -> Self {
        Self {
            rooms,
            teams,
            participants,
            word_provider,
            notifier,
            team_locks,
            settings,
        }
    }

    /// ターンを進める
    ///
    /// # Arguments
    ///
    /// * `user_id` - 要求したユーザー（ルームの参加者でチームに所属している必要がある）
    /// * `room_id` - 対象のルーム
    /// * `delta` - 終わったターンの得点。`ScoreDelta::NoScore` なら状態を変えずに現在の話者を再通知する
    ///
    /// # Returns
    ///
    /// * `Ok(AdvanceOutcome)` - 進行結果（通知は送信済み）
    /// * `Err(GameError)` - 失敗（状態は変更されていない）
    pub async fn execute(
        &self,
        user_id: UserId,
        room_id: RoomId,
        delta: ScoreDelta,
    ) -> Result<AdvanceOutcome, GameError> {
        let room = self.rooms.get_room(&room_id).await?;
        if room.status != RoomStatus::InProgress {
            return Err(GameError::BadRequest(format!(
                "room '{}' is not in progress",
                room_id
            )));
        }
        let number_of_rounds = room.number_of_rounds.ok_or_else(|| {
            GameError::BadRequest(format!("room '{}' has no round target", room_id))
        })?;

        let participant = self
            .participants
            .find_by_user(&user_id)
            .await?
            .filter(|p| p.room_id == room_id)
            .ok_or_else(|| {
                GameError::BadRequest(format!(
                    "user '{}' does not participate in room '{}'",
                    user_id, room_id
                ))
            })?;
        let team_id = participant.team_id.ok_or_else(|| {
            GameError::BadRequest(format!("user '{}' has no team", user_id))
        })?;

        let _guard = self.team_locks.acquire(team_id).await;

        let participants = self.participants.list_by_room(&room_id).await?;
        let rosters = Rosters::from_participants(&participants);

        let (team, score_applied) = match self
            .apply_delta(&room_id, &team_id, number_of_rounds, delta)
            .await?
        {
            AppliedDelta::Scored(team) => (team, true),
            AppliedDelta::Unchanged(team) => (team, false),
            AppliedDelta::TeamAlreadyDone => {
                // 残りのチームが抜けて終了条件を満たしていれば、ここでゲームを締める
                let teams = self.teams.list_teams(&room_id).await?;
                if rotation::all_teams_done(&teams, &rosters, number_of_rounds) {
                    return self.finish_game(&room_id, &rosters, teams).await;
                }
                return Err(GameError::BadRequest(format!(
                    "team '{}' already finished all rounds",
                    team_id
                )));
            }
        };
        let modulus = team.rotation_length;
        let members = rosters.members(&team_id);

        let decision =
            rotation::decide_turn(&team, members, modulus, number_of_rounds, score_applied)
                .ok_or_else(|| {
                    GameError::BadRequest(format!("team '{}' has no members", team_id))
                })?;

        match decision {
            TurnDecision::NextSpeaker { speaker, waiting } => {
                let words = self
                    .word_provider
                    .random_words(self.settings.words_per_turn)
                    .await;
                tracing::info!(
                    "Team '{}' round {}: next speaker is '{}'",
                    team_id,
                    team.round,
                    speaker
                );
                self.notifier
                    .notify_batch(vec![
                        (GameEvent::TurnAssigned { words }, vec![speaker]),
                        (GameEvent::Wait, waiting),
                    ])
                    .await;
                Ok(AdvanceOutcome::TurnAssigned { speaker, team })
            }
            TurnDecision::TeamDone => {
                // 他チームの判定はコミット後の最新状態で行う
                let teams = self.teams.list_teams(&room_id).await?;
                if !rotation::all_teams_done(&teams, &rosters, number_of_rounds) {
                    tracing::info!("Team '{}' finished, waiting for other teams", team_id);
                    self.notifier
                        .notify(&GameEvent::WaitForResults, members)
                        .await;
                    return Ok(AdvanceOutcome::WaitingForOtherTeams { team });
                }
                self.finish_game(&room_id, &rosters, teams).await
            }
        }
    }

    /// 得点を反映する（競合時は 1 回だけ読み直して再試行）
    ///
    /// 合計得点が溢れる場合は書き込む前に `BadRequest` を返す。
    async fn apply_delta(
        &self,
        room_id: &RoomId,
        team_id: &TeamId,
        number_of_rounds: NumberOfRounds,
        delta: ScoreDelta,
    ) -> Result<AppliedDelta, GameError> {
        let mut retried = false;
        loop {
            let team = self.teams.get_team(team_id).await?;
            if &team.room_id != room_id {
                return Err(GameError::NotFound(format!(
                    "team '{}' not found in room '{}'",
                    team_id, room_id
                )));
            }
            if team.rotation_length == 0 {
                return Err(GameError::BadRequest(format!(
                    "team '{}' is not part of this game",
                    team_id
                )));
            }
            if rotation::is_team_done(team.round, team.rotation_length, number_of_rounds) {
                return Ok(AppliedDelta::TeamAlreadyDone);
            }

            let score = match delta {
                ScoreDelta::NoScore => return Ok(AppliedDelta::Unchanged(team)),
                ScoreDelta::Points(score) => score,
            };
            team.checked_total(score)?;

            match self
                .teams
                .apply_score_if_round(team_id, team.round, score)
                .await
            {
                Ok(updated) => return Ok(AppliedDelta::Scored(updated)),
                Err(RepositoryError::Conflict(reason)) if !retried => {
                    tracing::warn!("Retrying advance for team '{}': {}", team_id, reason);
                    retried = true;
                }
                Err(RepositoryError::Conflict(reason)) => {
                    return Err(GameError::Unavailable(format!(
                        "team '{}' kept changing concurrently: {}",
                        team_id, reason
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn finish_game(
        &self,
        room_id: &RoomId,
        rosters: &Rosters,
        teams: Vec<Team>,
    ) -> Result<AdvanceOutcome, GameError> {
        let standings = rotation::rank_teams(&teams, rosters);

        match self
            .rooms
            .transition_status(room_id, RoomStatus::InProgress, RoomStatus::Finished)
            .await
        {
            Ok(_) => {}
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!("Game in room '{}' was already finished", room_id);
                return Ok(AdvanceOutcome::GameOver { standings, teams });
            }
            Err(e) => return Err(e.into()),
        }

        let batch = teams
            .iter()
            .filter(|team| !rosters.members(&team.id).is_empty())
            .map(|team| {
                let total_points = team.total_points;
                let event = if standings.winners.contains(&team.id) {
                    GameEvent::Win { total_points }
                } else {
                    GameEvent::Lose { total_points }
                };
                (event, rosters.members(&team.id).to_vec())
            })
            .collect();
        self.notifier.notify_batch(batch).await;

        tracing::info!(
            "Game in room '{}' finished, top score {}",
            room_id,
            standings.top_points
        );
        Ok(AdvanceOutcome::GameOver { standings, teams })
    }
}
