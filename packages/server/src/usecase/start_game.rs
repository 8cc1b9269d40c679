//! UseCase: ゲーム開始
//!
//! 管理者がラウンド数を指定してゲームを開始する。チームの得点とラウンドは 0 に戻り、
//! 各チームのローテーション長はこの時点のメンバー構成で確定する。
//! チームに所属する参加者全員に開始を通知したうえで、各チームの最初の話者に単語を配る。

use std::sync::Arc;

use crate::domain::{
    GameEvent, GameNotifier, NumberOfRounds, ParticipantRepository, RepositoryError, Room, RoomId,
    RoomRepository, RoomStatus, RoomStatusError, TeamRepository, UserId, WordProvider,
    rotation::Rosters,
};

use super::{error::GameError, settings::GameSettings};

pub struct StartGameUseCase {
    rooms: Arc<dyn RoomRepository>,
    teams: Arc<dyn TeamRepository>,
    participants: Arc<dyn ParticipantRepository>,
    word_provider: Arc<dyn WordProvider>,
    notifier: Arc<dyn GameNotifier>,
    settings: GameSettings,
}

impl StartGameUseCase {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        teams: Arc<dyn TeamRepository>,
        participants: Arc<dyn ParticipantRepository>,
        word_provider: Arc<dyn WordProvider>,
        notifier: Arc<dyn GameNotifier>,
        settings: GameSettings,
    ) -> Self {
        Self {
            rooms,
            teams,
            participants,
            word_provider,
            notifier,
            settings,
        }
    }

    /// ゲームを開始する
    ///
    /// # Arguments
    ///
    /// * `user_id` - 要求したユーザー（管理者のみ）
    /// * `room_id` - 対象のルーム
    /// * `number_of_rounds` - 各チームが回るローテーション数
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - InProgress になったルーム
    /// * `Err(GameError)` - 失敗
    pub async fn execute(
        &self,
        user_id: UserId,
        room_id: RoomId,
        number_of_rounds: u32,
    ) -> Result<Room, GameError> {
        let number_of_rounds = NumberOfRounds::new(number_of_rounds)?;

        let mut room = self.rooms.get_room(&room_id).await?;
        if !room.is_admin(&user_id) {
            return Err(GameError::not_admin(room_id));
        }
        let previous = room.status;
        if !previous.can_transition_to(RoomStatus::InProgress) {
            return Err(RoomStatusError {
                from: previous,
                to: RoomStatus::InProgress,
            }
            .into());
        }

        let participants = self.participants.list_by_room(&room_id).await?;
        let rosters = Rosters::from_participants(&participants);
        if rosters.max_team_size() == 0 {
            return Err(GameError::BadRequest(format!(
                "room '{}' has no team with members",
                room_id
            )));
        }

        let teams = self.teams.list_teams(&room_id).await?;
        let rotation_lengths = rosters.rotation_lengths(&teams, self.settings.rotation_policy);
        self.teams.start_teams(&room_id, rotation_lengths).await?;
        room.number_of_rounds = Some(number_of_rounds);
        self.rooms.update_room(room).await?;
        let room = self
            .rooms
            .transition_status(&room_id, previous, RoomStatus::InProgress)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    GameError::Conflict(format!("room '{}' changed state concurrently", room_id))
                }
                other => other.into(),
            })?;

        tracing::info!(
            "Game in room '{}' started with {} rounds",
            room_id,
            number_of_rounds.value()
        );

        let players: Vec<UserId> = rosters.all_members().map(|(_, user)| *user).collect();
        let mut batch = vec![(GameEvent::GameStart { number_of_rounds }, players)];
        for team in teams {
            let Some((first, rest)) = rosters.members(&team.id).split_first() else {
                continue;
            };
            let words = self
                .word_provider
                .random_words(self.settings.words_per_turn)
                .await;
            batch.push((GameEvent::TurnAssigned { words }, vec![*first]));
            batch.push((GameEvent::Wait, rest.to_vec()));
        }
        self.notifier.notify_batch(batch).await;

        Ok(room)
    }
}
