//! Conversion logic between DTOs and domain entities.

use kotoba_shared::time::millis_to_rfc3339;

use crate::domain::{GameEvent, Participant, Room, RoomStatus, Team, UserId};
use crate::infrastructure::dto::{http, websocket::GameMessage};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&GameEvent> for GameMessage {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::TurnAssigned { words } => Self::TurnAssigned {
                words: words.clone(),
            },
            GameEvent::Wait => Self::Wait,
            GameEvent::WaitForResults => Self::WaitForResults,
            GameEvent::Win { total_points } => Self::Win {
                total_points: *total_points,
            },
            GameEvent::Lose { total_points } => Self::Lose {
                total_points: *total_points,
            },
            GameEvent::GameStart { number_of_rounds } => Self::GameStart {
                number_of_rounds: number_of_rounds.value(),
            },
            GameEvent::GameReset => Self::GameReset,
            GameEvent::RoomClosed => Self::RoomClosed,
        }
    }
}

pub fn status_label(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Waiting => "waiting",
        RoomStatus::InProgress => "in-progress",
        RoomStatus::Finished => "finished",
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            room_id: room.id.to_string(),
            name: room.name.as_str().to_string(),
            is_open: room.visibility.is_open(),
            status: status_label(room.status).to_string(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Team> for http::TeamDto {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.id.to_string(),
            name: team.name.as_str().to_string(),
            round: team.round,
            total_points: team.total_points,
        }
    }
}

impl From<&Participant> for http::ParticipantDto {
    fn from(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id.to_string(),
            user_id: participant.user_id.to_string(),
            team_id: participant.team_id.map(|id| id.to_string()),
            joined_at: millis_to_rfc3339(participant.joined_at.value()),
        }
    }
}

impl http::RoomDetailDto {
    /// ルーム詳細を組み立てる（招待コードは `viewer` が管理者のときだけ含める）
    pub fn new(room: &Room, teams: &[Team], participants: &[Participant], viewer: &UserId) -> Self {
        let invite_code = room
            .visibility
            .invite_code()
            .filter(|_| room.is_admin(viewer))
            .map(|code| code.as_str().to_string());

        Self {
            room_id: room.id.to_string(),
            name: room.name.as_str().to_string(),
            admin_id: room.admin_id.to_string(),
            is_open: room.visibility.is_open(),
            invite_code,
            status: status_label(room.status).to_string(),
            number_of_rounds: room.number_of_rounds.map(|n| n.value()),
            created_at: millis_to_rfc3339(room.created_at.value()),
            teams: teams.iter().map(http::TeamDto::from).collect(),
            participants: participants.iter().map(http::ParticipantDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        InviteCode, NumberOfRounds, ParticipantId, RoomId, RoomName, TeamId, TeamName, Timestamp,
        Visibility,
    };

    fn invite_only_room(admin_id: UserId) -> Room {
        Room::new(
            RoomId::generate(),
            admin_id,
            RoomName::new("lobby".to_string()).unwrap(),
            Visibility::InviteOnly(InviteCode::new("abc".to_string())),
            Timestamp::new(0),
        )
    }

    #[test]
    fn test_game_start_event_carries_round_count() {
        // テスト項目: GameStart イベントがラウンド数付きのメッセージに変換される
        // given (前提条件):
        let event = GameEvent::GameStart {
            number_of_rounds: NumberOfRounds::new(4).unwrap(),
        };

        // when (操作):
        let message = GameMessage::from(&event);

        // then (期待する結果):
        assert_eq!(
            message,
            GameMessage::GameStart {
                number_of_rounds: 4
            }
        );
    }

    #[test]
    fn test_room_summary_uses_kebab_case_status() {
        // テスト項目: ルーム概要のステータスは kebab-case の文字列になる
        // given (前提条件):
        let mut room = invite_only_room(UserId::generate());
        room.status = RoomStatus::InProgress;

        // when (操作):
        let dto = http::RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(dto.status, "in-progress");
        assert!(!dto.is_open);
        assert!(dto.created_at.starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_invite_code_is_only_shown_to_admin() {
        // テスト項目: 招待コードは管理者に対してのみ開示される
        // given (前提条件):
        let admin = UserId::generate();
        let room = invite_only_room(admin);
        let team = Team::new(
            TeamId::generate(),
            room.id,
            TeamName::new("red".to_string()).unwrap(),
        );
        let participant = Participant {
            id: ParticipantId::generate(),
            room_id: room.id,
            user_id: UserId::generate(),
            team_id: Some(team.id),
            joined_seq: 0,
            joined_at: Timestamp::new(0),
        };

        // when (操作):
        let for_admin =
            http::RoomDetailDto::new(&room, &[team.clone()], &[participant.clone()], &admin);
        let for_member =
            http::RoomDetailDto::new(&room, &[team], &[participant.clone()], &participant.user_id);

        // then (期待する結果):
        assert_eq!(for_admin.invite_code.as_deref(), Some("abc"));
        assert_eq!(for_member.invite_code, None);
        assert_eq!(
            for_member.participants[0].team_id,
            Some(for_member.teams[0].team_id.clone())
        );
    }
}
