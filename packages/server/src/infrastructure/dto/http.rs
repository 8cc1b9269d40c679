//! HTTP API request / response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub is_open: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub invite_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub name: String,
    pub is_open: bool,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TeamDto {
    pub team_id: String,
    pub name: String,
    pub round: u64,
    pub total_points: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ParticipantDto {
    pub participant_id: String,
    pub user_id: String,
    pub team_id: Option<String>,
    pub joined_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub room_id: String,
    pub name: String,
    pub admin_id: String,
    pub is_open: bool,
    /// Only disclosed to the room admin.
    pub invite_code: Option<String>,
    pub status: String,
    pub number_of_rounds: Option<u32>,
    pub created_at: String,
    pub teams: Vec<TeamDto>,
    /// In join order, which is also the turn order inside each team.
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeVisibilityRequest {
    pub is_open: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeVisibilityResponse {
    pub invite_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoinRoomRequest {
    pub invite_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub participant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PassAdminRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub number_of_rounds: u32,
}

/// `score: null` (or missing) asks for the current speaker without closing the turn.
#[derive(Debug, Default, Deserialize)]
pub struct AdvanceRoundRequest {
    pub score: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum AdvanceRoundResponse {
    TurnAssigned {
        speaker: String,
        round: u64,
        total_points: i64,
    },
    WaitingForOtherTeams {
        round: u64,
        total_points: i64,
    },
    GameOver {
        winners: Vec<String>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordsResponse {
    pub words: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
