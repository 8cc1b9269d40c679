//! Turn and round rules.
//!
//! Pure functions that decide who speaks next, when a team has finished its
//! rounds and who won. They take plain data and return decisions, so the use
//! case layer only has to load state, apply the decision and notify.

use std::{collections::HashMap, fmt, str::FromStr};

use super::{NumberOfRounds, Participant, Team, TeamId, UserId};

/// How the rotation length of a team is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Every team rotates over the size of the largest team in the room.
    #[default]
    LargestTeam,
    /// Every team rotates over its own size.
    OwnTeam,
}

impl FromStr for RotationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "largest-team" => Ok(Self::LargestTeam),
            "own-team" => Ok(Self::OwnTeam),
            other => Err(format!(
                "unknown rotation policy '{other}' (expected 'largest-team' or 'own-team')"
            )),
        }
    }
}

impl fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargestTeam => f.write_str("largest-team"),
            Self::OwnTeam => f.write_str("own-team"),
        }
    }
}

/// Team members in turn order, keyed by team.
///
/// Participants without a team are left out.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    members: HashMap<TeamId, Vec<UserId>>,
}

impl Rosters {
    /// Group participants by team, keeping the order of `participants`.
    ///
    /// # Arguments
    ///
    /// * `participants` - Participants of one room, already in join order
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut members: HashMap<TeamId, Vec<UserId>> = HashMap::new();
        for participant in participants {
            if let Some(team_id) = participant.team_id {
                members.entry(team_id).or_default().push(participant.user_id);
            }
        }
        Self { members }
    }

    pub fn members(&self, team_id: &TeamId) -> &[UserId] {
        self.members.get(team_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn team_size(&self, team_id: &TeamId) -> usize {
        self.members(team_id).len()
    }

    /// Size of the largest team, 0 when nobody has a team.
    pub fn max_team_size(&self) -> usize {
        self.members.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Rotation length for `team_id` under `policy`, `None` for an empty team.
    pub fn modulus(&self, team_id: &TeamId, policy: RotationPolicy) -> Option<u64> {
        let size = match policy {
            RotationPolicy::LargestTeam => self.max_team_size(),
            RotationPolicy::OwnTeam => self.team_size(team_id),
        };
        (self.team_size(team_id) > 0 && size > 0).then_some(size as u64)
    }

    /// Rotation length of every team, frozen when the game starts.
    ///
    /// Empty teams get 0 and stay out of the rotation.
    pub fn rotation_lengths(&self, teams: &[Team], policy: RotationPolicy) -> Vec<(TeamId, u64)> {
        teams
            .iter()
            .map(|team| (team.id, self.modulus(&team.id, policy).unwrap_or(0)))
            .collect()
    }

    /// Every team-assigned user with its team, join order kept within a team.
    pub fn all_members(&self) -> impl Iterator<Item = (&TeamId, &UserId)> {
        self.members
            .iter()
            .flat_map(|(team_id, users)| users.iter().map(move |user| (team_id, user)))
    }
}

/// Zero-based index of the active speaker within the team's own member list.
///
/// `(round % modulus) % team_size`: with equal team sizes this is exactly
/// `round % modulus`. Returns `None` for an empty team.
pub fn speaker_index(round: u64, modulus: u64, team_size: usize) -> Option<usize> {
    if modulus == 0 || team_size == 0 {
        return None;
    }
    Some(((round % modulus) % team_size as u64) as usize)
}

/// Number of full rotations a team has completed.
pub fn completed_rotations(round: u64, modulus: u64) -> u64 {
    round / modulus
}

/// Whether a team has played all its rounds.
pub fn is_team_done(round: u64, modulus: u64, number_of_rounds: NumberOfRounds) -> bool {
    completed_rotations(round, modulus) >= u64::from(number_of_rounds.value())
}

/// What should happen after a team's turn counter was (possibly) advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnDecision {
    /// `speaker` gets a word batch, everyone in `waiting` waits.
    NextSpeaker {
        speaker: UserId,
        waiting: Vec<UserId>,
    },
    /// The team finished its last rotation.
    TeamDone,
}

/// Decide the next step for one team.
///
/// # Arguments
///
/// * `team` - Team state after the score was applied (or untouched for a no-score call)
/// * `members` - The team's members in turn order
/// * `modulus` - Rotation length for this team
/// * `number_of_rounds` - Round target of the room
/// * `score_applied` - Whether this call advanced the team's turn counter
///
/// Returns `None` when the team has no members.
pub fn decide_turn(
    team: &Team,
    members: &[UserId],
    modulus: u64,
    number_of_rounds: NumberOfRounds,
    score_applied: bool,
) -> Option<TurnDecision> {
    let index = speaker_index(team.round, modulus, members.len())?;

    let completed_full_rotation = score_applied && team.round % modulus == 0;
    if completed_full_rotation
        && completed_rotations(team.round, modulus) == u64::from(number_of_rounds.value())
    {
        return Some(TurnDecision::TeamDone);
    }

    let speaker = members[index];
    let waiting = members
        .iter()
        .copied()
        .filter(|user| *user != speaker)
        .collect();
    Some(TurnDecision::NextSpeaker { speaker, waiting })
}

/// Whether every team still in the rotation finished all its rounds.
///
/// A team is out of the rotation when it had no members at start
/// (`rotation_length == 0`) or when all its members have left since.
pub fn all_teams_done(
    teams: &[Team],
    rosters: &Rosters,
    number_of_rounds: NumberOfRounds,
) -> bool {
    teams.iter().all(|team| {
        team.rotation_length == 0
            || rosters.team_size(&team.id) == 0
            || is_team_done(team.round, team.rotation_length, number_of_rounds)
    })
}

/// Final standings of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    /// Teams sharing the highest total score.
    pub winners: Vec<TeamId>,
    pub losers: Vec<TeamId>,
    pub top_points: i64,
}

/// Rank the teams that still have members by total points; every team tied
/// at the top wins. Empty teams are neither winners nor losers.
pub fn rank_teams(teams: &[Team], rosters: &Rosters) -> Standings {
    let ranked: Vec<&Team> = teams
        .iter()
        .filter(|t| rosters.team_size(&t.id) > 0)
        .collect();
    let top_points = ranked.iter().map(|t| t.total_points).max().unwrap_or(0);
    let (winners, losers) = ranked
        .into_iter()
        .partition::<Vec<&Team>, _>(|t| t.total_points == top_points);
    Standings {
        winners: winners.into_iter().map(|t| t.id).collect(),
        losers: losers.into_iter().map(|t| t.id).collect(),
        top_points,
    }
}
