//! Data models for the storage layer

use crate::types::{
    BetOptionId, MatchId, PerformanceId, PlayerHistoryId, PlayerId, PoolId, SpecialBetId, TeamId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A franchise. Teams own players and appear on both sides of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub image_path: String,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A fixture between two distinct teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CricketMatch {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub match_date: DateTime<Utc>,
}

/// Betting pool opened for a match. At most one per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: PoolId,
    pub cricket_match_id: MatchId,
}

/// One player's statistics in one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: PerformanceId,
    pub cricket_match_id: MatchId,
    pub cricket_player_id: PlayerId,
    pub runs: u32,
    pub wickets: u32,
    pub catches: u32,
    pub points: u32,
}

/// Career aggregate for a player, summed over their performances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistory {
    pub id: PlayerHistoryId,
    pub player_id: PlayerId,
    pub runs: u64,
    pub wickets: u64,
    pub catches: u64,
    pub points: u64,
}

/// Reference data naming a kind of special bet (e.g. "Top run scorer").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetOption {
    pub id: BetOptionId,
    pub bet_name: String,
}

/// A placed bet tying a bet option to a player. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialBet {
    pub id: SpecialBetId,
    pub special_bet_id: BetOptionId,
    pub player_id: PlayerId,
}

// ---- creation inputs for generated-id records ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPool {
    pub cricket_match_id: MatchId,
}

/// Raw statistics as supplied by a caller. Negative values are rejected on write.
/// When `points` is absent it is computed from the database's scoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerformance {
    pub cricket_match_id: MatchId,
    pub cricket_player_id: PlayerId,
    #[serde(default)]
    pub runs: i64,
    #[serde(default)]
    pub wickets: i64,
    #[serde(default)]
    pub catches: i64,
    #[serde(default)]
    pub points: Option<i64>,
}

impl NewPerformance {
    pub fn new(cricket_match_id: MatchId, cricket_player_id: PlayerId) -> Self {
        Self {
            cricket_match_id,
            cricket_player_id,
            runs: 0,
            wickets: 0,
            catches: 0,
            points: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayerHistory {
    pub player_id: PlayerId,
    #[serde(default)]
    pub runs: i64,
    #[serde(default)]
    pub wickets: i64,
    #[serde(default)]
    pub catches: i64,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBetOption {
    pub bet_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecialBet {
    pub special_bet_id: BetOptionId,
    pub player_id: PlayerId,
}

// ---- patches: `None` keeps the stored value ----

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPatch {
    pub name: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub team_id: Option<TeamId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPatch {
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub match_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPatch {
    pub cricket_match_id: Option<MatchId>,
}

/// Statistic correction. If any statistic changes and `points` is absent,
/// points are recomputed from the scoring rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePatch {
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub catches: Option<i64>,
    pub points: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistoryPatch {
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub catches: Option<i64>,
    pub points: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetOptionPatch {
    pub bet_name: Option<String>,
}

/// Special bets cannot be edited, so no patch value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialBetPatch {}

// ---- read models ----

/// A match with its relations resolved through the flat tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOverview {
    pub cricket_match: CricketMatch,
    pub home_team: Team,
    pub away_team: Team,
    pub pool: Option<Pool>,
    pub performances: Vec<Performance>,
}
