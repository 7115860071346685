//! Pure validation checks run before any write reaches the database.

use crate::error::{CricketError, Result};
use crate::types::TeamId;

pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CricketError::invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Narrow a caller-supplied count to a stored one.
pub fn non_negative(field: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(CricketError::invalid(
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
    u32::try_from(value)
        .map_err(|_| CricketError::invalid(field, format!("{} exceeds {}", value, u32::MAX)))
}

/// Narrow a caller-supplied or summed total to a stored aggregate.
pub fn non_negative_total(field: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        CricketError::invalid(field, format!("must be non-negative, got {}", value))
    })
}

pub fn distinct_teams(home: &TeamId, away: &TeamId) -> Result<()> {
    if home == away {
        return Err(CricketError::InvalidMatchTeams {
            team_id: home.to_string(),
        });
    }
    Ok(())
}

/// Batting, bowling and fielding counts that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatLine {
    pub runs: u32,
    pub wickets: u32,
    pub catches: u32,
}

impl StatLine {
    pub fn from_raw(runs: i64, wickets: i64, catches: i64) -> Result<Self> {
        Ok(Self {
            runs: non_negative("runs", runs)?,
            wickets: non_negative("wickets", wickets)?,
            catches: non_negative("catches", catches)?,
        })
    }
}
