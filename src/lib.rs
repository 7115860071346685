//! Cricket Fantasy Data Model
//!
//! A typed relational store for a cricket fantasy/betting statistics
//! application: teams, players, matches, betting pools, per-match
//! performances, career aggregates and special bets.
//!
//! ## Features
//!
//! - **Typed Records**: Plain record structs with caller-supplied or generated ids
//! - **Referential Integrity**: Every write is validated and executed in one
//!   transaction, with SQLite constraints as a second line of defence
//! - **Repository Contract**: One generic get/create/update/delete/list interface
//!   for all eight record types
//! - **Career Aggregates**: Player histories are recomputed with every
//!   performance write
//! - **Pluggable Ids**: Inject a deterministic id generator for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use cricket_fantasy::storage::*;
//! use cricket_fantasy::{CricketError, MatchId, TeamId};
//! use chrono::{TimeZone, Utc};
//!
//! # fn example() -> cricket_fantasy::Result<()> {
//! let mut db = CricketDatabase::open_in_memory()?;
//!
//! for (id, name) in [("t1", "Eagles"), ("t2", "Hawks")] {
//!     db.create_team(Team {
//!         id: TeamId::new(id),
//!         name: name.to_string(),
//!         image_path: String::new(),
//!     })?;
//! }
//!
//! let date = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
//! db.create_match(CricketMatch {
//!     id: MatchId::new("m1"),
//!     home_team_id: TeamId::new("t1"),
//!     away_team_id: TeamId::new("t2"),
//!     match_date: date,
//! })?;
//!
//! let same_sides = db.create_match(CricketMatch {
//!     id: MatchId::new("m2"),
//!     home_team_id: TeamId::new("t1"),
//!     away_team_id: TeamId::new("t1"),
//!     match_date: date,
//! });
//! assert!(matches!(same_sides, Err(CricketError::InvalidMatchTeams { .. })));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! The command-line tool stores its database under the user data directory.
//! Point it elsewhere with:
//! ```bash
//! export CRICKET_FANTASY_DB=/var/lib/cricket/cricket.db
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod scoring;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{Settings, DATABASE_PATH_ENV_VAR};
pub use error::{CricketError, Result};
pub use scoring::ScoringRules;
pub use storage::{CricketDatabase, Repository};
pub use types::{
    BetOptionId, MatchId, PerformanceId, PlayerHistoryId, PlayerId, PoolId, SpecialBetId, TeamId,
};
