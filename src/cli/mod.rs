//! CLI argument definitions and parsing.

use crate::types::{BetOptionId, MatchId, PerformanceId, PlayerId, TeamId};
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Register a team under a caller-chosen id.
    Add {
        id: TeamId,
        name: String,

        /// Path or URL of the team crest.
        #[clap(long, default_value = "")]
        image: String,
    },

    /// Show one team and its roster.
    Show { id: TeamId },

    /// List all teams.
    List,

    /// Delete a team with no players or matches.
    Rm { id: TeamId },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Register a player on an existing team.
    Add {
        id: PlayerId,

        #[clap(long, short)]
        team: TeamId,

        #[clap(long)]
        first: String,

        #[clap(long)]
        last: String,

        /// Playing role, e.g. Batsman, Bowler, All-rounder, Wicket-keeper.
        #[clap(long, default_value = "")]
        position: String,

        #[clap(long, default_value = "")]
        image: String,
    },

    Show { id: PlayerId },

    /// List players, optionally for one team.
    List {
        #[clap(long, short)]
        team: Option<TeamId>,
    },

    /// Transfer a player to another team.
    Move { id: PlayerId, team: TeamId },
}

#[derive(Debug, Subcommand)]
pub enum MatchCmd {
    /// Schedule a match between two different teams.
    Add {
        id: MatchId,
        home: TeamId,
        away: TeamId,

        /// Start time, RFC 3339 (e.g. 2024-03-01T14:00:00Z).
        #[clap(long)]
        date: DateTime<Utc>,
    },

    /// Show a match with teams, pool and performances.
    Show { id: MatchId },

    /// List matches, optionally for one team.
    List {
        #[clap(long, short)]
        team: Option<TeamId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PoolCmd {
    /// Open the betting pool for a match.
    Open { match_id: MatchId },
}

#[derive(Debug, Subcommand)]
pub enum PerfCmd {
    /// Record a player's statistics for a match.
    Record {
        match_id: MatchId,
        player_id: PlayerId,

        #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
        runs: i64,

        #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
        wickets: i64,

        #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
        catches: i64,

        /// Override the points computed from the scoring rules.
        #[clap(long, allow_negative_numbers = true)]
        points: Option<i64>,
    },

    /// Correct a recorded performance.
    Correct {
        id: PerformanceId,

        #[clap(long, allow_negative_numbers = true)]
        runs: Option<i64>,

        #[clap(long, allow_negative_numbers = true)]
        wickets: Option<i64>,

        #[clap(long, allow_negative_numbers = true)]
        catches: Option<i64>,

        #[clap(long, allow_negative_numbers = true)]
        points: Option<i64>,
    },

    /// List performances for a match or a player.
    #[clap(group(ArgGroup::new("scope").required(true).multiple(false).args(["match_id", "player"])))]
    List {
        #[clap(long = "match", short)]
        match_id: Option<MatchId>,

        #[clap(long, short)]
        player: Option<PlayerId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCmd {
    /// Show a player's career aggregate.
    Show { player_id: PlayerId },

    /// Rebuild aggregates from performances (one player, or all).
    Recompute { player_id: Option<PlayerId> },
}

#[derive(Debug, Subcommand)]
pub enum BetCmd {
    /// Add a bet option (names are unique).
    #[clap(name = "option")]
    AddOption { name: String },

    /// List bet options.
    Options,

    /// Place a special bet on a player.
    Place {
        option: BetOptionId,
        player_id: PlayerId,
    },

    /// List the special bets placed on a player.
    List { player_id: PlayerId },
}

#[derive(Debug, Parser)]
#[clap(name = "cricket-fantasy", about = "Cricket fantasy statistics store")]
pub struct CricketCli {
    /// Database file (or set `CRICKET_FANTASY_DB` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON file with per-run, per-wicket and per-catch points.
    #[clap(long, global = true)]
    pub scoring: Option<PathBuf>,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// Log debug events to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage teams
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },
    /// Manage players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },
    /// Manage matches
    Match {
        #[clap(subcommand)]
        cmd: MatchCmd,
    },
    /// Manage betting pools
    Pool {
        #[clap(subcommand)]
        cmd: PoolCmd,
    },
    /// Record and correct performances
    Perf {
        #[clap(subcommand)]
        cmd: PerfCmd,
    },
    /// Career aggregates
    History {
        #[clap(subcommand)]
        cmd: HistoryCmd,
    },
    /// Bet options and special bets
    Bet {
        #[clap(subcommand)]
        cmd: BetCmd,
    },
    /// Import a JSON seed file in one transaction
    Seed { file: PathBuf },
}
