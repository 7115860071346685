//! Bulk import of reference and fixture data from JSON

use super::bets::insert_bet_option;
use super::matches::insert_match;
use super::models::*;
use super::performances::{build_performance, insert_performance};
use super::players::insert_player;
use super::pools::insert_pool;
use super::schema::CricketDatabase;
use super::teams::insert_team;
use crate::error::Result;
use crate::types::{BetOptionId, PerformanceId, PoolId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A seed document. Sections are applied parents first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedData {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub matches: Vec<CricketMatch>,
    pub bet_options: Vec<NewBetOption>,
    pub pools: Vec<NewPool>,
    pub performances: Vec<NewPerformance>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub teams: usize,
    pub players: usize,
    pub matches: usize,
    pub bet_options: usize,
    pub pools: usize,
    pub performances: usize,
}

impl SeedData {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl CricketDatabase {
    /// Import everything in one transaction. The first integrity failure
    /// aborts the import and nothing is written.
    pub fn import_seed(&mut self, seed: SeedData) -> Result<SeedSummary> {
        let scoring = self.scoring;

        let bet_options: Vec<BetOption> = seed
            .bet_options
            .into_iter()
            .map(|new| BetOption {
                id: BetOptionId::new(self.next_id()),
                bet_name: new.bet_name,
            })
            .collect();
        let pools: Vec<Pool> = seed
            .pools
            .into_iter()
            .map(|new| Pool {
                id: PoolId::new(self.next_id()),
                cricket_match_id: new.cricket_match_id,
            })
            .collect();
        let mut performances = Vec::with_capacity(seed.performances.len());
        for new in seed.performances {
            let performance = build_performance(PerformanceId::new(self.next_id()), new, &scoring)?;
            performances.push((performance, self.next_id()));
        }

        let summary = SeedSummary {
            teams: seed.teams.len(),
            players: seed.players.len(),
            matches: seed.matches.len(),
            bet_options: bet_options.len(),
            pools: pools.len(),
            performances: performances.len(),
        };

        self.write("Seed", |tx| {
            for team in &seed.teams {
                insert_team(tx, team)?;
            }
            for option in &bet_options {
                insert_bet_option(tx, option)?;
            }
            for player in &seed.players {
                insert_player(tx, player)?;
            }
            for m in &seed.matches {
                insert_match(tx, m)?;
            }
            for pool in &pools {
                insert_pool(tx, pool)?;
            }
            for (performance, history_id) in &performances {
                insert_performance(tx, performance, *history_id)?;
            }
            Ok(())
        })?;

        tracing::info!(
            teams = summary.teams,
            players = summary.players,
            matches = summary.matches,
            bet_options = summary.bet_options,
            pools = summary.pools,
            performances = summary.performances,
            "imported seed data"
        );
        Ok(summary)
    }
}
