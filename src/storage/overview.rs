//! Read models that resolve relations across the flat tables

use super::matches::load_match;
use super::models::MatchOverview;
use super::pools::fetch_pool_for_match;
use super::schema::CricketDatabase;
use super::teams::load_team;
use crate::error::Result;
use crate::types::MatchId;

impl CricketDatabase {
    /// A match together with both teams, its pool (if opened) and its performances.
    pub fn match_overview(&self, match_id: &MatchId) -> Result<MatchOverview> {
        let cricket_match = load_match(&self.conn, match_id)?;
        let home_team = load_team(&self.conn, &cricket_match.home_team_id)?;
        let away_team = load_team(&self.conn, &cricket_match.away_team_id)?;
        let pool = fetch_pool_for_match(&self.conn, match_id)?;
        let performances = self.performances_for_match(match_id)?;

        Ok(MatchOverview {
            cricket_match,
            home_team,
            away_team,
            pool,
            performances,
        })
    }
}
