//! Match records

use super::models::*;
use super::repository::Repository;
use super::schema::{
    map_constraint, require_parent, require_unreferenced, row_exists, CricketDatabase,
};
use super::validate::distinct_teams;
use crate::error::{CricketError, Result};
use crate::types::{MatchId, TeamId};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn match_from_row(row: &Row) -> rusqlite::Result<CricketMatch> {
    Ok(CricketMatch {
        id: row.get(0)?,
        home_team_id: row.get(1)?,
        away_team_id: row.get(2)?,
        match_date: row.get(3)?,
    })
}

pub(crate) fn fetch_match(conn: &Connection, id: &MatchId) -> Result<Option<CricketMatch>> {
    Ok(conn
        .query_row(
            "SELECT id, home_team_id, away_team_id, match_date FROM matches WHERE id = ?1",
            [id],
            match_from_row,
        )
        .optional()?)
}

pub(crate) fn load_match(conn: &Connection, id: &MatchId) -> Result<CricketMatch> {
    fetch_match(conn, id)?.ok_or_else(|| CricketError::not_found("Match", id))
}

/// Distinct sides are checked before either side is looked up.
fn validate_match(conn: &Connection, m: &CricketMatch) -> Result<()> {
    m.id.validate()?;
    distinct_teams(&m.home_team_id, &m.away_team_id)?;
    require_parent(conn, "Match", "homeTeamId", "Team", "teams", &m.home_team_id)?;
    require_parent(conn, "Match", "awayTeamId", "Team", "teams", &m.away_team_id)
}

pub(crate) fn insert_match(conn: &Connection, m: &CricketMatch) -> Result<()> {
    validate_match(conn, m)?;

    if row_exists(conn, "matches", &m.id)? {
        return Err(CricketError::UniqueConstraintViolation {
            entity: "Match",
            constraint: "id",
            value: m.id.to_string(),
        });
    }

    conn.execute(
        "INSERT INTO matches (id, home_team_id, away_team_id, match_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![m.id, m.home_team_id, m.away_team_id, m.match_date],
    )
    .map_err(|e| map_constraint(e, "Match", m.id.as_str()))?;
    Ok(())
}

impl CricketDatabase {
    pub fn create_match(&mut self, m: CricketMatch) -> Result<CricketMatch> {
        self.write("Match", |tx| insert_match(tx, &m))?;
        tracing::info!(
            match_id = %m.id,
            home = %m.home_team_id,
            away = %m.away_team_id,
            "created match"
        );
        Ok(m)
    }

    pub fn get_match(&self, id: &MatchId) -> Result<CricketMatch> {
        tracing::debug!(match_id = %id, "loading match");
        load_match(&self.conn, id)
    }

    pub fn update_match(&mut self, id: &MatchId, patch: MatchPatch) -> Result<CricketMatch> {
        let m = self.write("Match", |tx| {
            let mut m = load_match(tx, id)?;
            if let Some(home) = patch.home_team_id {
                m.home_team_id = home;
            }
            if let Some(away) = patch.away_team_id {
                m.away_team_id = away;
            }
            if let Some(date) = patch.match_date {
                m.match_date = date;
            }
            validate_match(tx, &m)?;

            tx.execute(
                "UPDATE matches SET home_team_id = ?2, away_team_id = ?3, match_date = ?4
                 WHERE id = ?1",
                params![m.id, m.home_team_id, m.away_team_id, m.match_date],
            )
            .map_err(|e| map_constraint(e, "Match", id.as_str()))?;
            Ok(m)
        })?;
        tracing::info!(match_id = %id, "updated match");
        Ok(m)
    }

    /// Refuses while a pool or any performance belongs to the match.
    pub fn delete_match(&mut self, id: &MatchId) -> Result<()> {
        self.write("Match", |tx| {
            if !row_exists(tx, "matches", id)? {
                return Err(CricketError::not_found("Match", id));
            }
            require_unreferenced(
                tx,
                "Match",
                id,
                &[("pools", "cricket_match_id"), ("performances", "cricket_match_id")],
            )?;
            tx.execute("DELETE FROM matches WHERE id = ?1", [id])
                .map_err(|e| map_constraint(e, "Match", id.as_str()))?;
            Ok(())
        })?;
        tracing::info!(match_id = %id, "deleted match");
        Ok(())
    }

    /// Matches a team plays in, home or away, in date order
    pub fn list_matches_for_team(&self, team_id: &TeamId) -> Result<Vec<CricketMatch>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, home_team_id, away_team_id, match_date FROM matches
             WHERE home_team_id = ?1 OR away_team_id = ?1
             ORDER BY match_date, id",
        )?;
        let rows = stmt.query_map([team_id], match_from_row)?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    pub fn list_matches(&self) -> Result<Vec<CricketMatch>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, home_team_id, away_team_id, match_date FROM matches
             ORDER BY match_date, id",
        )?;
        let rows = stmt.query_map([], match_from_row)?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }
}

impl Repository<CricketMatch> for CricketDatabase {
    fn get(&self, id: &MatchId) -> Result<CricketMatch> {
        self.get_match(id)
    }

    fn create(&mut self, new: CricketMatch) -> Result<CricketMatch> {
        self.create_match(new)
    }

    fn update(&mut self, id: &MatchId, patch: MatchPatch) -> Result<CricketMatch> {
        self.update_match(id, patch)
    }

    fn delete(&mut self, id: &MatchId) -> Result<()> {
        self.delete_match(id)
    }

    fn list_by_parent(&self, team_id: &TeamId) -> Result<Vec<CricketMatch>> {
        self.list_matches_for_team(team_id)
    }
}
