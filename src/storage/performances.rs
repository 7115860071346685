//! Per-match player performances

use super::history::recompute_in;
use super::models::*;
use super::repository::Repository;
use super::schema::{map_constraint, require_parent, CricketDatabase};
use super::validate::{non_negative, StatLine};
use crate::error::{CricketError, Result};
use crate::scoring::ScoringRules;
use crate::types::{MatchId, PerformanceId, PlayerId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

fn performance_from_row(row: &Row) -> rusqlite::Result<Performance> {
    Ok(Performance {
        id: row.get(0)?,
        cricket_match_id: row.get(1)?,
        cricket_player_id: row.get(2)?,
        runs: row.get(3)?,
        wickets: row.get(4)?,
        catches: row.get(5)?,
        points: row.get(6)?,
    })
}

fn load_performance(conn: &Connection, id: &PerformanceId) -> Result<Performance> {
    conn.query_row(
        "SELECT id, cricket_match_id, cricket_player_id, runs, wickets, catches, points
         FROM performances WHERE id = ?1",
        [id],
        performance_from_row,
    )
    .optional()?
    .ok_or_else(|| CricketError::not_found("Performance", id))
}

fn pair_taken(conn: &Connection, match_id: &MatchId, player_id: &PlayerId) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM performances
                       WHERE cricket_match_id = ?1 AND cricket_player_id = ?2)",
        params![match_id, player_id],
        |row| row.get(0),
    )?)
}

/// Validate raw statistics and settle the points value.
pub(crate) fn build_performance(
    id: PerformanceId,
    new: NewPerformance,
    scoring: &ScoringRules,
) -> Result<Performance> {
    let stats = StatLine::from_raw(new.runs, new.wickets, new.catches)?;
    let points = match new.points {
        Some(points) => non_negative("points", points)?,
        None => scoring.points_for(stats.runs, stats.wickets, stats.catches),
    };

    Ok(Performance {
        id,
        cricket_match_id: new.cricket_match_id,
        cricket_player_id: new.cricket_player_id,
        runs: stats.runs,
        wickets: stats.wickets,
        catches: stats.catches,
        points,
    })
}

/// Insert and refresh the player's aggregate. `history_id` seeds a first history row.
pub(crate) fn insert_performance(
    conn: &Connection,
    performance: &Performance,
    history_id: Uuid,
) -> Result<()> {
    require_parent(
        conn,
        "Performance",
        "cricketMatchId",
        "Match",
        "matches",
        &performance.cricket_match_id,
    )?;
    require_parent(
        conn,
        "Performance",
        "cricketPlayerId",
        "Player",
        "players",
        &performance.cricket_player_id,
    )?;

    let key = format!(
        "({}, {})",
        performance.cricket_match_id, performance.cricket_player_id
    );
    if pair_taken(
        conn,
        &performance.cricket_match_id,
        &performance.cricket_player_id,
    )? {
        return Err(CricketError::UniqueConstraintViolation {
            entity: "Performance",
            constraint: "one performance per (match, player)",
            value: key,
        });
    }

    conn.execute(
        "INSERT INTO performances
         (id, cricket_match_id, cricket_player_id, runs, wickets, catches, points)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            performance.id,
            performance.cricket_match_id,
            performance.cricket_player_id,
            performance.runs,
            performance.wickets,
            performance.catches,
            performance.points
        ],
    )
    .map_err(|e| map_constraint(e, "Performance", &key))?;

    recompute_in(conn, &performance.cricket_player_id, history_id)?;
    Ok(())
}

impl CricketDatabase {
    /// Record a player's statistics for a match.
    pub fn create_performance(&mut self, new: NewPerformance) -> Result<Performance> {
        let scoring = self.scoring;
        let performance = build_performance(PerformanceId::new(self.next_id()), new, &scoring)?;
        let history_id = self.next_id();

        self.write("Performance", |tx| {
            insert_performance(tx, &performance, history_id)
        })?;
        tracing::info!(
            performance_id = %performance.id,
            match_id = %performance.cricket_match_id,
            player_id = %performance.cricket_player_id,
            points = performance.points,
            "recorded performance"
        );
        Ok(performance)
    }

    pub fn get_performance(&self, id: &PerformanceId) -> Result<Performance> {
        tracing::debug!(performance_id = %id, "loading performance");
        load_performance(&self.conn, id)
    }

    /// Correct statistics. Match and player are fixed once recorded.
    pub fn update_performance(
        &mut self,
        id: &PerformanceId,
        patch: PerformancePatch,
    ) -> Result<Performance> {
        let scoring = self.scoring;
        let history_id = self.next_id();

        let performance = self.write("Performance", |tx| {
            let current = load_performance(tx, id)?;
            let stats_changed =
                patch.runs.is_some() || patch.wickets.is_some() || patch.catches.is_some();
            let points = match patch.points {
                Some(points) => Some(points),
                None if stats_changed => None,
                None => Some(i64::from(current.points)),
            };

            let corrected = build_performance(
                current.id,
                NewPerformance {
                    cricket_match_id: current.cricket_match_id,
                    cricket_player_id: current.cricket_player_id,
                    runs: patch.runs.unwrap_or(i64::from(current.runs)),
                    wickets: patch.wickets.unwrap_or(i64::from(current.wickets)),
                    catches: patch.catches.unwrap_or(i64::from(current.catches)),
                    points,
                },
                &scoring,
            )?;

            tx.execute(
                "UPDATE performances SET runs = ?2, wickets = ?3, catches = ?4, points = ?5
                 WHERE id = ?1",
                params![
                    corrected.id,
                    corrected.runs,
                    corrected.wickets,
                    corrected.catches,
                    corrected.points
                ],
            )
            .map_err(|e| map_constraint(e, "Performance", &corrected.id.to_string()))?;

            recompute_in(tx, &corrected.cricket_player_id, history_id)?;
            Ok(corrected)
        })?;
        tracing::info!(performance_id = %id, points = performance.points, "corrected performance");
        Ok(performance)
    }

    pub fn delete_performance(&mut self, id: &PerformanceId) -> Result<()> {
        let history_id = self.next_id();
        self.write("Performance", |tx| {
            let performance = load_performance(tx, id)?;
            tx.execute("DELETE FROM performances WHERE id = ?1", [id])?;
            recompute_in(tx, &performance.cricket_player_id, history_id)?;
            Ok(())
        })?;
        tracing::info!(performance_id = %id, "deleted performance");
        Ok(())
    }

    /// Performances in a match, best scorers first
    pub fn performances_for_match(&self, match_id: &MatchId) -> Result<Vec<Performance>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, cricket_match_id, cricket_player_id, runs, wickets, catches, points
             FROM performances WHERE cricket_match_id = ?1
             ORDER BY points DESC, cricket_player_id",
        )?;
        let rows = stmt.query_map([match_id], performance_from_row)?;

        let mut performances = Vec::new();
        for row in rows {
            performances.push(row?);
        }
        Ok(performances)
    }

    /// A player's performances, in match date order
    pub fn performances_for_player(&self, player_id: &PlayerId) -> Result<Vec<Performance>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.cricket_match_id, p.cricket_player_id,
                    p.runs, p.wickets, p.catches, p.points
             FROM performances p
             JOIN matches m ON m.id = p.cricket_match_id
             WHERE p.cricket_player_id = ?1
             ORDER BY m.match_date, m.id",
        )?;
        let rows = stmt.query_map([player_id], performance_from_row)?;

        let mut performances = Vec::new();
        for row in rows {
            performances.push(row?);
        }
        Ok(performances)
    }
}

impl Repository<Performance> for CricketDatabase {
    fn get(&self, id: &PerformanceId) -> Result<Performance> {
        self.get_performance(id)
    }

    fn create(&mut self, new: NewPerformance) -> Result<Performance> {
        self.create_performance(new)
    }

    fn update(&mut self, id: &PerformanceId, patch: PerformancePatch) -> Result<Performance> {
        self.update_performance(id, patch)
    }

    fn delete(&mut self, id: &PerformanceId) -> Result<()> {
        self.delete_performance(id)
    }

    fn list_by_parent(&self, match_id: &MatchId) -> Result<Vec<Performance>> {
        self.performances_for_match(match_id)
    }
}
