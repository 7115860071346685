//! Player history aggregates.
//!
//! Each player has at most one history row holding the sum of runs, wickets,
//! catches and points over all of their performances. Every performance write
//! recomputes the affected player's row inside the same transaction, so the
//! aggregate is never stale with respect to committed performances. Direct
//! edits through the repository are allowed for administrative corrections and
//! hold until the next recomputation for that player.

use super::models::*;
use super::players::load_player;
use super::repository::Repository;
use super::schema::{map_constraint, require_parent, CricketDatabase};
use super::validate::non_negative_total;
use crate::error::{CricketError, Result};
use crate::types::{PlayerHistoryId, PlayerId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

fn history_from_row(row: &Row) -> rusqlite::Result<PlayerHistory> {
    Ok(PlayerHistory {
        id: row.get(0)?,
        player_id: row.get(1)?,
        runs: row.get(2)?,
        wickets: row.get(3)?,
        catches: row.get(4)?,
        points: row.get(5)?,
    })
}

pub(crate) fn fetch_history_for_player(
    conn: &Connection,
    player_id: &PlayerId,
) -> Result<Option<PlayerHistory>> {
    Ok(conn
        .query_row(
            "SELECT id, player_id, runs, wickets, catches, points
             FROM player_history WHERE player_id = ?1",
            [player_id],
            history_from_row,
        )
        .optional()?)
}

fn load_history(conn: &Connection, id: &PlayerHistoryId) -> Result<PlayerHistory> {
    conn.query_row(
        "SELECT id, player_id, runs, wickets, catches, points
         FROM player_history WHERE id = ?1",
        [id],
        history_from_row,
    )
    .optional()?
    .ok_or_else(|| CricketError::not_found("PlayerHistory", id))
}

/// Rewrite `player_id`'s aggregate from their performances. `fresh_id` is used
/// only when the player has no history row yet.
pub(crate) fn recompute_in(
    conn: &Connection,
    player_id: &PlayerId,
    fresh_id: Uuid,
) -> Result<PlayerHistory> {
    let (runs, wickets, catches, points): (i64, i64, i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(runs), 0), COALESCE(SUM(wickets), 0),
                COALESCE(SUM(catches), 0), COALESCE(SUM(points), 0)
         FROM performances WHERE cricket_player_id = ?1",
        [player_id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )?;

    let history = PlayerHistory {
        id: PlayerHistoryId::new(fresh_id),
        player_id: player_id.clone(),
        runs: non_negative_total("runs", runs)?,
        wickets: non_negative_total("wickets", wickets)?,
        catches: non_negative_total("catches", catches)?,
        points: non_negative_total("points", points)?,
    };

    conn.execute(
        "INSERT INTO player_history (id, player_id, runs, wickets, catches, points)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(player_id) DO UPDATE SET
             runs = excluded.runs,
             wickets = excluded.wickets,
             catches = excluded.catches,
             points = excluded.points",
        params![
            history.id,
            history.player_id,
            history.runs,
            history.wickets,
            history.catches,
            history.points
        ],
    )?;

    fetch_history_for_player(conn, player_id)?
        .ok_or_else(|| CricketError::not_found("PlayerHistory", player_id))
}

impl CricketDatabase {
    /// Seed a history row by hand. Fails if the player already has one.
    pub fn create_player_history(&mut self, new: NewPlayerHistory) -> Result<PlayerHistory> {
        let history = PlayerHistory {
            id: PlayerHistoryId::new(self.next_id()),
            player_id: new.player_id,
            runs: non_negative_total("runs", new.runs)?,
            wickets: non_negative_total("wickets", new.wickets)?,
            catches: non_negative_total("catches", new.catches)?,
            points: non_negative_total("points", new.points)?,
        };

        self.write("PlayerHistory", |tx| {
            require_parent(
                tx,
                "PlayerHistory",
                "playerId",
                "Player",
                "players",
                &history.player_id,
            )?;
            if fetch_history_for_player(tx, &history.player_id)?.is_some() {
                return Err(CricketError::UniqueConstraintViolation {
                    entity: "PlayerHistory",
                    constraint: "one history per player",
                    value: history.player_id.to_string(),
                });
            }
            tx.execute(
                "INSERT INTO player_history (id, player_id, runs, wickets, catches, points)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    history.id,
                    history.player_id,
                    history.runs,
                    history.wickets,
                    history.catches,
                    history.points
                ],
            )
            .map_err(|e| map_constraint(e, "PlayerHistory", history.player_id.as_str()))?;
            Ok(())
        })?;
        tracing::info!(player_id = %history.player_id, "created player history");
        Ok(history)
    }

    pub fn get_player_history(&self, id: &PlayerHistoryId) -> Result<PlayerHistory> {
        load_history(&self.conn, id)
    }

    /// `None` for a player with no recorded performances and no seeded history.
    pub fn history_for_player(&self, player_id: &PlayerId) -> Result<Option<PlayerHistory>> {
        tracing::debug!(player_id = %player_id, "loading player history");
        fetch_history_for_player(&self.conn, player_id)
    }

    pub fn update_player_history(
        &mut self,
        id: &PlayerHistoryId,
        patch: PlayerHistoryPatch,
    ) -> Result<PlayerHistory> {
        let history = self.write("PlayerHistory", |tx| {
            let mut history = load_history(tx, id)?;
            if let Some(runs) = patch.runs {
                history.runs = non_negative_total("runs", runs)?;
            }
            if let Some(wickets) = patch.wickets {
                history.wickets = non_negative_total("wickets", wickets)?;
            }
            if let Some(catches) = patch.catches {
                history.catches = non_negative_total("catches", catches)?;
            }
            if let Some(points) = patch.points {
                history.points = non_negative_total("points", points)?;
            }

            tx.execute(
                "UPDATE player_history SET runs = ?2, wickets = ?3, catches = ?4, points = ?5
                 WHERE id = ?1",
                params![
                    history.id,
                    history.runs,
                    history.wickets,
                    history.catches,
                    history.points
                ],
            )?;
            Ok(history)
        })?;
        tracing::info!(history_id = %id, player_id = %history.player_id, "updated player history");
        Ok(history)
    }

    pub fn delete_player_history(&mut self, id: &PlayerHistoryId) -> Result<()> {
        self.write("PlayerHistory", |tx| {
            let deleted = tx.execute("DELETE FROM player_history WHERE id = ?1", [id])?;
            if deleted == 0 {
                return Err(CricketError::not_found("PlayerHistory", id));
            }
            Ok(())
        })?;
        tracing::info!(history_id = %id, "deleted player history");
        Ok(())
    }

    /// Rebuild one player's aggregate from their performances.
    pub fn recompute_player_history(&mut self, player_id: &PlayerId) -> Result<PlayerHistory> {
        let fresh_id = self.next_id();
        let history = self.write("PlayerHistory", |tx| {
            load_player(tx, player_id)?;
            recompute_in(tx, player_id, fresh_id)
        })?;
        tracing::info!(player_id = %player_id, points = history.points, "recomputed player history");
        Ok(history)
    }

    /// Rebuild every aggregate: players with performances or an existing row.
    /// Returns the number of rows written.
    pub fn recompute_all_histories(&mut self) -> Result<usize> {
        let player_ids: Vec<PlayerId> = {
            let mut stmt = self.conn.prepare(
                "SELECT id FROM players
                 WHERE id IN (SELECT cricket_player_id FROM performances)
                    OR id IN (SELECT player_id FROM player_history)
                 ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| row.get::<_, PlayerId>(0))?;
            let mut ids = Vec::new();
            for row in rows {
                ids.push(row?);
            }
            ids
        };
        let fresh_ids: Vec<Uuid> = player_ids.iter().map(|_| self.next_id()).collect();

        let count = self.write("PlayerHistory", |tx| {
            for (player_id, fresh_id) in player_ids.iter().zip(fresh_ids) {
                recompute_in(tx, player_id, fresh_id)?;
            }
            Ok(player_ids.len())
        })?;
        tracing::info!(count, "recomputed all player histories");
        Ok(count)
    }
}

impl Repository<PlayerHistory> for CricketDatabase {
    fn get(&self, id: &PlayerHistoryId) -> Result<PlayerHistory> {
        self.get_player_history(id)
    }

    fn create(&mut self, new: NewPlayerHistory) -> Result<PlayerHistory> {
        self.create_player_history(new)
    }

    fn update(&mut self, id: &PlayerHistoryId, patch: PlayerHistoryPatch) -> Result<PlayerHistory> {
        self.update_player_history(id, patch)
    }

    fn delete(&mut self, id: &PlayerHistoryId) -> Result<()> {
        self.delete_player_history(id)
    }

    fn list_by_parent(&self, player_id: &PlayerId) -> Result<Vec<PlayerHistory>> {
        Ok(self.history_for_player(player_id)?.into_iter().collect())
    }
}
