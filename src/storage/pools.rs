//! Betting pools, one per match

use super::models::*;
use super::repository::Repository;
use super::schema::{map_constraint, require_parent, CricketDatabase};
use crate::error::{CricketError, Result};
use crate::types::{MatchId, PoolId};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn pool_from_row(row: &Row) -> rusqlite::Result<Pool> {
    Ok(Pool {
        id: row.get(0)?,
        cricket_match_id: row.get(1)?,
    })
}

pub(crate) fn fetch_pool_for_match(conn: &Connection, match_id: &MatchId) -> Result<Option<Pool>> {
    Ok(conn
        .query_row(
            "SELECT id, cricket_match_id FROM pools WHERE cricket_match_id = ?1",
            [match_id],
            pool_from_row,
        )
        .optional()?)
}

fn load_pool(conn: &Connection, id: &PoolId) -> Result<Pool> {
    conn.query_row(
        "SELECT id, cricket_match_id FROM pools WHERE id = ?1",
        [id],
        pool_from_row,
    )
    .optional()?
    .ok_or_else(|| CricketError::not_found("Pool", id))
}

/// The match must exist and must not already have a pool (other than `except`).
fn check_pool_slot(conn: &Connection, match_id: &MatchId, except: Option<&PoolId>) -> Result<()> {
    require_parent(conn, "Pool", "cricketMatchId", "Match", "matches", match_id)?;

    if let Some(existing) = fetch_pool_for_match(conn, match_id)? {
        if Some(&existing.id) != except {
            return Err(CricketError::UniqueConstraintViolation {
                entity: "Pool",
                constraint: "one pool per match",
                value: match_id.to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn insert_pool(conn: &Connection, pool: &Pool) -> Result<()> {
    check_pool_slot(conn, &pool.cricket_match_id, None)?;

    conn.execute(
        "INSERT INTO pools (id, cricket_match_id) VALUES (?1, ?2)",
        params![pool.id, pool.cricket_match_id],
    )
    .map_err(|e| map_constraint(e, "Pool", pool.cricket_match_id.as_str()))?;
    Ok(())
}

impl CricketDatabase {
    /// Open the betting pool for a match.
    pub fn create_pool(&mut self, new: NewPool) -> Result<Pool> {
        let pool = Pool {
            id: PoolId::new(self.next_id()),
            cricket_match_id: new.cricket_match_id,
        };
        self.write("Pool", |tx| insert_pool(tx, &pool))?;
        tracing::info!(pool_id = %pool.id, match_id = %pool.cricket_match_id, "opened pool");
        Ok(pool)
    }

    pub fn get_pool(&self, id: &PoolId) -> Result<Pool> {
        tracing::debug!(pool_id = %id, "loading pool");
        load_pool(&self.conn, id)
    }

    /// `None` until a pool is opened for the match.
    pub fn pool_for_match(&self, match_id: &MatchId) -> Result<Option<Pool>> {
        fetch_pool_for_match(&self.conn, match_id)
    }

    /// Reassign a pool to another match; the target must have no pool of its own.
    ///
    /// This is an administrative correction for a pool opened against the wrong
    /// match. The pool keeps its id, and no second pool is ever created for a match.
    pub fn update_pool(&mut self, id: &PoolId, patch: PoolPatch) -> Result<Pool> {
        let pool = self.write("Pool", |tx| {
            let mut pool = load_pool(tx, id)?;
            if let Some(match_id) = patch.cricket_match_id {
                pool.cricket_match_id = match_id;
            }
            check_pool_slot(tx, &pool.cricket_match_id, Some(id))?;

            tx.execute(
                "UPDATE pools SET cricket_match_id = ?2 WHERE id = ?1",
                params![pool.id, pool.cricket_match_id],
            )
            .map_err(|e| map_constraint(e, "Pool", pool.cricket_match_id.as_str()))?;
            Ok(pool)
        })?;
        tracing::info!(pool_id = %id, match_id = %pool.cricket_match_id, "updated pool");
        Ok(pool)
    }

    pub fn delete_pool(&mut self, id: &PoolId) -> Result<()> {
        self.write("Pool", |tx| {
            let deleted = tx.execute("DELETE FROM pools WHERE id = ?1", [id])?;
            if deleted == 0 {
                return Err(CricketError::not_found("Pool", id));
            }
            Ok(())
        })?;
        tracing::info!(pool_id = %id, "deleted pool");
        Ok(())
    }
}

impl Repository<Pool> for CricketDatabase {
    fn get(&self, id: &PoolId) -> Result<Pool> {
        self.get_pool(id)
    }

    fn create(&mut self, new: NewPool) -> Result<Pool> {
        self.create_pool(new)
    }

    fn update(&mut self, id: &PoolId, patch: PoolPatch) -> Result<Pool> {
        self.update_pool(id, patch)
    }

    fn delete(&mut self, id: &PoolId) -> Result<()> {
        self.delete_pool(id)
    }

    fn list_by_parent(&self, match_id: &MatchId) -> Result<Vec<Pool>> {
        Ok(self.pool_for_match(match_id)?.into_iter().collect())
    }
}
