//! Bet options (reference data) and the special bets placed against them

use super::models::*;
use super::repository::Repository;
use super::schema::{map_constraint, require_parent, require_unreferenced, CricketDatabase};
use super::validate::require_non_empty;
use crate::error::{CricketError, Result};
use crate::types::{BetOptionId, PlayerId, SpecialBetId};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn bet_option_from_row(row: &Row) -> rusqlite::Result<BetOption> {
    Ok(BetOption {
        id: row.get(0)?,
        bet_name: row.get(1)?,
    })
}

fn special_bet_from_row(row: &Row) -> rusqlite::Result<SpecialBet> {
    Ok(SpecialBet {
        id: row.get(0)?,
        special_bet_id: row.get(1)?,
        player_id: row.get(2)?,
    })
}

fn load_bet_option(conn: &Connection, id: &BetOptionId) -> Result<BetOption> {
    conn.query_row(
        "SELECT id, bet_name FROM bet_options WHERE id = ?1",
        [id],
        bet_option_from_row,
    )
    .optional()?
    .ok_or_else(|| CricketError::not_found("BetOption", id))
}

fn fetch_bet_option_by_name(conn: &Connection, bet_name: &str) -> Result<Option<BetOption>> {
    Ok(conn
        .query_row(
            "SELECT id, bet_name FROM bet_options WHERE bet_name = ?1",
            [bet_name],
            bet_option_from_row,
        )
        .optional()?)
}

/// Bet names are unique; `except` allows a row to keep its own name.
fn check_bet_name(conn: &Connection, bet_name: &str, except: Option<&BetOptionId>) -> Result<()> {
    require_non_empty("betName", bet_name)?;
    if let Some(existing) = fetch_bet_option_by_name(conn, bet_name)? {
        if Some(&existing.id) != except {
            return Err(CricketError::UniqueConstraintViolation {
                entity: "BetOption",
                constraint: "betName",
                value: bet_name.to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn insert_bet_option(conn: &Connection, option: &BetOption) -> Result<()> {
    check_bet_name(conn, &option.bet_name, None)?;
    conn.execute(
        "INSERT INTO bet_options (id, bet_name) VALUES (?1, ?2)",
        params![option.id, option.bet_name],
    )
    .map_err(|e| map_constraint(e, "BetOption", &option.bet_name))?;
    Ok(())
}

fn load_special_bet(conn: &Connection, id: &SpecialBetId) -> Result<SpecialBet> {
    conn.query_row(
        "SELECT id, special_bet_id, player_id FROM special_bets WHERE id = ?1",
        [id],
        special_bet_from_row,
    )
    .optional()?
    .ok_or_else(|| CricketError::not_found("SpecialBet", id))
}

impl CricketDatabase {
    pub fn create_bet_option(&mut self, new: NewBetOption) -> Result<BetOption> {
        let option = BetOption {
            id: BetOptionId::new(self.next_id()),
            bet_name: new.bet_name,
        };
        self.write("BetOption", |tx| insert_bet_option(tx, &option))?;
        tracing::info!(bet_option_id = %option.id, bet_name = %option.bet_name, "created bet option");
        Ok(option)
    }

    pub fn get_bet_option(&self, id: &BetOptionId) -> Result<BetOption> {
        load_bet_option(&self.conn, id)
    }

    pub fn find_bet_option(&self, bet_name: &str) -> Result<Option<BetOption>> {
        fetch_bet_option_by_name(&self.conn, bet_name)
    }

    pub fn update_bet_option(&mut self, id: &BetOptionId, patch: BetOptionPatch) -> Result<BetOption> {
        let option = self.write("BetOption", |tx| {
            let mut option = load_bet_option(tx, id)?;
            if let Some(bet_name) = patch.bet_name {
                option.bet_name = bet_name;
            }
            check_bet_name(tx, &option.bet_name, Some(id))?;

            tx.execute(
                "UPDATE bet_options SET bet_name = ?2 WHERE id = ?1",
                params![option.id, option.bet_name],
            )
            .map_err(|e| map_constraint(e, "BetOption", &option.bet_name))?;
            Ok(option)
        })?;
        tracing::info!(bet_option_id = %id, bet_name = %option.bet_name, "renamed bet option");
        Ok(option)
    }

    /// Refuses while special bets were placed against the option.
    pub fn delete_bet_option(&mut self, id: &BetOptionId) -> Result<()> {
        self.write("BetOption", |tx| {
            load_bet_option(tx, id)?;
            require_unreferenced(tx, "BetOption", id, &[("special_bets", "special_bet_id")])?;
            tx.execute("DELETE FROM bet_options WHERE id = ?1", [id])?;
            Ok(())
        })?;
        tracing::info!(bet_option_id = %id, "deleted bet option");
        Ok(())
    }

    pub fn list_bet_options(&self) -> Result<Vec<BetOption>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, bet_name FROM bet_options ORDER BY bet_name")?;
        let rows = stmt.query_map([], bet_option_from_row)?;

        let mut options = Vec::new();
        for row in rows {
            options.push(row?);
        }
        Ok(options)
    }

    /// Place a bet on a player for a bet option. Both must exist.
    pub fn create_special_bet(&mut self, new: NewSpecialBet) -> Result<SpecialBet> {
        let bet = SpecialBet {
            id: SpecialBetId::new(self.next_id()),
            special_bet_id: new.special_bet_id,
            player_id: new.player_id,
        };

        self.write("SpecialBet", |tx| {
            require_parent(
                tx,
                "SpecialBet",
                "specialBetId",
                "BetOption",
                "bet_options",
                &bet.special_bet_id,
            )?;
            require_parent(tx, "SpecialBet", "playerId", "Player", "players", &bet.player_id)?;

            tx.execute(
                "INSERT INTO special_bets (id, special_bet_id, player_id) VALUES (?1, ?2, ?3)",
                params![bet.id, bet.special_bet_id, bet.player_id],
            )
            .map_err(|e| map_constraint(e, "SpecialBet", &bet.id.to_string()))?;
            Ok(())
        })?;
        tracing::info!(
            special_bet_id = %bet.id,
            bet_option_id = %bet.special_bet_id,
            player_id = %bet.player_id,
            "placed special bet"
        );
        Ok(bet)
    }

    pub fn get_special_bet(&self, id: &SpecialBetId) -> Result<SpecialBet> {
        load_special_bet(&self.conn, id)
    }

    /// Administrative removal of a recorded bet.
    pub fn delete_special_bet(&mut self, id: &SpecialBetId) -> Result<()> {
        self.write("SpecialBet", |tx| {
            let deleted = tx.execute("DELETE FROM special_bets WHERE id = ?1", [id])?;
            if deleted == 0 {
                return Err(CricketError::not_found("SpecialBet", id));
            }
            Ok(())
        })?;
        tracing::info!(special_bet_id = %id, "deleted special bet");
        Ok(())
    }

    pub fn special_bets_for_player(&self, player_id: &PlayerId) -> Result<Vec<SpecialBet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, special_bet_id, player_id FROM special_bets
             WHERE player_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map([player_id], special_bet_from_row)?;

        let mut bets = Vec::new();
        for row in rows {
            bets.push(row?);
        }
        Ok(bets)
    }

    pub fn special_bets_for_option(&self, option_id: &BetOptionId) -> Result<Vec<SpecialBet>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, special_bet_id, player_id FROM special_bets
             WHERE special_bet_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map([option_id], special_bet_from_row)?;

        let mut bets = Vec::new();
        for row in rows {
            bets.push(row?);
        }
        Ok(bets)
    }
}

impl Repository<BetOption> for CricketDatabase {
    fn get(&self, id: &BetOptionId) -> Result<BetOption> {
        self.get_bet_option(id)
    }

    fn create(&mut self, new: NewBetOption) -> Result<BetOption> {
        self.create_bet_option(new)
    }

    fn update(&mut self, id: &BetOptionId, patch: BetOptionPatch) -> Result<BetOption> {
        self.update_bet_option(id, patch)
    }

    fn delete(&mut self, id: &BetOptionId) -> Result<()> {
        self.delete_bet_option(id)
    }

    fn list_by_parent(&self, _parent: &()) -> Result<Vec<BetOption>> {
        self.list_bet_options()
    }
}

impl Repository<SpecialBet> for CricketDatabase {
    fn get(&self, id: &SpecialBetId) -> Result<SpecialBet> {
        self.get_special_bet(id)
    }

    fn create(&mut self, new: NewSpecialBet) -> Result<SpecialBet> {
        self.create_special_bet(new)
    }

    fn update(&mut self, _id: &SpecialBetId, patch: SpecialBetPatch) -> Result<SpecialBet> {
        match patch {}
    }

    fn delete(&mut self, id: &SpecialBetId) -> Result<()> {
        self.delete_special_bet(id)
    }

    fn list_by_parent(&self, player_id: &PlayerId) -> Result<Vec<SpecialBet>> {
        self.special_bets_for_player(player_id)
    }
}
