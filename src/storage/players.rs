//! Player records

use super::models::*;
use super::repository::Repository;
use super::schema::{
    map_constraint, require_parent, require_unreferenced, row_exists, CricketDatabase,
};
use super::teams::load_team;
use crate::error::{CricketError, Result};
use crate::types::{PlayerId, TeamId};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn player_from_row(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        team_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        position: row.get(4)?,
        image_path: row.get(5)?,
    })
}

pub(crate) fn fetch_player(conn: &Connection, id: &PlayerId) -> Result<Option<Player>> {
    Ok(conn
        .query_row(
            "SELECT id, team_id, first_name, last_name, position, image_path
             FROM players WHERE id = ?1",
            [id],
            player_from_row,
        )
        .optional()?)
}

pub(crate) fn load_player(conn: &Connection, id: &PlayerId) -> Result<Player> {
    fetch_player(conn, id)?.ok_or_else(|| CricketError::not_found("Player", id))
}

/// Key checks plus the team reference.
fn validate_player(conn: &Connection, player: &Player) -> Result<()> {
    player.id.validate()?;
    player.team_id.validate()?;
    require_parent(conn, "Player", "teamId", "Team", "teams", &player.team_id)
}

pub(crate) fn insert_player(conn: &Connection, player: &Player) -> Result<()> {
    validate_player(conn, player)?;

    if row_exists(conn, "players", &player.id)? {
        return Err(CricketError::UniqueConstraintViolation {
            entity: "Player",
            constraint: "id",
            value: player.id.to_string(),
        });
    }

    conn.execute(
        "INSERT INTO players (id, team_id, first_name, last_name, position, image_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            player.id,
            player.team_id,
            player.first_name,
            player.last_name,
            player.position,
            player.image_path
        ],
    )
    .map_err(|e| map_constraint(e, "Player", player.id.as_str()))?;
    Ok(())
}

impl CricketDatabase {
    pub fn create_player(&mut self, player: Player) -> Result<Player> {
        self.write("Player", |tx| insert_player(tx, &player))?;
        tracing::info!(player_id = %player.id, team_id = %player.team_id, "created player");
        Ok(player)
    }

    pub fn get_player(&self, id: &PlayerId) -> Result<Player> {
        tracing::debug!(player_id = %id, "loading player");
        load_player(&self.conn, id)
    }

    /// Also used to transfer a player: a new `team_id` must resolve.
    pub fn update_player(&mut self, id: &PlayerId, patch: PlayerPatch) -> Result<Player> {
        let player = self.write("Player", |tx| {
            let mut player = load_player(tx, id)?;
            if let Some(team_id) = patch.team_id {
                player.team_id = team_id;
            }
            if let Some(first_name) = patch.first_name {
                player.first_name = first_name;
            }
            if let Some(last_name) = patch.last_name {
                player.last_name = last_name;
            }
            if let Some(position) = patch.position {
                player.position = position;
            }
            if let Some(image_path) = patch.image_path {
                player.image_path = image_path;
            }
            validate_player(tx, &player)?;

            tx.execute(
                "UPDATE players
                 SET team_id = ?2, first_name = ?3, last_name = ?4, position = ?5, image_path = ?6
                 WHERE id = ?1",
                params![
                    player.id,
                    player.team_id,
                    player.first_name,
                    player.last_name,
                    player.position,
                    player.image_path
                ],
            )
            .map_err(|e| map_constraint(e, "Player", id.as_str()))?;
            Ok(player)
        })?;
        tracing::info!(player_id = %id, team_id = %player.team_id, "updated player");
        Ok(player)
    }

    /// Refuses while performances or special bets reference the player.
    /// The player's derived history row goes with it.
    pub fn delete_player(&mut self, id: &PlayerId) -> Result<()> {
        self.write("Player", |tx| {
            if !row_exists(tx, "players", id)? {
                return Err(CricketError::not_found("Player", id));
            }
            require_unreferenced(
                tx,
                "Player",
                id,
                &[
                    ("performances", "cricket_player_id"),
                    ("special_bets", "player_id"),
                ],
            )?;
            tx.execute("DELETE FROM player_history WHERE player_id = ?1", [id])?;
            tx.execute("DELETE FROM players WHERE id = ?1", [id])
                .map_err(|e| map_constraint(e, "Player", id.as_str()))?;
            Ok(())
        })?;
        tracing::info!(player_id = %id, "deleted player");
        Ok(())
    }

    /// Players on a team, by surname
    pub fn list_players_by_team(&self, team_id: &TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, first_name, last_name, position, image_path
             FROM players WHERE team_id = ?1
             ORDER BY last_name, first_name, id",
        )?;
        let rows = stmt.query_map([team_id], player_from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Like `list_players_by_team`, but an unknown team is `NotFound` rather than empty.
    pub fn team_roster(&self, team_id: &TeamId) -> Result<Vec<Player>> {
        load_team(&self.conn, team_id)?;
        self.list_players_by_team(team_id)
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, first_name, last_name, position, image_path
             FROM players ORDER BY last_name, first_name, id",
        )?;
        let rows = stmt.query_map([], player_from_row)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }
}

impl Repository<Player> for CricketDatabase {
    fn get(&self, id: &PlayerId) -> Result<Player> {
        self.get_player(id)
    }

    fn create(&mut self, new: Player) -> Result<Player> {
        self.create_player(new)
    }

    fn update(&mut self, id: &PlayerId, patch: PlayerPatch) -> Result<Player> {
        self.update_player(id, patch)
    }

    fn delete(&mut self, id: &PlayerId) -> Result<()> {
        self.delete_player(id)
    }

    fn list_by_parent(&self, team_id: &TeamId) -> Result<Vec<Player>> {
        self.list_players_by_team(team_id)
    }
}
