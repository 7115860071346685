//! Team records

use super::models::*;
use super::repository::Repository;
use super::schema::{map_constraint, require_unreferenced, row_exists, CricketDatabase};
use super::validate::require_non_empty;
use crate::error::{CricketError, Result};
use crate::types::TeamId;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn team_from_row(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        image_path: row.get(2)?,
    })
}

pub(crate) fn fetch_team(conn: &Connection, id: &TeamId) -> Result<Option<Team>> {
    Ok(conn
        .query_row(
            "SELECT id, name, image_path FROM teams WHERE id = ?1",
            [id],
            team_from_row,
        )
        .optional()?)
}

pub(crate) fn load_team(conn: &Connection, id: &TeamId) -> Result<Team> {
    fetch_team(conn, id)?.ok_or_else(|| CricketError::not_found("Team", id))
}

fn validate_team(team: &Team) -> Result<()> {
    team.id.validate()?;
    require_non_empty("name", &team.name)
}

pub(crate) fn insert_team(conn: &Connection, team: &Team) -> Result<()> {
    validate_team(team)?;

    if row_exists(conn, "teams", &team.id)? {
        return Err(CricketError::UniqueConstraintViolation {
            entity: "Team",
            constraint: "id",
            value: team.id.to_string(),
        });
    }

    conn.execute(
        "INSERT INTO teams (id, name, image_path) VALUES (?1, ?2, ?3)",
        params![team.id, team.name, team.image_path],
    )
    .map_err(|e| map_constraint(e, "Team", team.id.as_str()))?;
    Ok(())
}

impl CricketDatabase {
    pub fn create_team(&mut self, team: Team) -> Result<Team> {
        self.write("Team", |tx| insert_team(tx, &team))?;
        tracing::info!(team_id = %team.id, name = %team.name, "created team");
        Ok(team)
    }

    pub fn get_team(&self, id: &TeamId) -> Result<Team> {
        tracing::debug!(team_id = %id, "loading team");
        load_team(&self.conn, id)
    }

    pub fn update_team(&mut self, id: &TeamId, patch: TeamPatch) -> Result<Team> {
        let team = self.write("Team", |tx| {
            let mut team = load_team(tx, id)?;
            if let Some(name) = patch.name {
                team.name = name;
            }
            if let Some(image_path) = patch.image_path {
                team.image_path = image_path;
            }
            validate_team(&team)?;

            tx.execute(
                "UPDATE teams SET name = ?2, image_path = ?3 WHERE id = ?1",
                params![team.id, team.name, team.image_path],
            )
            .map_err(|e| map_constraint(e, "Team", id.as_str()))?;
            Ok(team)
        })?;
        tracing::info!(team_id = %id, "updated team");
        Ok(team)
    }

    /// Refuses while any player or match still points at the team.
    pub fn delete_team(&mut self, id: &TeamId) -> Result<()> {
        self.write("Team", |tx| {
            if !row_exists(tx, "teams", id)? {
                return Err(CricketError::not_found("Team", id));
            }
            require_unreferenced(
                tx,
                "Team",
                id,
                &[
                    ("players", "team_id"),
                    ("matches", "home_team_id"),
                    ("matches", "away_team_id"),
                ],
            )?;
            tx.execute("DELETE FROM teams WHERE id = ?1", [id])
                .map_err(|e| map_constraint(e, "Team", id.as_str()))?;
            Ok(())
        })?;
        tracing::info!(team_id = %id, "deleted team");
        Ok(())
    }

    /// All teams, ordered by name
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, image_path FROM teams ORDER BY name, id")?;
        let rows = stmt.query_map([], team_from_row)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }
}

impl Repository<Team> for CricketDatabase {
    fn get(&self, id: &TeamId) -> Result<Team> {
        self.get_team(id)
    }

    fn create(&mut self, new: Team) -> Result<Team> {
        self.create_team(new)
    }

    fn update(&mut self, id: &TeamId, patch: TeamPatch) -> Result<Team> {
        self.update_team(id, patch)
    }

    fn delete(&mut self, id: &TeamId) -> Result<()> {
        self.delete_team(id)
    }

    fn list_by_parent(&self, _parent: &()) -> Result<Vec<Team>> {
        self.list_teams()
    }
}
