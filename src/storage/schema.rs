//! Database schema and connection management

use crate::config::{default_database_path, Settings};
use crate::error::{CricketError, Result};
use crate::scoring::ScoringRules;
use crate::types::{IdGenerator, RandomIdGenerator};
use rusqlite::{ffi, Connection, ErrorCode, ToSql, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection to the cricket database plus the policies applied on write.
pub struct CricketDatabase {
    pub(crate) conn: Connection,
    ids: Box<dyn IdGenerator>,
    pub(crate) scoring: ScoringRules,
}

impl CricketDatabase {
    /// Open the database at the default per-user location
    pub fn new() -> Result<Self> {
        Self::open(default_database_path()?)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::open(&settings.database_path)?.with_scoring(settings.scoring))
    }

    /// Open (or create) a database file and ensure tables exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!(path = %path.display(), "opening cricket database");
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let mut db = Self {
            conn,
            ids: Box::new(RandomIdGenerator),
            scoring: ScoringRules::default(),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Replace the id generator, e.g. with a deterministic one in tests
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn scoring(&self) -> ScoringRules {
        self.scoring
    }

    pub(crate) fn next_id(&self) -> Uuid {
        self.ids.next_id()
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // Teams: caller-keyed leaves
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id TEXT PRIMARY KEY CHECK (id <> ''),
                name TEXT NOT NULL CHECK (name <> ''),
                image_path TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY CHECK (id <> ''),
                team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                position TEXT NOT NULL,
                image_path TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                id TEXT PRIMARY KEY CHECK (id <> ''),
                home_team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
                away_team_id TEXT NOT NULL REFERENCES teams(id) ON DELETE RESTRICT,
                match_date TEXT NOT NULL,
                CHECK (home_team_id <> away_team_id)
            )",
            [],
        )?;

        // One pool per match
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pools (
                id TEXT PRIMARY KEY,
                cricket_match_id TEXT NOT NULL UNIQUE
                    REFERENCES matches(id) ON DELETE RESTRICT
            )",
            [],
        )?;

        // One performance per (match, player)
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS performances (
                id TEXT PRIMARY KEY,
                cricket_match_id TEXT NOT NULL REFERENCES matches(id) ON DELETE RESTRICT,
                cricket_player_id TEXT NOT NULL REFERENCES players(id) ON DELETE RESTRICT,
                runs INTEGER NOT NULL CHECK (runs >= 0),
                wickets INTEGER NOT NULL CHECK (wickets >= 0),
                catches INTEGER NOT NULL CHECK (catches >= 0),
                points INTEGER NOT NULL CHECK (points >= 0),
                UNIQUE (cricket_match_id, cricket_player_id)
            )",
            [],
        )?;

        // One aggregate row per player
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_history (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL UNIQUE REFERENCES players(id) ON DELETE RESTRICT,
                runs INTEGER NOT NULL CHECK (runs >= 0),
                wickets INTEGER NOT NULL CHECK (wickets >= 0),
                catches INTEGER NOT NULL CHECK (catches >= 0),
                points INTEGER NOT NULL CHECK (points >= 0)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS bet_options (
                id TEXT PRIMARY KEY,
                bet_name TEXT NOT NULL UNIQUE CHECK (bet_name <> '')
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS special_bets (
                id TEXT PRIMARY KEY,
                special_bet_id TEXT NOT NULL REFERENCES bet_options(id) ON DELETE RESTRICT,
                player_id TEXT NOT NULL REFERENCES players(id) ON DELETE RESTRICT
            )",
            [],
        )?;

        // Indexes for parent lookups
        self.conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
             CREATE INDEX IF NOT EXISTS idx_matches_home ON matches(home_team_id);
             CREATE INDEX IF NOT EXISTS idx_matches_away ON matches(away_team_id);
             CREATE INDEX IF NOT EXISTS idx_performances_player ON performances(cricket_player_id);
             CREATE INDEX IF NOT EXISTS idx_special_bets_player ON special_bets(player_id);
             CREATE INDEX IF NOT EXISTS idx_special_bets_option ON special_bets(special_bet_id);",
        )?;

        Ok(())
    }

    /// Run `f` inside an IMMEDIATE transaction. The write lock is taken up front,
    /// so validation and the write it guards are atomic against other connections.
    /// Nothing is committed when `f` fails.
    pub(crate) fn write<T>(
        &mut self,
        entity: &'static str,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if err.is_integrity_violation() {
                    tracing::warn!(entity, error = %err, "write rejected");
                } else {
                    tracing::error!(entity, error = %err, "write failed");
                }
                Err(err)
            }
        }
    }

    /// Clear all data from the database (children first)
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.write("*", |tx| {
            tx.execute_batch(
                "DELETE FROM special_bets;
                 DELETE FROM bet_options;
                 DELETE FROM player_history;
                 DELETE FROM performances;
                 DELETE FROM pools;
                 DELETE FROM matches;
                 DELETE FROM players;
                 DELETE FROM teams;",
            )?;
            Ok(())
        })
    }
}

/// True when a row with this primary key exists in `table`.
pub(crate) fn row_exists(conn: &Connection, table: &'static str, id: &dyn ToSql) -> Result<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
    Ok(conn.query_row(&sql, [id], |row| row.get(0))?)
}

/// Number of rows in `table` whose `column` equals `value`.
pub(crate) fn count_where(
    conn: &Connection,
    table: &'static str,
    column: &'static str,
    value: &dyn ToSql,
) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?1", table, column);
    Ok(conn.query_row(&sql, [value], |row| row.get(0))?)
}

/// Fail with `ForeignKeyViolation` unless `table` has a row with primary key `id`.
pub(crate) fn require_parent(
    conn: &Connection,
    entity: &'static str,
    field: &'static str,
    parent: &'static str,
    table: &'static str,
    id: &(impl ToSql + ToString),
) -> Result<()> {
    if !row_exists(conn, table, id)? {
        return Err(CricketError::ForeignKeyViolation {
            entity,
            field,
            parent,
            value: id.to_string(),
        });
    }
    Ok(())
}

/// Fail with `StillReferenced` if any row of `table` points at `id` through `column`.
pub(crate) fn require_unreferenced(
    conn: &Connection,
    entity: &'static str,
    id: &(impl ToSql + ToString),
    references: &[(&'static str, &'static str)],
) -> Result<()> {
    for &(table, column) in references {
        if count_where(conn, table, column, id)? > 0 {
            return Err(CricketError::StillReferenced {
                entity,
                id: id.to_string(),
                referenced_by: table,
            });
        }
    }
    Ok(())
}

/// Map a constraint failure raised by SQLite onto the matching domain error.
/// Checks run before each write, so reaching this means another writer won a race
/// or the schema caught something validation did not.
pub(crate) fn map_constraint(err: rusqlite::Error, entity: &'static str, key: &str) -> CricketError {
    let (code, message) = match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            (e.extended_code, msg.clone().unwrap_or_default())
        }
        _ => return CricketError::Database(err),
    };

    match code {
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => CricketError::ForeignKeyViolation {
            entity,
            field: "foreign key",
            parent: "parent row",
            value: key.to_string(),
        },
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            CricketError::UniqueConstraintViolation {
                entity,
                constraint: "unique key",
                value: key.to_string(),
            }
        }
        ffi::SQLITE_CONSTRAINT_CHECK => CricketError::InvalidValue {
            field: "check constraint",
            reason: message,
        },
        _ => CricketError::Database(err),
    }
}
