//! Error types for the cricket fantasy data model

use thiserror::Error;


pub type Result<T> = std::result::Result<T, CricketError>;

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity}.{field} references missing {parent} '{value}'")]
    ForeignKeyViolation {
        entity: &'static str,
        field: &'static str,
        parent: &'static str,
        value: String,
    },

    #[error("{entity} violates unique constraint {constraint}: {value}")]
    UniqueConstraintViolation {
        entity: &'static str,
        constraint: &'static str,
        value: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Match home and away team must differ (both are '{team_id}')")]
    InvalidMatchTeams { team_id: String },

    #[error("{entity} '{id}' is still referenced by {referenced_by}")]
    StillReferenced {
        entity: &'static str,
        id: String,
        referenced_by: &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CricketError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CricketError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CricketError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// True for the integrity kinds a caller can act on, as opposed to storage failures.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            CricketError::ForeignKeyViolation { .. }
                | CricketError::UniqueConstraintViolation { .. }
                | CricketError::InvalidValue { .. }
                | CricketError::InvalidMatchTeams { .. }
                | CricketError::StillReferenced { .. }
        )
    }
}
