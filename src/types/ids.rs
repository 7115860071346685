//! ID types for the cricket data model.
//!
//! Teams, players and matches carry caller-supplied string keys. Every other
//! record is keyed by a generated UUID (see [`super::idgen`]).

use crate::error::{CricketError, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! external_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Rejects blank keys; stored keys are never empty.
            pub fn validate(&self) -> Result<()> {
                if self.0.trim().is_empty() {
                    return Err(CricketError::invalid($label, "must not be empty"));
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CricketError;

            fn from_str(s: &str) -> Result<Self> {
                let id = Self(s.to_string());
                id.validate()?;
                Ok(id)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                String::column_result(value).map(Self)
            }
        }
    };
}

macro_rules! generated_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = CricketError;

            fn from_str(s: &str) -> Result<Self> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| CricketError::invalid(stringify!($name), e.to_string()))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0.hyphenated().to_string()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                Uuid::parse_str(text)
                    .map(Self)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

external_id!(
    /// Caller-supplied team key, e.g. `"t1"`.
    ///
    /// ```rust
    /// use cricket_fantasy::TeamId;
    ///
    /// let id: TeamId = "t1".parse().unwrap();
    /// assert_eq!(id.as_str(), "t1");
    /// assert!("  ".parse::<TeamId>().is_err());
    /// ```
    TeamId,
    "teamId"
);
external_id!(
    /// Caller-supplied player key.
    PlayerId,
    "playerId"
);
external_id!(
    /// Caller-supplied match key.
    MatchId,
    "matchId"
);

generated_id!(PoolId);
generated_id!(PerformanceId);
generated_id!(PlayerHistoryId);
generated_id!(BetOptionId);
generated_id!(SpecialBetId);
