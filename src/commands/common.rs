//! Common utilities and helper functions shared across commands.

use crate::{config::Settings, storage::CricketDatabase, Result};
use serde::Serialize;

/// Resources needed by every command
pub struct CommandContext {
    pub db: CricketDatabase,
    pub as_json: bool,
}

impl CommandContext {
    pub fn new(settings: &Settings, as_json: bool) -> Result<Self> {
        tracing::debug!(path = %settings.database_path.display(), "connecting to database");
        let db = CricketDatabase::from_settings(settings)?;
        Ok(Self { db, as_json })
    }

    /// Print `value` as pretty JSON, or as the text lines `render` produces.
    pub fn emit<T: Serialize>(&self, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
        if self.as_json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }
}

pub(crate) fn lines<T>(items: &[T], line: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}
