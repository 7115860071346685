//! Runtime settings: where the database lives and how points are scored.

use crate::error::{CricketError, Result};
use crate::scoring::ScoringRules;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const DATABASE_PATH_ENV_VAR: &str = "CRICKET_FANTASY_DB";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub scoring: ScoringRules,
}

impl Settings {
    /// Resolve settings. An explicit path wins over the environment, which
    /// wins over the per-user data directory.
    pub fn resolve(database_path: Option<PathBuf>, scoring_file: Option<&Path>) -> Result<Self> {
        let database_path = match database_path {
            Some(path) => path,
            None => match std::env::var_os(DATABASE_PATH_ENV_VAR) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => default_database_path()?,
            },
        };

        let scoring = match scoring_file {
            Some(path) => ScoringRules::from_json_file(path)?,
            None => ScoringRules::default(),
        };

        Ok(Self {
            database_path,
            scoring,
        })
    }
}

/// `<data dir>/cricket-fantasy/cricket.db`
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| CricketError::Config {
        message: "Could not determine data directory".to_string(),
    })?;
    Ok(data_dir.join("cricket-fantasy").join("cricket.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_path_wins() {
        let settings = Settings::resolve(Some(PathBuf::from("/tmp/x.db")), None).unwrap();
        assert_eq!(settings.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(settings.scoring, ScoringRules::default());
    }

    #[test]
    fn test_scoring_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"catch": 8}}"#).unwrap();

        let settings =
            Settings::resolve(Some(PathBuf::from("db.sqlite")), Some(file.path())).unwrap();
        assert_eq!(settings.scoring.catch, 8);
    }

    #[test]
    fn test_missing_scoring_file_is_an_error() {
        let result = Settings::resolve(
            Some(PathBuf::from("db.sqlite")),
            Some(Path::new("/definitely/not/here.json")),
        );
        assert!(matches!(result, Err(CricketError::Io(_))));
    }
}
