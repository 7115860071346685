//! Fantasy points for a single match performance.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Points awarded per unit of each statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringRules {
    pub run: u32,
    pub wicket: u32,
    pub catch: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            run: 1,
            wicket: 20,
            catch: 5,
        }
    }
}

impl ScoringRules {
    /// Load rules from a JSON file; missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn points_for(&self, runs: u32, wickets: u32, catches: u32) -> u32 {
        let total = u64::from(runs) * u64::from(self.run)
            + u64::from(wickets) * u64::from(self.wicket)
            + u64::from(catches) * u64::from(self.catch);
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}
