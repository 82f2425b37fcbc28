//! Pool configuration loaded from TOML.
//!
//! ```toml
//! progress_cap = 5
//!
//! [[scoring]]
//! threshold = 2
//! points = 7.75
//!
//! [[payouts]]
//! position = 1
//! cents = 50000
//! ```

use serde::Deserialize;
use std::fs;

use crate::constants::{DEFAULT_SCORING_AWARDS, ELITE_EIGHT_CAP};
use crate::error::{PoolError, Result};
use crate::scoring::{ScoringRule, ScoringRules};
use crate::standings::PayoutSchedule;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct PayoutEntry {
    pub position: u32,
    pub cents: i64,
}

/// Scoring, payout and bracket-shape settings for one pool.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PoolConfig {
    /// Most progress a team can have before the Final Four. Depends on the
    /// bracket shape; 5 for the NCAA field.
    #[serde(default = "default_progress_cap")]
    pub progress_cap: u32,

    #[serde(default = "default_scoring")]
    pub scoring: Vec<ScoringRule>,

    #[serde(default)]
    pub payouts: Vec<PayoutEntry>,
}

fn default_progress_cap() -> u32 {
    ELITE_EIGHT_CAP
}

fn default_scoring() -> Vec<ScoringRule> {
    DEFAULT_SCORING_AWARDS
        .iter()
        .map(|&(threshold, points)| ScoringRule { threshold, points })
        .collect()
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            progress_cap: default_progress_cap(),
            scoring: default_scoring(),
            payouts: Vec::new(),
        }
    }
}

impl PoolConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated scoring table
    pub fn scoring_rules(&self) -> Result<ScoringRules> {
        ScoringRules::new(self.scoring.clone())
    }

    /// Validated payout schedule
    pub fn payout_schedule(&self) -> Result<PayoutSchedule> {
        PayoutSchedule::new(self.payouts.iter().map(|p| (p.position, p.cents)))
    }
}
