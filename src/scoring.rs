use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::DEFAULT_SCORING_AWARDS;
use crate::error::{PoolError, Result};

/// Points awarded once a team's progress reaches `threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub threshold: u32,
    pub points: f64,
}

/// A pool's scoring table, sorted by threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoringRules {
    rules: Vec<ScoringRule>,
}

impl ScoringRules {
    /// Build a rule table, rejecting repeated thresholds and negative awards.
    ///
    /// Non-negative awards keep `points_for_progress` monotonic.
    pub fn new(rules: Vec<ScoringRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.threshold) {
                return Err(PoolError::DuplicateScoringThreshold(rule.threshold));
            }
            if rule.points < 0.0 {
                return Err(PoolError::NegativeScoringPoints {
                    threshold: rule.threshold,
                    points: rule.points,
                });
            }
        }

        let mut rules = rules;
        rules.sort_by_key(|r| r.threshold);
        Ok(ScoringRules { rules })
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules {
            rules: DEFAULT_SCORING_AWARDS
                .iter()
                .map(|&(threshold, points)| ScoringRule { threshold, points })
                .collect(),
        }
    }
}

/// Total points earned by a team at `progress + extra`.
///
/// `extra` is progress that has not happened yet (hypothetical wins layered
/// on the actual baseline). Every rule whose threshold has been reached
/// contributes its award.
pub fn points_for_progress(rules: &ScoringRules, progress: u32, extra: u32) -> f64 {
    let effective = progress + extra;
    rules
        .rules
        .iter()
        .take_while(|r| r.threshold <= effective)
        .map(|r| r.points)
        .sum()
}
