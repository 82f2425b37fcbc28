use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::scoring::{points_for_progress, ScoringRules};
use crate::standings::Competitor;
use crate::team::TeamProgress;

/// Links an ownership summary to the portfolio (competitor) it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnershipSummary {
    pub id: String,
    pub portfolio_id: String,
}

/// Fraction of a team held through an ownership summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnershipDetail {
    pub summary_id: String,
    pub team_id: String,
    /// Share of the team in [0, 1]
    pub fraction: f64,
}

/// Which progress a team is scored from before any hypothetical wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressBaseline {
    /// Actual wins + byes
    Actual,
    /// Actual wins + byes, clamped to the given cap
    Capped(u32),
}

impl ProgressBaseline {
    fn progress(self, team: &TeamProgress) -> u32 {
        match self {
            ProgressBaseline::Actual => team.progress(),
            ProgressBaseline::Capped(cap) => team.capped_progress(cap),
        }
    }
}

/// Ownership details left out of a returns computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SkippedReferences {
    /// Detail points at a summary id that does not exist
    pub unknown_summary: usize,
    /// Summary points at a portfolio that is not a competitor
    pub unknown_competitor: usize,
    pub unknown_team: usize,
}

impl SkippedReferences {
    pub fn total(&self) -> usize {
        self.unknown_summary + self.unknown_competitor + self.unknown_team
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Lookups from ownership details to competitors and teams.
///
/// Built once per pool and shared by every returns computation over it.
pub struct OwnershipIndex<'a> {
    summary_owner: HashMap<&'a str, &'a str>,
    competitor_ids: HashSet<&'a str>,
    teams: HashMap<&'a str, &'a TeamProgress>,
}

impl<'a> OwnershipIndex<'a> {
    pub fn new(
        competitors: &'a [Competitor],
        summaries: &'a [OwnershipSummary],
        teams: &'a [TeamProgress],
    ) -> Self {
        OwnershipIndex {
            summary_owner: summaries
                .iter()
                .map(|s| (s.id.as_str(), s.portfolio_id.as_str()))
                .collect(),
            competitor_ids: competitors.iter().map(|c| c.id.as_str()).collect(),
            teams: teams.iter().map(|t| (t.id.as_str(), t)).collect(),
        }
    }

    /// Competitor id owning a summary, if both exist.
    fn owner(&self, summary_id: &str) -> Result<&'a str, Unresolved> {
        let portfolio_id = *self
            .summary_owner
            .get(summary_id)
            .ok_or(Unresolved::Summary)?;
        if self.competitor_ids.contains(portfolio_id) {
            Ok(portfolio_id)
        } else {
            Err(Unresolved::Competitor)
        }
    }

    /// Raw return per competitor.
    ///
    /// Each detail contributes `fraction * points(baseline + increment)` for
    /// its team. Details that cannot be resolved are skipped and counted.
    /// Every known competitor gets an entry, even if it owns nothing.
    ///
    /// # Arguments
    /// * `details` - Ownership details, accumulated in slice order
    /// * `rules` - Scoring table
    /// * `baseline` - Whether actual progress is capped first
    /// * `increments` - Hypothetical extra progress per team id
    pub fn compute_returns(
        &self,
        details: &[OwnershipDetail],
        rules: &ScoringRules,
        baseline: ProgressBaseline,
        increments: &HashMap<&str, u32>,
    ) -> (HashMap<String, f64>, SkippedReferences) {
        let mut returns: HashMap<String, f64> = self
            .competitor_ids
            .iter()
            .map(|id| (id.to_string(), 0.0))
            .collect();
        let mut skipped = SkippedReferences::default();

        for detail in details {
            let owner = match self.owner(&detail.summary_id) {
                Ok(owner) => owner,
                Err(Unresolved::Summary) => {
                    skipped.unknown_summary += 1;
                    continue;
                }
                Err(Unresolved::Competitor) => {
                    skipped.unknown_competitor += 1;
                    continue;
                }
            };
            let Some(team) = self.teams.get(detail.team_id.as_str()) else {
                skipped.unknown_team += 1;
                continue;
            };

            let extra = increments.get(detail.team_id.as_str()).copied().unwrap_or(0);
            let points = points_for_progress(rules, baseline.progress(team), extra);
            *returns.entry(owner.to_string()).or_insert(0.0) += points * detail.fraction;
        }

        (returns, skipped)
    }
}

enum Unresolved {
    Summary,
    Competitor,
}
