use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::constants::ELITE_EIGHT_CAP;
use crate::error::Result;
use crate::returns::{OwnershipDetail, OwnershipIndex, OwnershipSummary, ProgressBaseline};
use crate::scoring::ScoringRules;
use crate::standings::{compute_standings, Competitor, PayoutSchedule, Standing};
use crate::team::TeamProgress;

/// Everything a standings computation reads about a pool.
#[derive(Clone, Debug)]
pub struct PoolState {
    pub competitors: Vec<Competitor>,

    pub summaries: Vec<OwnershipSummary>,

    pub details: Vec<OwnershipDetail>,

    /// Current wins/byes for every team in the field
    pub teams: Vec<TeamProgress>,

    pub scoring: ScoringRules,

    pub payouts: PayoutSchedule,

    /// Baseline progress cap applied before hypothetical Final Four wins
    pub progress_cap: u32,
}

impl PoolState {
    pub fn new(
        competitors: Vec<Competitor>,
        summaries: Vec<OwnershipSummary>,
        details: Vec<OwnershipDetail>,
        teams: Vec<TeamProgress>,
        scoring: ScoringRules,
        payouts: PayoutSchedule,
    ) -> Self {
        PoolState {
            competitors,
            summaries,
            details,
            teams,
            scoring,
            payouts,
            progress_cap: ELITE_EIGHT_CAP,
        }
    }

    /// Build a pool whose scoring, payouts and cap come from `config`.
    pub fn from_config(
        config: &PoolConfig,
        competitors: Vec<Competitor>,
        summaries: Vec<OwnershipSummary>,
        details: Vec<OwnershipDetail>,
        teams: Vec<TeamProgress>,
    ) -> Result<Self> {
        Ok(PoolState {
            competitors,
            summaries,
            details,
            teams,
            scoring: config.scoring_rules()?,
            payouts: config.payout_schedule()?,
            progress_cap: config.progress_cap,
        })
    }

    pub fn index(&self) -> OwnershipIndex<'_> {
        OwnershipIndex::new(&self.competitors, &self.summaries, &self.teams)
    }

    /// Raw returns from actual (uncapped) team progress.
    pub fn current_returns(&self) -> HashMap<String, f64> {
        let (returns, skipped) = self.index().compute_returns(
            &self.details,
            &self.scoring,
            ProgressBaseline::Actual,
            &HashMap::new(),
        );
        if !skipped.is_empty() {
            warn!(
                unknown_summary = skipped.unknown_summary,
                unknown_competitor = skipped.unknown_competitor,
                unknown_team = skipped.unknown_team,
                "Skipped unresolvable ownership details"
            );
        }
        returns
    }

    /// Standings for the tournament as it actually stands.
    pub fn current_standings(&self) -> Vec<Standing> {
        let returns = self.current_returns();
        let standings =
            compute_standings(Some(self.competitors.as_slice()), &returns, &self.payouts)
                .unwrap_or_default();
        debug!(competitors = standings.len(), "Computed current standings");
        standings
    }

    /// Create a modified copy with a different baseline progress cap
    pub fn with_progress_cap(&self, progress_cap: u32) -> Self {
        let mut new_state = self.clone();
        new_state.progress_cap = progress_cap;
        new_state
    }
}
