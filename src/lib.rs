//! Calcutta Core - standings and payout engine for tournament betting pools.
//!
//! Ranks pool competitors by their returns, splits payouts across ties to the
//! cent, and projects standings for every possible Final Four finish. Python
//! bindings are available via PyO3 with the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod outcomes;
pub mod pool;
pub mod returns;
pub mod scoring;
pub mod standings;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use config::{PayoutEntry, PoolConfig};
pub use constants::{ELITE_EIGHT_CAP, SEMIFINAL_1, SEMIFINAL_2, TIE_EPSILON};
pub use error::{PoolError, Result};
pub use outcomes::{compute_outcomes, enumerate_scenarios, Bracket, BracketGame, Outcome, Scenario};
pub use pool::PoolState;
pub use returns::{
    OwnershipDetail, OwnershipIndex, OwnershipSummary, ProgressBaseline, SkippedReferences,
};
pub use scoring::{points_for_progress, ScoringRule, ScoringRules};
pub use standings::{
    compute_standings, tie_groups, Competitor, PayoutSchedule, PortfolioStatus, Standing,
    TieGroup,
};
pub use team::TeamProgress;
