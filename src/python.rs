//! Python bindings, built with the `python` feature.
//!
//! `Competitor`, `Standing` and `Outcome` are exposed directly as Python
//! classes; this module adds their constructors, reprs and the functions.

use chrono::{DateTime, Utc};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::constants::{ELITE_EIGHT_CAP, SEMIFINAL_1, SEMIFINAL_2, TIE_EPSILON};
use crate::error::PoolError;
use crate::outcomes::{compute_outcomes, Bracket, BracketGame, Outcome};
use crate::pool::PoolState;
use crate::returns::{OwnershipDetail, OwnershipSummary};
use crate::scoring::{ScoringRule, ScoringRules};
use crate::standings::{compute_standings, Competitor, PayoutSchedule, PortfolioStatus, Standing};
use crate::team::TeamProgress;

impl From<PoolError> for PyErr {
    fn from(err: PoolError) -> PyErr {
        match err {
            PoolError::Io { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[pymethods]
impl Competitor {
    #[new]
    #[pyo3(signature = (id, name, created_at, status = PortfolioStatus::Active))]
    fn py_new(id: String, name: String, created_at: DateTime<Utc>, status: PortfolioStatus) -> Self {
        Competitor {
            status,
            ..Competitor::new(id, name, created_at)
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Competitor({:?}, {:?}, {})",
            self.id,
            self.name,
            self.created_at.to_rfc3339()
        )
    }
}

#[pymethods]
impl Standing {
    fn __repr__(&self) -> String {
        format!(
            "Standing({}, position={}{}, returns={:.4}, payout={})",
            self.competitor_id,
            if self.is_tied { "T" } else { "" },
            self.finish_position,
            self.total_returns,
            self.payout_cents
        )
    }
}

#[pymethods]
impl Outcome {
    fn __repr__(&self) -> String {
        format!(
            "Outcome(champion={}, runner_up={}, {} standings)",
            self.champion,
            self.runner_up,
            self.standings.len()
        )
    }
}

/// Rank competitors and split payouts.
#[pyfunction]
#[pyo3(name = "compute_standings")]
fn py_compute_standings(
    competitors: Option<Vec<Competitor>>,
    returns: HashMap<String, f64>,
    payouts: HashMap<u32, i64>,
) -> PyResult<Option<Vec<Standing>>> {
    let payouts = PayoutSchedule::new(payouts)?;
    Ok(compute_standings(competitors.as_deref(), &returns, &payouts))
}

/// Standings for every Final Four finish.
///
/// `bracket` maps game names to their two (optional) team ids; only
/// "final_four-1" and "final_four-2" are read. `summaries` maps summary id to
/// competitor id, `details` are (summary_id, team_id, fraction) triples and
/// `teams` maps team id to (wins, byes).
#[pyfunction]
#[pyo3(
    name = "compute_outcomes",
    signature = (bracket, competitors, summaries, details, teams, scoring, payouts, progress_cap = ELITE_EIGHT_CAP)
)]
#[allow(clippy::too_many_arguments)]
fn py_compute_outcomes(
    bracket: Option<HashMap<String, (Option<String>, Option<String>)>>,
    competitors: Vec<Competitor>,
    summaries: HashMap<String, String>,
    details: Vec<(String, String, f64)>,
    teams: HashMap<String, (u32, u32)>,
    scoring: Vec<(u32, f64)>,
    payouts: HashMap<u32, i64>,
    progress_cap: u32,
) -> PyResult<Option<Vec<Outcome>>> {
    let bracket = bracket.map(|games| {
        Bracket::new(games.into_iter().map(|(id, (team1, team2))| BracketGame {
            id,
            team1,
            team2,
        }))
    });

    let scoring = ScoringRules::new(
        scoring
            .into_iter()
            .map(|(threshold, points)| ScoringRule { threshold, points })
            .collect(),
    )?;

    let pool = PoolState::new(
        competitors,
        summaries
            .into_iter()
            .map(|(id, portfolio_id)| OwnershipSummary { id, portfolio_id })
            .collect(),
        details
            .into_iter()
            .map(|(summary_id, team_id, fraction)| OwnershipDetail {
                summary_id,
                team_id,
                fraction,
            })
            .collect(),
        teams
            .into_iter()
            .map(|(id, (wins, byes))| TeamProgress::new(id.clone(), id, wins, byes))
            .collect(),
        scoring,
        PayoutSchedule::new(payouts)?,
    )
    .with_progress_cap(progress_cap);

    Ok(compute_outcomes(bracket.as_ref(), &pool))
}

/// Python module definition
#[pymodule]
fn calcutta_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<Competitor>()?;
    m.add_class::<PortfolioStatus>()?;
    m.add_class::<Standing>()?;
    m.add_class::<Outcome>()?;

    // Functions
    m.add_function(wrap_pyfunction!(py_compute_standings, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_outcomes, m)?)?;

    // Constants
    m.add("TIE_EPSILON", TIE_EPSILON)?;
    m.add("ELITE_EIGHT_CAP", ELITE_EIGHT_CAP)?;
    m.add("SEMIFINAL_1", SEMIFINAL_1)?;
    m.add("SEMIFINAL_2", SEMIFINAL_2)?;

    Ok(())
}
