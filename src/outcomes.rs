use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::constants::{SEMIFINAL_1, SEMIFINAL_2};
use crate::pool::PoolState;
use crate::returns::{ProgressBaseline, SkippedReferences};
use crate::standings::{compute_standings, Standing};

/// A bracket game with up to two teams slotted in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketGame {
    pub id: String,
    pub team1: Option<String>,
    pub team2: Option<String>,
}

impl BracketGame {
    pub fn new(id: impl Into<String>, team1: Option<&str>, team2: Option<&str>) -> Self {
        BracketGame {
            id: id.into(),
            team1: team1.map(str::to_string),
            team2: team2.map(str::to_string),
        }
    }

    /// Both team ids, once both slots are filled.
    pub fn teams(&self) -> Option<(&str, &str)> {
        Some((self.team1.as_deref()?, self.team2.as_deref()?))
    }
}

/// Bracket games keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    games: HashMap<String, BracketGame>,
}

impl Bracket {
    pub fn new(games: impl IntoIterator<Item = BracketGame>) -> Self {
        Bracket {
            games: games.into_iter().map(|g| (g.id.clone(), g)).collect(),
        }
    }

    pub fn game(&self, id: &str) -> Option<&BracketGame> {
        self.games.get(id)
    }
}

/// One way the Final Four can finish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario<'a> {
    pub semifinal1_winner: &'a str,
    pub semifinal2_winner: &'a str,
    pub champion: &'a str,
}

impl<'a> Scenario<'a> {
    /// The finalist who did not win the title
    pub fn runner_up(&self) -> &'a str {
        if self.champion == self.semifinal1_winner {
            self.semifinal2_winner
        } else {
            self.semifinal1_winner
        }
    }

    /// Hypothetical wins per team: +1 to each semifinal winner, another +1
    /// to the champion.
    pub fn increments(&self) -> HashMap<&'a str, u32> {
        let mut increments = HashMap::new();
        *increments.entry(self.semifinal1_winner).or_insert(0) += 1;
        *increments.entry(self.semifinal2_winner).or_insert(0) += 1;
        *increments.entry(self.champion).or_insert(0) += 1;
        increments
    }
}

/// A hypothetical terminal state and the standings it produces.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub semifinal1_winner: String,
    pub semifinal2_winner: String,
    pub champion: String,
    pub runner_up: String,
    pub standings: Vec<Standing>,
}

/// All 8 Final Four finishes, in a fixed order.
///
/// Semifinal 1 winner varies slowest, then semifinal 2 winner, then which of
/// the two finalists takes the title.
pub fn enumerate_scenarios<'a>(
    semifinal1: (&'a str, &'a str),
    semifinal2: (&'a str, &'a str),
) -> Vec<Scenario<'a>> {
    let mut scenarios = Vec::with_capacity(8);
    for winner1 in [semifinal1.0, semifinal1.1] {
        for winner2 in [semifinal2.0, semifinal2.1] {
            for champion in [winner1, winner2] {
                scenarios.push(Scenario {
                    semifinal1_winner: winner1,
                    semifinal2_winner: winner2,
                    champion,
                });
            }
        }
    }
    scenarios
}

fn semifinal_teams<'a>(bracket: &'a Bracket, game_id: &str) -> Option<(&'a str, &'a str)> {
    let Some(game) = bracket.game(game_id) else {
        debug!(game_id, "Semifinal not in bracket");
        return None;
    };
    let teams = game.teams();
    if teams.is_none() {
        debug!(game_id, "Semifinal slots not filled yet");
    }
    teams
}

/// Standings for every possible Final Four finish.
///
/// Returns `None` until both semifinals exist with both teams slotted.
///
/// Each team's actual progress is capped at `pool.progress_cap` before the
/// scenario's hypothetical wins are added, so a completed tournament yields
/// exactly the same returns per scenario as one paused before the Final Four.
/// Scenarios run in parallel; the result keeps enumeration order.
///
/// # Arguments
/// * `bracket` - Current bracket, if one has been built
/// * `pool` - Competitors, ownership, team progress, scoring and payouts
pub fn compute_outcomes(bracket: Option<&Bracket>, pool: &PoolState) -> Option<Vec<Outcome>> {
    let Some(bracket) = bracket else {
        debug!("No bracket; outcomes unavailable");
        return None;
    };
    let semifinal1 = semifinal_teams(bracket, SEMIFINAL_1)?;
    let semifinal2 = semifinal_teams(bracket, SEMIFINAL_2)?;

    let scenarios = enumerate_scenarios(semifinal1, semifinal2);
    let index = pool.index();
    let baseline = ProgressBaseline::Capped(pool.progress_cap);

    let results: Vec<(Outcome, SkippedReferences)> = scenarios
        .par_iter()
        .map(|scenario| {
            let (returns, skipped) = index.compute_returns(
                &pool.details,
                &pool.scoring,
                baseline,
                &scenario.increments(),
            );
            let standings =
                compute_standings(Some(pool.competitors.as_slice()), &returns, &pool.payouts)
                    .unwrap_or_default();

            let outcome = Outcome {
                semifinal1_winner: scenario.semifinal1_winner.to_string(),
                semifinal2_winner: scenario.semifinal2_winner.to_string(),
                champion: scenario.champion.to_string(),
                runner_up: scenario.runner_up().to_string(),
                standings,
            };
            (outcome, skipped)
        })
        .collect();

    // Skips depend only on the details, so every scenario reports the same
    if let Some((_, skipped)) = results.first().filter(|(_, s)| !s.is_empty()) {
        warn!(
            unknown_summary = skipped.unknown_summary,
            unknown_competitor = skipped.unknown_competitor,
            unknown_team = skipped.unknown_team,
            "Skipped unresolvable ownership details"
        );
    }

    debug!(
        outcomes = results.len(),
        competitors = pool.competitors.len(),
        progress_cap = pool.progress_cap,
        "Computed Final Four outcomes"
    );

    Some(results.into_iter().map(|(outcome, _)| outcome).collect())
}
