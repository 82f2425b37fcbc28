use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::constants::TIE_EPSILON;
use crate::error::{PoolError, Result};

/// Ownership status of a portfolio. Carried through, never used for ranking.
#[cfg_attr(feature = "python", pyo3::pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioStatus {
    #[default]
    Active,
    Submitted,
    Locked,
}

/// A pool competitor (one entrant's portfolio).
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,

    pub name: String,

    /// Only used to break exact ties: later creation ranks higher.
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub status: PortfolioStatus,
}

impl Competitor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Competitor {
            id: id.into(),
            name: name.into(),
            created_at,
            status: PortfolioStatus::Active,
        }
    }
}

/// Finish position (1-based) to payout in cents.
///
/// Positions without an entry pay nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PayoutSchedule {
    payouts: BTreeMap<u32, i64>,
}

impl PayoutSchedule {
    pub fn new(entries: impl IntoIterator<Item = (u32, i64)>) -> Result<Self> {
        let mut payouts = BTreeMap::new();
        for (position, amount) in entries {
            if position == 0 {
                return Err(PoolError::InvalidPayoutPosition(position));
            }
            if amount < 0 {
                return Err(PoolError::NegativePayout { position, amount });
            }
            if payouts.insert(position, amount).is_some() {
                return Err(PoolError::DuplicatePayoutPosition(position));
            }
        }
        Ok(PayoutSchedule { payouts })
    }

    /// Payout for a single finish position.
    pub fn amount_for(&self, position: u32) -> i64 {
        self.payouts.get(&position).copied().unwrap_or(0)
    }

    /// Sum of payouts for the `count` positions starting at `first`.
    pub fn pooled(&self, first: u32, count: u32) -> i64 {
        if count == 0 {
            return 0;
        }
        self.payouts
            .range(first..first + count)
            .map(|(_, &amount)| amount)
            .sum()
    }

    /// Total paid out across every configured position.
    pub fn total(&self) -> i64 {
        self.payouts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.payouts.is_empty()
    }
}

/// One competitor's ranked result.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub competitor_id: String,
    pub competitor_name: String,
    pub total_returns: f64,
    /// Shared by every member of a tie group: the group's first position.
    pub finish_position: u32,
    pub is_tied: bool,
    pub payout_cents: i64,
    pub in_the_money: bool,
}

/// A run of standings sharing one finish position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TieGroup {
    pub first_position: u32,
    pub last_position: u32,
    pub competitor_ids: Vec<String>,
}

impl TieGroup {
    pub fn len(&self) -> usize {
        self.competitor_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitor_ids.is_empty()
    }
}

/// Rank competitors by return, detect ties, and split payouts.
///
/// Returns `None` when `competitors` is `None` (nothing requested) and an
/// empty vector for an empty competitor list.
///
/// # Arguments
/// * `competitors` - Competitors to rank; not modified
/// * `returns` - Raw return per competitor id; missing ids count as 0
/// * `payouts` - Finish position to cents
///
/// # Returns
/// Standings in rank order. Ties (returns within `TIE_EPSILON` of the
/// group's highest return) share the group's first position and are ordered
/// newest first. The payouts of every position the group covers are pooled
/// and split evenly, with any remainder cents going one each to the
/// earliest-ranked members. NaN or infinite returns are scored as 0.
pub fn compute_standings(
    competitors: Option<&[Competitor]>,
    returns: &HashMap<String, f64>,
    payouts: &PayoutSchedule,
) -> Option<Vec<Standing>> {
    let competitors = competitors?;

    let mut ranked: Vec<(&Competitor, f64)> = competitors
        .iter()
        .map(|c| (c, returns.get(&c.id).copied().unwrap_or(0.0)))
        .map(|(c, value)| {
            if value.is_finite() {
                (c, value)
            } else {
                warn!(competitor_id = %c.id, value, "Non-finite return scored as 0");
                (c, 0.0)
            }
        })
        .collect();

    // Highest return first; among exact ties the most recently created first
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| b.0.created_at.cmp(&a.0.created_at))
    });

    let mut standings = Vec::with_capacity(ranked.len());
    let mut position: u32 = 1;
    let mut start = 0;

    while start < ranked.len() {
        let anchor = ranked[start].1;
        let mut end = start + 1;
        while end < ranked.len() && (anchor - ranked[end].1).abs() < TIE_EPSILON {
            end += 1;
        }

        // Inside a tie group the most recently created ranks first
        ranked[start..end].sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));
        let group = &ranked[start..end];
        let size = group.len();
        let is_tied = size > 1;

        let pooled = payouts.pooled(position, size as u32);
        let base = pooled / size as i64;
        let remainder = (pooled % size as i64) as usize;

        if is_tied {
            debug!(position, size, pooled, base, remainder, "Tie group");
        }

        for (i, (competitor, total_returns)) in group.iter().enumerate() {
            let payout_cents = if i < remainder { base + 1 } else { base };
            standings.push(Standing {
                competitor_id: competitor.id.clone(),
                competitor_name: competitor.name.clone(),
                total_returns: *total_returns,
                finish_position: position,
                is_tied,
                payout_cents,
                in_the_money: payout_cents > 0,
            });
        }

        position += size as u32;
        start = end;
    }

    Some(standings)
}

/// Split ranked standings back into their tie groups.
pub fn tie_groups(standings: &[Standing]) -> Vec<TieGroup> {
    let mut groups: Vec<TieGroup> = Vec::new();
    for standing in standings {
        if let Some(group) = groups
            .last_mut()
            .filter(|g| g.first_position == standing.finish_position)
        {
            group.last_position += 1;
            group.competitor_ids.push(standing.competitor_id.clone());
            continue;
        }
        groups.push(TieGroup {
            first_position: standing.finish_position,
            last_position: standing.finish_position,
            competitor_ids: vec![standing.competitor_id.clone()],
        });
    }
    groups
}
