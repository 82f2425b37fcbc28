#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use tracing_subscriber::EnvFilter;

use calcutta_core::{Competitor, OwnershipDetail, OwnershipSummary, TeamProgress};

/// Route engine logs through the test harness. Set RUST_LOG=debug to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn competitor(id: &str, created_secs: i64) -> Competitor {
    Competitor::new(id, id.to_uppercase(), Utc.timestamp_opt(created_secs, 0).unwrap())
}

pub fn summary(id: &str, portfolio_id: &str) -> OwnershipSummary {
    OwnershipSummary {
        id: id.to_string(),
        portfolio_id: portfolio_id.to_string(),
    }
}

pub fn detail(summary_id: &str, team_id: &str, fraction: f64) -> OwnershipDetail {
    OwnershipDetail {
        summary_id: summary_id.to_string(),
        team_id: team_id.to_string(),
        fraction,
    }
}

pub fn team(id: &str, wins: u32, byes: u32) -> TeamProgress {
    TeamProgress::new(id, id, wins, byes)
}
