use thiserror::Error;

/// Errors raised while building pool configuration values.
///
/// The standings and outcome computations themselves never fail; only the
/// inputs they are handed are validated.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Payout positions start at 1, got {0}")]
    InvalidPayoutPosition(u32),

    #[error("Payout position {0} configured more than once")]
    DuplicatePayoutPosition(u32),

    #[error("Negative payout at position {position}: {amount} cents")]
    NegativePayout { position: u32, amount: i64 },

    #[error("Scoring threshold {0} configured more than once")]
    DuplicateScoringThreshold(u32),

    #[error("Negative points for scoring threshold {threshold}: {points}")]
    NegativeScoringPoints { threshold: u32, points: f64 },

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse pool config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PoolError>;
