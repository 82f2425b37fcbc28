use serde::{Deserialize, Serialize};

/// A team's tournament progress.
///
/// `byes` is 1 for teams placed directly into the Round of 64 and 0 for
/// teams that had to play in the First Four.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamProgress {
    pub id: String,

    pub name: String,

    /// Bracket games won so far
    pub wins: u32,

    pub byes: u32,
}

impl TeamProgress {
    pub fn new(id: impl Into<String>, name: impl Into<String>, wins: u32, byes: u32) -> Self {
        TeamProgress {
            id: id.into(),
            name: name.into(),
            wins,
            byes,
        }
    }

    /// Cumulative progress: wins plus byes.
    pub fn progress(&self) -> u32 {
        self.wins + self.byes
    }

    /// Progress clamped to `cap`.
    ///
    /// Used to pin every team to its pre-Final-Four baseline before layering
    /// hypothetical wins on top.
    pub fn capped_progress(&self, cap: u32) -> u32 {
        self.progress().min(cap)
    }
}
