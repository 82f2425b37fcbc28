/// Two returns closer than this (absolute difference) are a tie.
pub const TIE_EPSILON: f64 = 0.0001;

/// Highest progress (wins + byes) a team can carry into the Final Four.
///
/// NCAA field: one bye for skipping the First Four plus four wins through the
/// Elite Eight.
pub const ELITE_EIGHT_CAP: u32 = 5;

/// Bracket game name of the first national semifinal.
pub const SEMIFINAL_1: &str = "final_four-1";

/// Bracket game name of the second national semifinal.
pub const SEMIFINAL_2: &str = "final_four-2";

/// Default `(threshold, points)` awards. Progress 2 is a Round of 64 win and
/// progress 7 the championship.
pub const DEFAULT_SCORING_AWARDS: [(u32, f64); 6] = [
    (2, 7.75),
    (3, 19.375),
    (4, 38.75),
    (5, 120.125),
    (6, 46.5),
    (7, 108.5),
];
