/// Centipawn score constants shared by the evaluator and the search.
pub struct Score;

impl Score {
    pub const INFINITY: i32 = 1_000_000;

    /// The base value of a checkmate; actual mate scores are offset by the
    /// ply at which the mate occurs so shorter mates score higher.
    pub const MATE: i32 = 100_000;

    /// Scores at or above this magnitude are forced mates.
    pub const MATE_BOUND: i32 = Self::MATE - super::MAX_SEARCH_PLY as i32;

    pub const DRAW: i32 = 0;
}

/// Returns `true` if the score encodes a forced mate for either side.
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= Score::MATE_BOUND
}
