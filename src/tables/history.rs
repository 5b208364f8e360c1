use crate::types::{Color, Move, Square};

const HISTORY_CAP: i32 = 10_000;

/// The history heuristic keeps track of how often a quiet move has caused a
/// beta cutoff, indexed by the mover's color and the from/to squares.
///
/// See [History Heuristic](https://www.chessprogramming.org/History_Heuristic)
/// for more information.
pub struct HistoryMoves {
    table: [[[i32; Square::NUM]; Square::NUM]; Color::NUM],
}

impl HistoryMoves {
    /// Returns the accumulated score of a move.
    pub fn get(&self, color: Color, mv: Move) -> i32 {
        self.table[color][mv.from()][mv.to()]
    }

    /// Increases the score of a move by the square of the depth at which it
    /// caused a cutoff, saturating at the cap.
    pub fn update(&mut self, color: Color, mv: Move, depth: i32) {
        let slot = &mut self.table[color][mv.from()][mv.to()];
        *slot = (*slot + depth * depth).min(HISTORY_CAP);
    }

    pub fn clear(&mut self) {
        self.table = [[[0; Square::NUM]; Square::NUM]; Color::NUM];
    }
}

impl Default for HistoryMoves {
    fn default() -> Self {
        Self {
            table: [[[0; Square::NUM]; Square::NUM]; Color::NUM],
        }
    }
}
