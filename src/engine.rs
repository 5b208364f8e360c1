use std::time::Duration;

use tracing::{error, info, warn};

use crate::board::Board;
use crate::search::{SearchResult, Searcher};
use crate::tables::{Repetitions, TranspositionTable};
use crate::timeman::TimeControl;
use crate::types::Move;
use crate::{book, evaluation};

/// Depth cap for the iterative deepening loop; the time budget is what
/// actually ends a search in practice.
const MAX_DEPTH: i32 = 64;

/// The per-move thinking budget.
const MOVE_TIME: Duration = Duration::from_millis(5000);

/// One move request: the engine replays the game history onto its board,
/// consults the opening book, and otherwise searches. The transposition
/// table and repetition store live here so their lifetime spans the whole
/// request.
pub struct Engine {
    board: Board,
    tt: TranspositionTable,
    repetitions: Repetitions,
    history: Vec<String>,
}

impl Engine {
    pub fn new() -> Self {
        let board = Board::starting_position();
        let mut repetitions = Repetitions::new();
        repetitions.push(board.hash());

        Self {
            board,
            tt: TranspositionTable::default(),
            repetitions,
            history: Vec::new(),
        }
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Replays a history file's contents onto the board. Malformed lines
    /// are skipped with a warning; syntactically fine but illegal moves are
    /// skipped with an error. Either way the rest of the history is still
    /// applied.
    pub fn load_history(&mut self, text: &str) {
        for line in text.lines() {
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            self.replay(entry);
        }
    }

    fn replay(&mut self, entry: &str) {
        let notation = entry.to_ascii_lowercase();
        if !is_coordinate_notation(&notation) {
            warn!(line = entry, "skipping malformed history line");
            return;
        }

        // Matching against the printed form of the legal moves canonicalizes
        // the text and transparently handles castling and en passant.
        let mv = self
            .board
            .generate_moves()
            .into_iter()
            .find(|mv| mv.to_string() == notation);

        match mv {
            Some(mv) => {
                self.board.make_move(mv);
                self.repetitions.push(self.board.hash());
                self.history.push(mv.to_string());
            }
            None => error!(line = entry, "skipping illegal move in history"),
        }
    }

    /// Chooses a move for the side to move: the book reply when the game is
    /// still in a known line, otherwise the search's best move. Returns
    /// `None` when there are no legal moves (the game is over).
    pub fn choose_move(&mut self) -> Option<Move> {
        if let Some(reply) = book::probe(&self.history) {
            let mv = self
                .board
                .generate_moves()
                .into_iter()
                .find(|mv| mv.to_string() == reply);

            match mv {
                Some(mv) => {
                    info!(%mv, "playing book move");
                    return Some(mv);
                }
                // A book line that no longer matches the position means the
                // history itself was inconsistent; the search still works.
                None => warn!(reply, "book reply is not legal here, searching instead"),
            }
        }

        let tc = TimeControl::new(MOVE_TIME, MAX_DEPTH);
        let result = Searcher::new(&mut self.board, &mut self.tt, &mut self.repetitions, tc)
            .find_best_move();

        match result {
            Some(SearchResult { best_move, score, depth, nodes }) => {
                info!(%best_move, score, depth, nodes, "search finished");
                Some(best_move)
            }
            None => {
                let verdict = match self.board.is_in_check() {
                    true => "checkmate",
                    false => "stalemate",
                };
                info!(verdict, "no legal moves, the game is over");
                None
            }
        }
    }

    /// Statically evaluates the current position in centipawns, White
    /// positive.
    pub fn evaluate(&self) -> i32 {
        evaluation::evaluate(&self.board)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` if the text looks like a coordinate-notation move: two
/// squares and an optional promotion letter.
fn is_coordinate_notation(text: &str) -> bool {
    let bytes = text.as_bytes();
    let promotion_ok = match bytes.len() {
        4 => true,
        5 => matches!(bytes[4], b'q' | b'r' | b'b' | b'n'),
        _ => false,
    };

    promotion_ok
        && matches!(bytes[0], b'a'..=b'h')
        && matches!(bytes[1], b'1'..=b'8')
        && matches!(bytes[2], b'a'..=b'h')
        && matches!(bytes[3], b'1'..=b'8')
}
