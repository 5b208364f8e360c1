use std::time::Instant;

use tracing::info;

use crate::board::Board;
use crate::evaluation::{evaluate_relative, evaluate_terminal};
use crate::tables::{Bound, HistoryMoves, KillerMoves, Repetitions, TranspositionTable};
use crate::timeman::TimeControl;
use crate::types::{is_mate_score, Move, Score, MAX_SEARCH_PLY};

mod ordering;

/// Draws are scored slightly against the side forcing them, so a side with
/// an advantage keeps playing for a win instead of shuffling into a
/// repetition.
const CONTEMPT: i32 = 25;

const ASPIRATION_MIN_DEPTH: i32 = 5;
const ASPIRATION_WINDOW: i32 = 50;

/// Score above which a confirmed advantage stops the deepening early.
const WINNING_MARGIN: i32 = 300;
const WINNING_MIN_DEPTH: i32 = 4;

const NULL_MOVE_MIN_DEPTH: i32 = 6;
const NULL_MOVE_REDUCTION: i32 = 3;

const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_INDEX: usize = 4;
const LMR_REDUCTION: i32 = 1;

const MAX_QS_DEPTH: i32 = 10;

/// The clock is sampled once per this many nodes.
const TIME_CHECK_INTERVAL: u64 = 2048;

pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: i32,
    pub nodes: u64,
}

struct RootLine {
    best_move: Move,
    score: i32,
}

/// A single search over one position. Owns the per-search killer and
/// history tables; borrows the board, the transposition table and the
/// repetition store from the engine so their lifetimes stay explicit.
pub struct Searcher<'a> {
    board: &'a mut Board,
    tt: &'a mut TranspositionTable,
    repetitions: &'a mut Repetitions,
    tc: TimeControl,
    killers: KillerMoves,
    history: HistoryMoves,
    nodes: u64,
    stopped: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(
        board: &'a mut Board,
        tt: &'a mut TranspositionTable,
        repetitions: &'a mut Repetitions,
        tc: TimeControl,
    ) -> Self {
        Self {
            board,
            tt,
            repetitions,
            tc,
            killers: KillerMoves::default(),
            history: HistoryMoves::default(),
            nodes: 0,
            stopped: false,
        }
    }

    /// Runs an iterative-deepening search and returns the best move found
    /// by the deepest fully completed iteration, or `None` if the side to
    /// move has no legal moves.
    pub fn find_best_move(&mut self) -> Option<SearchResult> {
        self.killers = KillerMoves::default();
        self.history.clear();
        self.nodes = 0;
        self.stopped = false;

        let moves = self.board.generate_moves();
        if moves.is_empty() {
            return None;
        }

        let started = Instant::now();
        let mut result = SearchResult {
            best_move: moves[0],
            score: -Score::INFINITY,
            depth: 0,
            nodes: 0,
        };
        let mut previous = 0;

        for depth in 1..=self.tc.max_depth() {
            let mut alpha = -Score::INFINITY;
            let mut beta = Score::INFINITY;

            // Aspiration window around the previous iteration's score; a
            // fail outside the window falls back to a full-width re-search.
            if depth >= ASPIRATION_MIN_DEPTH && !is_mate_score(previous) {
                alpha = previous - ASPIRATION_WINDOW;
                beta = previous + ASPIRATION_WINDOW;
            }

            let mut line = self.search_root(depth, alpha, beta);
            if !self.stopped && (line.score <= alpha || line.score >= beta) {
                line = self.search_root(depth, -Score::INFINITY, Score::INFINITY);
            }

            if self.stopped {
                break;
            }

            previous = line.score;
            result = SearchResult {
                best_move: line.best_move,
                score: line.score,
                depth,
                nodes: self.nodes,
            };

            info!(
                depth,
                score = line.score,
                nodes = self.nodes,
                elapsed_ms = started.elapsed().as_millis() as u64,
                best = %line.best_move,
                "completed iteration"
            );

            if is_mate_score(line.score) {
                info!(score = line.score, "forced mate found");
                break;
            }

            if depth >= WINNING_MIN_DEPTH
                && line.score >= WINNING_MARGIN
                && evaluate_relative(self.board) >= WINNING_MARGIN
            {
                break;
            }
        }

        Some(result)
    }

    fn search_root(&mut self, depth: i32, mut alpha: i32, beta: i32) -> RootLine {
        let mut moves = self.board.generate_moves();
        let tt_move = self.tt.probe(self.board.hash()).and_then(|entry| entry.best_move);
        ordering::order_moves(self.board, &mut moves, tt_move, &self.killers, &self.history, 0);

        let original_alpha = alpha;
        let in_check = self.board.is_in_check();
        let mut best_move = moves[0];
        let mut best_score = -Score::INFINITY;

        for (index, &mv) in moves.iter().enumerate() {
            let score = self.search_move(mv, index, depth, alpha, beta, in_check, 0);
            if self.stopped {
                return RootLine { best_move, score: best_score };
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.record_cutoff(mv, depth, 0);
                break;
            }
        }

        let bound = flag_for(best_score, original_alpha, beta);
        self.tt.store(self.board.hash(), depth as i16, best_score, bound, Some(best_move));

        RootLine { best_move, score: best_score }
    }

    fn negamax(&mut self, mut alpha: i32, mut beta: i32, depth: i32, ply: usize) -> i32 {
        // A time abort returns a dummy score; every caller checks the flag
        // and discards the result.
        if self.should_stop() {
            return Score::DRAW;
        }

        if depth <= 0 {
            return self.quiescence(alpha, beta, MAX_QS_DEPTH, ply);
        }

        if ply >= MAX_SEARCH_PLY - 1 {
            return evaluate_relative(self.board);
        }

        self.nodes += 1;

        let original_alpha = alpha;
        let hash = self.board.hash();
        let mut tt_move = None;

        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if i32::from(entry.depth) >= depth {
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        let in_check = self.board.is_in_check();

        // Null move pruning: if passing still fails high, the position is
        // strong enough to cut without searching a real move. Skipped in
        // check, near mate scores, and without non-pawn material, where
        // zugzwang would make the conclusion unsound.
        if !in_check
            && depth >= NULL_MOVE_MIN_DEPTH
            && !is_mate_score(alpha)
            && !is_mate_score(beta)
            && self.board.has_non_pawn_material(self.board.side_to_move())
        {
            self.board.make_null_move();
            let score = -self.negamax(-beta, -beta + 1, depth - 1 - NULL_MOVE_REDUCTION, ply + 1);
            self.board.undo_null_move();

            if self.stopped {
                return Score::DRAW;
            }
            if score >= beta {
                return beta;
            }
        }

        let mut moves = self.board.generate_moves();
        if moves.is_empty() {
            return evaluate_terminal(self.board, ply);
        }

        ordering::order_moves(self.board, &mut moves, tt_move, &self.killers, &self.history, ply);

        let mut best_score = -Score::INFINITY;
        let mut best_move = Move::NULL;

        for (index, &mv) in moves.iter().enumerate() {
            let score = self.search_move(mv, index, depth, alpha, beta, in_check, ply);
            if self.stopped {
                return Score::DRAW;
            }

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.record_cutoff(mv, depth, ply);
                break;
            }
        }

        let bound = flag_for(best_score, original_alpha, beta);
        let stored_move = (best_move != Move::NULL).then_some(best_move);
        self.tt.store(hash, depth as i16, best_score, bound, stored_move);

        best_score
    }

    /// Executes one move of the move loop: make, check extension,
    /// repetition accounting, late move reduction, recursion, unmake.
    #[allow(clippy::too_many_arguments)]
    fn search_move(
        &mut self,
        mv: Move,
        index: usize,
        depth: i32,
        alpha: i32,
        beta: i32,
        in_check: bool,
        ply: usize,
    ) -> i32 {
        let capture = self.board.is_capture(mv);
        let can_reduce = index >= LMR_MIN_INDEX
            && depth >= LMR_MIN_DEPTH
            && !capture
            && mv.promotion().is_none()
            && !in_check;

        self.board.make_move(mv);
        let gives_check = self.board.is_in_check();
        let extension = i32::from(gives_check);

        let hash = self.board.hash();
        let occurrences = self.repetitions.count(hash);

        let mut score;
        if occurrences >= 2 {
            // Third occurrence: a forced repetition, scored as a draw
            // shaded by contempt with no recursion at all.
            score = Score::DRAW - CONTEMPT;
        } else {
            self.repetitions.push(hash);

            if can_reduce && !gives_check {
                score =
                    -self.negamax(-alpha - 1, -alpha, depth - 1 - LMR_REDUCTION + extension, ply + 1);
                if score > alpha && !self.stopped {
                    score = -self.negamax(-beta, -alpha, depth - 1 + extension, ply + 1);
                }
            } else {
                score = -self.negamax(-beta, -alpha, depth - 1 + extension, ply + 1);
            }

            self.repetitions.pop();

            // Second occurrence: the line flirts with a repetition, so a
            // good score gets shaved in proportion to how good it claims
            // to be.
            if occurrences == 1 && score > Score::DRAW - CONTEMPT {
                score -= near_repetition_penalty(score);
            }
        }

        self.board.undo_move();
        score
    }

    fn quiescence(&mut self, mut alpha: i32, beta: i32, qs_depth: i32, ply: usize) -> i32 {
        if self.should_stop() {
            return Score::DRAW;
        }

        self.nodes += 1;

        if qs_depth <= 0 || ply >= MAX_SEARCH_PLY - 1 {
            return evaluate_relative(self.board);
        }

        if self.board.is_in_check() {
            // Evasions are not quiet: search all of them so mates behind
            // the horizon are seen.
            let mut moves = self.board.generate_moves();
            if moves.is_empty() {
                return evaluate_terminal(self.board, ply);
            }
            ordering::order_moves(self.board, &mut moves, None, &self.killers, &self.history, ply);

            for &mv in &moves {
                self.board.make_move(mv);
                let score = -self.quiescence(-beta, -alpha, qs_depth - 1, ply + 1);
                self.board.undo_move();

                if self.stopped {
                    return Score::DRAW;
                }
                if score >= beta {
                    return beta;
                }
                if score > alpha {
                    alpha = score;
                }
            }

            return alpha;
        }

        let stand_pat = evaluate_relative(self.board);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = self.board.generate_moves();
        ordering::order_moves(self.board, &mut moves, None, &self.killers, &self.history, ply);

        for &mv in &moves {
            let capture = self.board.is_capture(mv);

            self.board.make_move(mv);
            if !capture && !self.board.is_in_check() {
                self.board.undo_move();
                continue;
            }

            let score = -self.quiescence(-beta, -alpha, qs_depth - 1, ply + 1);
            self.board.undo_move();

            if self.stopped {
                return Score::DRAW;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Records a quiet move that caused a beta cutoff in the killer and
    /// history tables.
    fn record_cutoff(&mut self, mv: Move, depth: i32, ply: usize) {
        if !self.board.is_capture(mv) && mv.promotion().is_none() {
            self.killers.record(mv, ply);
            self.history.update(self.board.side_to_move(), mv, depth);
        }
    }

    fn should_stop(&mut self) -> bool {
        if !self.stopped && self.nodes % TIME_CHECK_INTERVAL == 0 && self.tc.is_time_over() {
            self.stopped = true;
        }
        self.stopped
    }
}

const fn flag_for(best_score: i32, original_alpha: i32, beta: i32) -> Bound {
    if best_score <= original_alpha {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    }
}

/// The penalty applied to a score whose line passes through a second
/// occurrence of a position, tiered by how strong the score claims to be.
const fn near_repetition_penalty(score: i32) -> i32 {
    if score > 300 {
        150
    } else if score > 200 {
        100
    } else if score > 100 {
        75
    } else if score > 50 {
        50
    } else if score > 0 {
        25
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Repetitions, TranspositionTable};
    use crate::types::Square;
    use std::time::Duration;

    fn search(fen: &str, depth: i32) -> Option<SearchResult> {
        let mut board = Board::new(fen).unwrap();
        let mut tt = TranspositionTable::new(4);
        let mut repetitions = Repetitions::new();
        repetitions.push(board.hash());

        Searcher::new(&mut board, &mut tt, &mut repetitions, TimeControl::fixed_depth(depth))
            .find_best_move()
    }

    #[test]
    fn returns_a_legal_move_from_the_start() {
        let result = search(crate::board::STARTING_FEN, 3).unwrap();

        let mut board = Board::starting_position();
        assert!(board.generate_moves().contains(&result.best_move));
    }

    #[test]
    fn finds_mate_in_one() {
        // Scholar's mate is on: Qh5xf7#.
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        let result = search(fen, 3).unwrap();

        let mating = Move::new(Square::try_from("h5").unwrap(), Square::try_from("f7").unwrap());
        assert_eq!(result.best_move, mating);
        assert!(result.score >= Score::MATE_BOUND);
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let fen = "6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1";
        let result = search(fen, 3).unwrap();

        let mating = Move::new(Square::A1, Square::A8);
        assert_eq!(result.best_move, mating);
        assert!(result.score >= Score::MATE_BOUND);
    }

    #[test]
    fn stalemate_yields_no_move() {
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        assert!(search(fen, 3).is_none());

        let mated = "6rr/8/8/8/8/8/8/7K w - - 0 1";
        assert!(search(mated, 3).is_none());
    }

    #[test]
    fn prefers_capturing_a_hanging_queen() {
        // The black queen on d5 is free to take.
        let fen = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";
        let result = search(fen, 4).unwrap();

        let capture = Move::new(Square::try_from("d2").unwrap(), Square::try_from("d5").unwrap());
        assert_eq!(result.best_move, capture);
    }

    #[test]
    fn avoids_moves_that_force_a_repetition() {
        let fen = "4k3/8/8/8/8/8/R7/4K3 w - - 0 1";
        let mut board = Board::new(fen).unwrap();
        let mut tt = TranspositionTable::new(4);
        let mut repetitions = Repetitions::new();
        repetitions.push(board.hash());

        // Seed every move except one as an already twice-seen position, as
        // if the game had been shuffling back and forth.
        let moves = board.generate_moves();
        let spared = moves[0];
        for &mv in &moves[1..] {
            board.make_move(mv);
            let hash = board.hash();
            board.undo_move();
            repetitions.push(hash);
            repetitions.push(hash);
        }

        let result = Searcher::new(
            &mut board,
            &mut tt,
            &mut repetitions,
            TimeControl::fixed_depth(1),
        )
        .find_best_move()
        .unwrap();

        assert_eq!(result.best_move, spared);
    }

    #[test]
    fn respects_the_time_budget() {
        let mut board = Board::starting_position();
        let mut tt = TranspositionTable::new(4);
        let mut repetitions = Repetitions::new();
        repetitions.push(board.hash());

        let tc = TimeControl::new(Duration::from_millis(100), 64);
        let started = Instant::now();
        let result =
            Searcher::new(&mut board, &mut tt, &mut repetitions, tc).find_best_move().unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!result.best_move.is_null());
    }
}
