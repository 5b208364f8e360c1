use crate::board::Board;
use crate::tables::{HistoryMoves, KillerMoves};
use crate::types::{Color, Move, PieceKind, Square};

const PROMOTION: i32 = 1000;
const HISTORY_LIMIT: i32 = 700;
const HISTORY_SCALE: i32 = 15;
const CASTLING: i32 = 50;
const MINOR_DEVELOPMENT: i32 = 10;
const ROOK_SHUFFLE: i32 = -10;
const KING_WALK: i32 = -20;

/// Orders the legal moves best-first: a transposition-table move is hoisted
/// to the front untouched, and the rest are sorted by heuristic score. The
/// sort is stable so equally scored moves keep generation order and the
/// search stays deterministic.
pub fn order_moves(
    board: &Board,
    moves: &mut [Move],
    tt_move: Option<Move>,
    killers: &KillerMoves,
    history: &HistoryMoves,
    ply: usize,
) {
    let mut start = 0;
    if let Some(tt_move) = tt_move {
        if let Some(index) = moves.iter().position(|&mv| mv == tt_move) {
            moves.swap(0, index);
            start = 1;
        }
    }

    let sortable = &mut moves[start..];
    let mut scored: Vec<(i32, Move)> =
        sortable.iter().map(|&mv| (score_move(board, mv, killers, history, ply), mv)).collect();
    scored.sort_by_key(|&(score, _)| std::cmp::Reverse(score));

    for (slot, (_, mv)) in sortable.iter_mut().zip(scored) {
        *slot = mv;
    }
}

/// Returns a move score based on heuristic analysis; higher scores are
/// searched earlier.
fn score_move(
    board: &Board,
    mv: Move,
    killers: &KillerMoves,
    history: &HistoryMoves,
    ply: usize,
) -> i32 {
    let piece = board.piece_on(mv.from()).expect("ordering a move from an empty square");
    let mut score = 0;

    if mv.promotion().is_some() {
        score += PROMOTION;
    }

    let capture = match board.victim_of(mv) {
        Some(victim) => {
            score += mvv_lva(victim, piece.kind);
            true
        }
        None => false,
    };

    match piece.kind {
        PieceKind::King if mv.from().col().abs_diff(mv.to().col()) == 2 => score += CASTLING,
        PieceKind::King => score += KING_WALK,
        PieceKind::Rook if in_development_phase(board, piece.color) => score += ROOK_SHUFFLE,
        kind if kind.is_minor() && mv.from().row() == piece.color.back_rank() => {
            score += MINOR_DEVELOPMENT;
        }
        _ => (),
    }

    if !capture && mv.promotion().is_none() {
        score += match killers.bonus(mv, ply) {
            0 => (history.get(piece.color, mv) / HISTORY_SCALE).min(HISTORY_LIMIT),
            bonus => bonus,
        };
    }

    score
}

/// A rook move counts as early while its side still has a minor piece on
/// its back-rank home square; that is the phase rook shuffling gets in the
/// way of, and the penalty expires once the minors are out.
fn in_development_phase(board: &Board, color: Color) -> bool {
    let row = color.back_rank();
    [1, 2, 5, 6].into_iter().any(|col| {
        matches!(
            board.piece_on(Square::from_row_col(row, col)),
            Some(piece) if piece.color == color && piece.kind.is_minor()
        )
    })
}

/// Scores a capture by Most Valuable Victim - Least Valuable Aggressor:
/// better victims first, cheaper attackers breaking the tie.
pub fn mvv_lva(victim: PieceKind, attacker: PieceKind) -> i32 {
    10 * victim.value() - attacker.value()
}
