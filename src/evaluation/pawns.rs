use super::Profile;
use crate::board::Board;
use crate::types::{Color, Piece, PieceKind, Square};

/// Passed pawn bonus by the pawn's rank relative to its own side.
const PASSED_BONUS: [i32; 8] = [0, 0, 30, 50, 100, 200, 400, 0];
const PASSED_CLEAR_PATH: i32 = 50;
const PASSED_DEFENDED: i32 = 30;

const DOUBLED_PENALTY: i32 = 15;

pub fn evaluate(board: &Board, profile: &Profile) -> i32 {
    side(board, profile, Color::White) - side(board, profile, Color::Black)
}

fn side(board: &Board, profile: &Profile, color: Color) -> i32 {
    let mut score = 0;

    for square in Square::all() {
        if board.piece_on(square) != Some(Piece::new(PieceKind::Pawn, color)) {
            continue;
        }

        if is_passed(board, square, color) {
            score += PASSED_BONUS[color.relative_rank(square.row()) as usize];
            if has_clear_path(board, square, color) {
                score += PASSED_CLEAR_PATH;
            }
            if is_defended(board, square, color) {
                score += PASSED_DEFENDED;
            }
        }
    }

    for file in 0..8 {
        let pawns = profile.pawns_on_file(color, file);
        if pawns > 1 {
            score -= DOUBLED_PENALTY * (pawns - 1);
        }
    }

    score
}

/// A pawn is passed if no enemy pawn sits ahead of it on its own file or
/// an adjacent one.
fn is_passed(board: &Board, square: Square, color: Color) -> bool {
    let forward = color.forward();
    let enemy_pawn = Piece::new(PieceKind::Pawn, !color);

    for dc in -1..=1 {
        let mut current = square;
        loop {
            let Some(ahead) = current.offset(forward, 0) else { break };
            current = ahead;

            if let Some(watched) = current.offset(0, dc) {
                if board.piece_on(watched) == Some(enemy_pawn) {
                    return false;
                }
            }
        }
    }

    true
}

/// Returns `true` if every square between the pawn and its promotion square
/// is empty.
fn has_clear_path(board: &Board, square: Square, color: Color) -> bool {
    let forward = color.forward();
    let mut current = square;

    while let Some(ahead) = current.offset(forward, 0) {
        if board.piece_on(ahead).is_some() {
            return false;
        }
        current = ahead;
    }

    true
}

/// Returns `true` if a friendly pawn defends the square.
fn is_defended(board: &Board, square: Square, color: Color) -> bool {
    let behind = -color.forward();
    [-1, 1].into_iter().any(|dc| {
        square
            .offset(behind, dc)
            .is_some_and(|guard| board.piece_on(guard) == Some(Piece::new(PieceKind::Pawn, color)))
    })
}
