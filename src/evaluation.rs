use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

mod kings;
mod pawns;
mod pieces;
mod psqt;

/// Combined non-pawn material below which the position counts as an endgame.
const ENDGAME_MATERIAL: i32 = 1500;

const CHECKING_BONUS: i32 = 10;
const IN_CHECK_PENALTY: i32 = 20;

/// Per-side totals gathered in a single pass over the board and shared by
/// the evaluation terms.
pub(crate) struct Profile {
    material: [i32; Color::NUM],
    non_pawn_material: [i32; Color::NUM],
    bishops: [i32; Color::NUM],
    pawns_per_file: [[i32; 8]; Color::NUM],
}

impl Profile {
    fn scan(board: &Board) -> Self {
        let mut profile = Self {
            material: [0; Color::NUM],
            non_pawn_material: [0; Color::NUM],
            bishops: [0; Color::NUM],
            pawns_per_file: [[0; 8]; Color::NUM],
        };

        for square in Square::all() {
            let Some(piece) = board.piece_on(square) else { continue };

            profile.material[piece.color] += piece.kind.value();
            match piece.kind {
                PieceKind::Pawn => {
                    profile.pawns_per_file[piece.color][square.col() as usize] += 1;
                }
                PieceKind::King => (),
                kind => {
                    profile.non_pawn_material[piece.color] += kind.value();
                    if kind == PieceKind::Bishop {
                        profile.bishops[piece.color] += 1;
                    }
                }
            }
        }

        profile
    }

    fn is_endgame(&self) -> bool {
        self.non_pawn_material[Color::White] + self.non_pawn_material[Color::Black]
            < ENDGAME_MATERIAL
    }

    fn pawns_on_file(&self, color: Color, file: u8) -> i32 {
        self.pawns_per_file[color][file as usize]
    }
}

/// Returns a statically evaluated score in centipawns relative to the white
/// side, regardless of the color of the player who is currently making a
/// move. Positive values indicate an advantage for White.
pub fn evaluate(board: &Board) -> i32 {
    let profile = Profile::scan(board);
    let endgame = profile.is_endgame();

    let mut score = 0;

    for square in Square::all() {
        let Some(piece) = board.piece_on(square) else { continue };

        let value = piece.kind.value() + psqt::bonus(piece.kind, piece.color, square, endgame);
        score += match piece.color {
            Color::White => value,
            Color::Black => -value,
        };
    }

    score += pawns::evaluate(board, &profile);
    score += pieces::evaluate(board, &profile);
    score += kings::evaluate(board, &profile, endgame);
    score += check_terms(board);

    score
}

/// Returns a statically evaluated score relative to the color of the player
/// who is currently making a move.
pub fn evaluate_relative(board: &Board) -> i32 {
    match board.side_to_move() {
        Color::White => evaluate(board),
        Color::Black => -evaluate(board),
    }
}

fn check_terms(board: &Board) -> i32 {
    let us = board.side_to_move();
    let sign = match us {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut score = 0;
    if board.is_king_attacked(us) {
        score -= IN_CHECK_PENALTY * sign;
    }
    if board.is_king_attacked(!us) {
        score += CHECKING_BONUS * sign;
    }
    score
}

/// Returns the score of a position with no legal moves: a mate against the
/// side to move scored so that shorter mates are preferred, or a stalemate
/// draw.
pub fn evaluate_terminal(board: &Board, ply: usize) -> i32 {
    use crate::types::Score;

    if board.is_in_check() {
        -(Score::MATE - ply as i32)
    } else {
        Score::DRAW
    }
}
