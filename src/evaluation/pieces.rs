use super::Profile;
use crate::board::Board;
use crate::types::{Color, Piece, PieceKind, Square};

const ROOK_OPEN_FILE: i32 = 25;
const ROOK_SEMI_OPEN_FILE: i32 = 15;
const BISHOP_PAIR: i32 = 50;
const CONNECTED_ROOKS: i32 = 25;
const QUEEN_ROOK_BATTERY: i32 = 30;
const UNDEVELOPED_BISHOP: i32 = 25;
const UNDEVELOPED_KNIGHT: i32 = 30;

pub fn evaluate(board: &Board, profile: &Profile) -> i32 {
    side(board, profile, Color::White) - side(board, profile, Color::Black)
}

fn side(board: &Board, profile: &Profile, color: Color) -> i32 {
    let mut score = 0;
    let mut rooks = Vec::with_capacity(2);
    let mut queens = Vec::with_capacity(1);

    for square in Square::all() {
        let Some(piece) = board.piece_on(square) else { continue };
        if piece.color != color {
            continue;
        }

        match piece.kind {
            PieceKind::Rook => {
                rooks.push(square);
                score += rook_file_bonus(profile, color, square.col());
            }
            PieceKind::Queen => queens.push(square),
            _ => (),
        }
    }

    if profile.bishops[color] >= 2 {
        score += BISHOP_PAIR;
    }

    if connected(board, &rooks) {
        score += CONNECTED_ROOKS;
    }

    if queens.iter().any(|&queen| rooks.iter().any(|&rook| aligned(board, queen, rook))) {
        score += QUEEN_ROOK_BATTERY;
    }

    score - development_penalty(board, color)
}

fn rook_file_bonus(profile: &Profile, color: Color, file: u8) -> i32 {
    if profile.pawns_on_file(color, file) == 0 {
        if profile.pawns_on_file(!color, file) == 0 {
            ROOK_OPEN_FILE
        } else {
            ROOK_SEMI_OPEN_FILE
        }
    } else {
        0
    }
}

/// Returns `true` if any two of the rooks share a rank or file with nothing
/// between them.
fn connected(board: &Board, rooks: &[Square]) -> bool {
    for (index, &first) in rooks.iter().enumerate() {
        for &second in &rooks[index + 1..] {
            if aligned(board, first, second) {
                return true;
            }
        }
    }
    false
}

/// Returns `true` if the two squares share a rank or file and every square
/// strictly between them is empty.
fn aligned(board: &Board, a: Square, b: Square) -> bool {
    if a.row() != b.row() && a.col() != b.col() {
        return false;
    }

    let dr = (b.row() as i8 - a.row() as i8).signum();
    let dc = (b.col() as i8 - a.col() as i8).signum();

    let mut current = a;
    loop {
        current = current.offset(dr, dc).expect("aligned squares stay on the board");
        if current == b {
            return true;
        }
        if board.piece_on(current).is_some() {
            return false;
        }
    }
}

/// Minor pieces still sitting on their starting squares hold the position
/// back; knights are penalized slightly harder than bishops.
fn development_penalty(board: &Board, color: Color) -> i32 {
    let row = color.back_rank();
    let mut penalty = 0;

    for col in [1, 6] {
        let square = Square::from_row_col(row, col);
        if board.piece_on(square) == Some(Piece::new(PieceKind::Knight, color)) {
            penalty += UNDEVELOPED_KNIGHT;
        }
    }

    for col in [2, 5] {
        let square = Square::from_row_col(row, col);
        if board.piece_on(square) == Some(Piece::new(PieceKind::Bishop, color)) {
            penalty += UNDEVELOPED_BISHOP;
        }
    }

    penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_for(fen: &str, color: Color) -> i32 {
        let board = Board::new(fen).unwrap();
        let profile = Profile::scan(&board);
        side(&board, &profile, color)
    }

    #[test]
    fn rook_on_open_file_beats_closed_file() {
        let open = score_for("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1", Color::White);
        let closed = score_for("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1", Color::White);
        assert_eq!(open - closed, ROOK_OPEN_FILE);
    }

    #[test]
    fn rook_on_semi_open_file_gets_reduced_bonus() {
        let semi = score_for("4k3/p7/8/8/8/8/4P3/R3K3 w - - 0 1", Color::White);
        let closed = score_for("4k3/p7/8/8/8/8/P7/R3K3 w - - 0 1", Color::White);
        assert_eq!(semi - closed, ROOK_SEMI_OPEN_FILE);
    }

    #[test]
    fn connected_rooks_require_a_clear_line() {
        let connected = Board::new("4k3/8/8/8/8/8/8/R2K3R w - - 0 1").unwrap();
        let rooks = vec![Square::A1, Square::H1];
        assert!(!super::connected(&connected, &rooks));

        let open = Board::new("3k4/8/8/8/8/8/8/R6R w - - 0 1").unwrap();
        assert!(super::connected(&open, &rooks));
    }

    #[test]
    fn undeveloped_minors_are_penalized() {
        let undeveloped = score_for("4k3/8/8/8/8/8/8/1N2KB2 w - - 0 1", Color::White);
        let developed = score_for("4k3/8/8/8/8/2N2B2/8/4K3 w - - 0 1", Color::White);
        assert_eq!(developed - undeveloped, UNDEVELOPED_KNIGHT + UNDEVELOPED_BISHOP);
    }
}
