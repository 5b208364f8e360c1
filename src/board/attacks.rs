use super::Board;
use crate::types::{Color, Piece, PieceKind, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2)];

pub const KING_OFFSETS: [(i8, i8); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Board {
    /// Returns `true` if the square is attacked by pieces of the specified
    /// color. Only piece placement is examined; no moves are executed.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        // Pawns attack from the row behind the target relative to their
        // own direction of travel.
        let pawn_row = -by_color.forward();
        for dc in [-1, 1] {
            if let Some(from) = square.offset(pawn_row, dc) {
                if self.piece_on(from) == Some(Piece::new(PieceKind::Pawn, by_color)) {
                    return true;
                }
            }
        }

        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(from) = square.offset(dr, dc) {
                if self.piece_on(from) == Some(Piece::new(PieceKind::Knight, by_color)) {
                    return true;
                }
            }
        }

        if self.ray_attacked(square, by_color, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
            return true;
        }

        if self.ray_attacked(square, by_color, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook) {
            return true;
        }

        for (dr, dc) in KING_OFFSETS {
            if let Some(from) = square.offset(dr, dc) {
                if self.piece_on(from) == Some(Piece::new(PieceKind::King, by_color)) {
                    return true;
                }
            }
        }

        false
    }

    /// Slides away from the square along each direction and reports whether
    /// the first piece encountered is a queen or the specified slider kind
    /// of the attacking color.
    fn ray_attacked(
        &self,
        square: Square,
        by_color: Color,
        directions: &[(i8, i8)],
        slider: PieceKind,
    ) -> bool {
        for &(dr, dc) in directions {
            let mut current = square;
            while let Some(next) = current.offset(dr, dc) {
                current = next;
                if let Some(piece) = self.piece_on(current) {
                    if piece.color == by_color && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }

    /// Returns `true` if the king of the specified color is attacked.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), !color)
    }

    /// Returns `true` if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        self.is_king_attacked(self.side_to_move())
    }
}
