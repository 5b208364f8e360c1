use super::{zobrist::ZOBRIST, Board};
use crate::types::{Castling, Move, Piece, PieceKind, Square};

/// Everything `undo_move` needs to restore the position exactly as it was
/// before the paired `make_move`: the move itself, the prior castling
/// rights, en-passant target and hash, the captured piece (including the
/// pawn taken en passant), and the moving piece's kind before promotion.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    mv: Move,
    castling: Castling,
    en_passant: Option<Square>,
    hash: u64,
    captured: Option<Piece>,
    moved_kind: PieceKind,
    was_en_passant: bool,
}

impl Board {
    /// Updates the board representation by making the specified `Move` and
    /// pushing an undo record. Returns `false` if the move left the mover's
    /// own king attacked; the caller is expected to revert such a move with
    /// `undo_move` before continuing.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let mover = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let piece = self.squares[from].expect("make_move from an empty square");

        let mut undo = Undo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            hash: self.hash,
            captured: None,
            moved_kind: piece.kind,
            was_en_passant: false,
        };

        self.hash ^= ZOBRIST.castling[self.castling.mask()];
        if let Some(target) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant[target.col() as usize];
        }

        if self.is_en_passant(mv) {
            // The captured pawn sits beside the mover, not on the target square.
            let capture_square = Square::from_row_col(from.row(), to.col());
            undo.captured = self.remove(capture_square);
            undo.was_en_passant = true;
        } else {
            undo.captured = self.remove(to);
        }

        self.en_passant = None;
        self.remove(from);

        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            self.move_castling_rook(from, to);
        }

        let placed = match mv.promotion() {
            Some(kind) => Piece::new(kind, mover),
            None => piece,
        };
        self.place(placed, to);

        if piece.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            let target = Square::from_row_col((from.row() + to.row()) / 2, from.col());
            self.en_passant = Some(target);
            self.hash ^= ZOBRIST.en_passant[target.col() as usize];
        }

        self.castling.update_for_square(from);
        self.castling.update_for_square(to);
        self.hash ^= ZOBRIST.castling[self.castling.mask()];

        self.side_to_move = !mover;
        self.hash ^= ZOBRIST.side;

        self.undo_stack.push(undo);

        !self.is_king_attacked(mover)
    }

    /// Restores the board representation to the state before the last move.
    ///
    /// # Panics
    ///
    /// Panics if there is no move to undo.
    pub fn undo_move(&mut self) {
        let undo = self.undo_stack.pop().expect("undo_move without a prior make_move");
        let mv = undo.mv;
        let mover = !self.side_to_move;

        self.side_to_move = mover;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;

        self.squares[mv.from()] = Some(Piece::new(undo.moved_kind, mover));
        self.squares[mv.to()] = None;

        if undo.was_en_passant {
            self.squares[Square::from_row_col(mv.from().row(), mv.to().col())] = undo.captured;
        } else {
            self.squares[mv.to()] = undo.captured;
        }

        if undo.moved_kind == PieceKind::King && mv.from().col().abs_diff(mv.to().col()) == 2 {
            let row = mv.from().row();
            let (rook_from, rook_to) = rook_castling_squares(row, mv.to().col());
            self.squares[rook_from] = self.squares[rook_to].take();
        }

        self.hash = undo.hash;
    }

    /// Makes a null move: the side to move passes. Only the side to move and
    /// the en-passant target change; the hash is updated accordingly.
    pub fn make_null_move(&mut self) {
        self.undo_stack.push(Undo {
            mv: Move::NULL,
            castling: self.castling,
            en_passant: self.en_passant,
            hash: self.hash,
            captured: None,
            moved_kind: PieceKind::King,
            was_en_passant: false,
        });

        if let Some(target) = self.en_passant.take() {
            self.hash ^= ZOBRIST.en_passant[target.col() as usize];
        }
        self.side_to_move = !self.side_to_move;
        self.hash ^= ZOBRIST.side;
    }

    /// Restores the board after a null move.
    pub fn undo_null_move(&mut self) {
        let undo = self.undo_stack.pop().expect("undo_null_move without a prior make_null_move");
        debug_assert!(undo.mv.is_null());

        self.side_to_move = !self.side_to_move;
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }

    /// Moves the rook over the king when castling, keeping the hash in sync.
    fn move_castling_rook(&mut self, king_from: Square, king_to: Square) {
        let (rook_from, rook_to) = rook_castling_squares(king_from.row(), king_to.col());
        if let Some(rook) = self.remove(rook_from) {
            self.place(rook, rook_to);
        }
    }
}

/// Returns the rook's from/to squares for a castling move given the king's
/// back rank row and destination column.
const fn rook_castling_squares(row: u8, king_to_col: u8) -> (Square, Square) {
    if king_to_col == 6 {
        (Square::from_row_col(row, 7), Square::from_row_col(row, 5))
    } else {
        (Square::from_row_col(row, 0), Square::from_row_col(row, 3))
    }
}
