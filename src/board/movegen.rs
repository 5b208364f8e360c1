use super::attacks::{DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS};
use super::Board;
use crate::types::{CastlingKind, Color, Move, Piece, PieceKind, Square};

const PROMOTION_KINDS: [PieceKind; 4] =
    [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

impl Board {
    /// Generates all legal moves for the side to move: pseudo-legal moves
    /// filtered by making each candidate and rejecting those that leave the
    /// mover's own king attacked.
    pub fn generate_moves(&mut self) -> Vec<Move> {
        let mut moves = self.generate_pseudo_moves();
        moves.retain(|&mv| {
            let legal = self.make_move(mv);
            self.undo_move();
            legal
        });
        moves
    }

    /// Generates pseudo-legal moves for the side to move. Castling legality
    /// (rights, empty path, attacked squares) is verified here; only "leaves
    /// the king in check" filtering is left to the caller.
    pub fn generate_pseudo_moves(&self) -> Vec<Move> {
        Generator::new(self).generate()
    }
}

struct Generator<'a> {
    board: &'a Board,
    turn: Color,
    list: Vec<Move>,
}

impl<'a> Generator<'a> {
    fn new(board: &'a Board) -> Self {
        Self {
            board,
            turn: board.side_to_move(),
            list: Vec::with_capacity(64),
        }
    }

    fn generate(mut self) -> Vec<Move> {
        for square in Square::all() {
            let Some(piece) = self.board.piece_on(square) else { continue };
            if piece.color != self.turn {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => self.collect_pawn_moves(square),
                PieceKind::Knight => self.collect_offset_moves(square, &KNIGHT_OFFSETS),
                PieceKind::Bishop => self.collect_sliding_moves(square, &DIAGONAL_DIRECTIONS),
                PieceKind::Rook => self.collect_sliding_moves(square, &ORTHOGONAL_DIRECTIONS),
                PieceKind::Queen => {
                    self.collect_sliding_moves(square, &DIAGONAL_DIRECTIONS);
                    self.collect_sliding_moves(square, &ORTHOGONAL_DIRECTIONS);
                }
                PieceKind::King => {
                    self.collect_offset_moves(square, &KING_OFFSETS);
                    self.collect_castling_moves(square);
                }
            }
        }
        self.list
    }

    fn collect_pawn_moves(&mut self, from: Square) {
        let forward = self.turn.forward();

        // Single push, extended to a double push from the starting row.
        if let Some(one_up) = from.offset(forward, 0) {
            if self.board.piece_on(one_up).is_none() {
                self.add_pawn_move(from, one_up);

                if from.row() == self.turn.pawn_rank() {
                    let two_up = one_up.offset(forward, 0).unwrap();
                    if self.board.piece_on(two_up).is_none() {
                        self.list.push(Move::new(from, two_up));
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(to) = from.offset(forward, dc) else { continue };

            match self.board.piece_on(to) {
                Some(piece) if piece.color != self.turn => self.add_pawn_move(from, to),
                None if self.board.en_passant() == Some(to) => {
                    // The captured pawn must actually be an enemy pawn
                    // standing beside the mover.
                    let beside = Square::from_row_col(from.row(), to.col());
                    if self.board.piece_on(beside) == Some(Piece::new(PieceKind::Pawn, !self.turn)) {
                        self.list.push(Move::new(from, to));
                    }
                }
                _ => (),
            }
        }
    }

    /// Adds a pawn move, expanding it into the four promotion moves when the
    /// destination is the last rank.
    fn add_pawn_move(&mut self, from: Square, to: Square) {
        if to.row() == (!self.turn).back_rank() {
            for kind in PROMOTION_KINDS {
                self.list.push(Move::promoting(from, to, kind));
            }
        } else {
            self.list.push(Move::new(from, to));
        }
    }

    fn collect_offset_moves(&mut self, from: Square, offsets: &[(i8, i8)]) {
        for &(dr, dc) in offsets {
            let Some(to) = from.offset(dr, dc) else { continue };

            match self.board.piece_on(to) {
                Some(piece) if piece.color == self.turn => (),
                _ => self.list.push(Move::new(from, to)),
            }
        }
    }

    fn collect_sliding_moves(&mut self, from: Square, directions: &[(i8, i8)]) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                current = to;
                match self.board.piece_on(to) {
                    None => self.list.push(Move::new(from, to)),
                    Some(piece) => {
                        if piece.color != self.turn {
                            self.list.push(Move::new(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    /// Emits castling as a two-column king move when the corresponding right
    /// is intact, the path is clear, the king is not in check, and neither
    /// the square the king passes through nor its destination is attacked.
    fn collect_castling_moves(&mut self, from: Square) {
        let row = self.turn.back_rank();
        if from != Square::from_row_col(row, 4) {
            return;
        }

        let (short, long) = match self.turn {
            Color::White => (CastlingKind::WhiteShort, CastlingKind::WhiteLong),
            Color::Black => (CastlingKind::BlackShort, CastlingKind::BlackLong),
        };

        let enemy = !self.turn;
        let empty = |col: u8| self.board.piece_on(Square::from_row_col(row, col)).is_none();
        let safe = |col: u8| !self.board.is_square_attacked(Square::from_row_col(row, col), enemy);

        if self.board.is_square_attacked(from, enemy) {
            return;
        }

        if self.board.castling().is_allowed(short) && empty(5) && empty(6) && safe(5) && safe(6) {
            self.list.push(Move::new(from, Square::from_row_col(row, 6)));
        }

        if self.board.castling().is_allowed(long)
            && empty(1)
            && empty(2)
            && empty(3)
            && safe(2)
            && safe(3)
        {
            self.list.push(Move::new(from, Square::from_row_col(row, 2)));
        }
    }
}
