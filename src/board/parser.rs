use std::str::FromStr;

use super::Board;
use crate::types::{Castling, CastlingKind, Color, Piece, PieceKind, Square};

/// The reasons a FEN string can be rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseFenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),
    #[error("unexpected piece symbol '{0}'")]
    InvalidPiece(char),
    #[error("piece placement does not describe an 8x8 board")]
    InvalidGrid,
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("invalid castling rights")]
    InvalidCastling,
    #[error("invalid en passant target")]
    InvalidEnPassant,
}

impl FromStr for Board {
    type Err = ParseFenError;

    /// Parses a board from Forsyth-Edwards notation. The halfmove clock and
    /// fullmove number fields are accepted but ignored; the engine derives
    /// everything it needs from the position itself.
    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or(ParseFenError::MissingField("placement"))?;
        let side = fields.next().ok_or(ParseFenError::MissingField("side to move"))?;
        let castling = fields.next().ok_or(ParseFenError::MissingField("castling"))?;
        let en_passant = fields.next().ok_or(ParseFenError::MissingField("en passant"))?;

        let mut board = Board::default();

        let mut row: i8 = 7;
        let mut col: i8 = 0;
        for symbol in placement.chars() {
            match symbol {
                '/' => {
                    if col != 8 {
                        return Err(ParseFenError::InvalidGrid);
                    }
                    row -= 1;
                    col = 0;
                }
                '1'..='8' => col += symbol as i8 - '0' as i8,
                _ => {
                    let square = Square::at(row, col).ok_or(ParseFenError::InvalidGrid)?;
                    board.squares[square] = Some(parse_piece(symbol)?);
                    col += 1;
                }
            }
            if row < 0 || col > 8 {
                return Err(ParseFenError::InvalidGrid);
            }
        }
        if row != 0 || col != 8 {
            return Err(ParseFenError::InvalidGrid);
        }

        board.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidSideToMove),
        };

        board.castling = Castling::NONE;
        for symbol in castling.chars() {
            match symbol {
                'K' => board.castling.allow(CastlingKind::WhiteShort),
                'Q' => board.castling.allow(CastlingKind::WhiteLong),
                'k' => board.castling.allow(CastlingKind::BlackShort),
                'q' => board.castling.allow(CastlingKind::BlackLong),
                '-' => (),
                _ => return Err(ParseFenError::InvalidCastling),
            }
        }

        board.en_passant = match en_passant {
            "-" => None,
            target => {
                Some(Square::try_from(target).map_err(|()| ParseFenError::InvalidEnPassant)?)
            }
        };

        board.hash = board.compute_hash();
        Ok(board)
    }
}

fn parse_piece(symbol: char) -> Result<Piece, ParseFenError> {
    let kind = match symbol.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return Err(ParseFenError::InvalidPiece(symbol)),
    };

    let color = match symbol.is_ascii_uppercase() {
        true => Color::White,
        false => Color::Black,
    };

    Ok(Piece::new(kind, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_starting_position() {
        let board = Board::starting_position();

        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.en_passant(), None);
        assert_eq!(
            board.piece_on(Square::E1),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert!(board.castling().is_allowed(CastlingKind::WhiteShort));
        assert!(board.castling().is_allowed(CastlingKind::BlackLong));
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn parses_side_castling_and_en_passant_fields() {
        let board: Board =
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse().unwrap();

        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant(), Some(Square::try_from("e3").unwrap()));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!("".parse::<Board>(), Err(ParseFenError::MissingField("placement")));
        assert_eq!(
            "8/8/8/8/8/8/8 w - - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidGrid)
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidSideToMove)
        );
        assert_eq!(
            "8/8/8/8/8/8/8/4K2k w - zz 0 1".parse::<Board>(),
            Err(ParseFenError::InvalidEnPassant)
        );
    }
}
