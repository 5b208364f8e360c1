use super::Board;
use crate::types::{Color, PieceKind, Square};

/// Represents the sets of random numbers used to produce an *almost* unique
/// hash value for a position using [Zobrist Hashing](https://en.wikipedia.org/wiki/Zobrist_hashing),
/// generated at compile time by the SplitMix64 pseudorandom number generator.
pub struct Zobrist {
    pub pieces: [[[u64; Square::NUM]; PieceKind::NUM]; Color::NUM],
    pub en_passant: [u64; 8],
    pub castling: [u64; 16],
    pub side: u64,
}

const SEED: u64 = 0xFFAA_B58C_5833_FE89;
const INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(INCREMENT);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

pub const ZOBRIST: Zobrist = {
    let mut state = SEED;
    let mut pieces = [[[0; Square::NUM]; PieceKind::NUM]; Color::NUM];
    let mut en_passant = [0; 8];
    let mut castling = [0; 16];

    let mut color = 0;
    while color < Color::NUM {
        let mut kind = 0;
        while kind < PieceKind::NUM {
            let mut square = 0;
            while square < Square::NUM {
                let (next, key) = splitmix64(state);
                state = next;
                pieces[color][kind][square] = key;
                square += 1;
            }
            kind += 1;
        }
        color += 1;
    }

    let mut file = 0;
    while file < 8 {
        let (next, key) = splitmix64(state);
        state = next;
        en_passant[file] = key;
        file += 1;
    }

    let mut mask = 0;
    while mask < 16 {
        let (next, key) = splitmix64(state);
        state = next;
        castling[mask] = key;
        mask += 1;
    }

    let (_, side) = splitmix64(state);

    Zobrist { pieces, en_passant, castling, side }
};

impl Board {
    /// Performs Zobrist hashing on `self`, generating an *almost* unique
    /// position hash key from scratch.
    ///
    /// This method should only be used for the initial hash key generation;
    /// `self.hash()` is kept up to date incrementally by `make_move` and
    /// `undo_move` and must always equal this value.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0;

        for square in Square::all() {
            if let Some(piece) = self.piece_on(square) {
                hash ^= ZOBRIST.pieces[piece.color][piece.kind][square];
            }
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side;
        }

        hash ^= ZOBRIST.castling[self.castling.mask()];

        if let Some(target) = self.en_passant {
            hash ^= ZOBRIST.en_passant[target.col() as usize];
        }

        hash
    }
}
