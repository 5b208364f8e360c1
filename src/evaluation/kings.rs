use super::Profile;
use crate::board::Board;
use crate::types::{Color, Piece, PieceKind, Square};

/// Material lead required before the endgame king bonuses kick in.
const DECISIVE_LEAD: i32 = 200;

const CORNERED_KING: i32 = 30;
const EDGE_DISTANCE_WEIGHT: i32 = 10;
const KING_PROXIMITY_WEIGHT: i32 = 5;

const SHIELD_NEAR: i32 = 12;
const SHIELD_FAR: i32 = 6;
const SEMI_OPEN_NEAR_KING: i32 = 12;
const OPEN_NEAR_KING: i32 = 20;
const EXPOSED_CENTER_KING: i32 = 30;
const ZONE_ATTACK: i32 = 6;
const ESCAPE_SQUARE: i32 = 3;

/// Evaluates the kings: middlegame safety on both wings, or, once the game
/// reaches a decided endgame, bonuses that drive the winning side's king
/// towards the loser and the losing side's king towards the edge.
pub fn evaluate(board: &Board, profile: &Profile, endgame: bool) -> i32 {
    if endgame {
        endgame_scaling(board, profile)
    } else {
        safety(board, profile, Color::White) - safety(board, profile, Color::Black)
    }
}

fn endgame_scaling(board: &Board, profile: &Profile) -> i32 {
    let lead = profile.material[Color::White] - profile.material[Color::Black];
    if lead.abs() <= DECISIVE_LEAD {
        return 0;
    }

    let winner = if lead > 0 { Color::White } else { Color::Black };
    let winner_king = board.king_square(winner);
    let loser_king = board.king_square(!winner);

    let mut bonus = loser_king.center_distance() as i32 * EDGE_DISTANCE_WEIGHT;
    bonus += (7 - winner_king.distance(loser_king) as i32) * KING_PROXIMITY_WEIGHT;
    if loser_king.is_corner() {
        bonus += CORNERED_KING;
    }

    match winner {
        Color::White => bonus,
        Color::Black => -bonus,
    }
}

/// Scores the shelter of one king: pawn shield for castled kings, open
/// files nearby, an exposed king on the center files, enemy attacks on the
/// 3x3 zone around the king, and the number of quiet squares to run to.
fn safety(board: &Board, profile: &Profile, color: Color) -> i32 {
    let king = board.king_square(color);
    let enemy = !color;
    let mut score = 0;

    if king.col() == 3 || king.col() == 4 {
        score -= EXPOSED_CENTER_KING;
    }

    if king.row() == color.back_rank() && (king.col() <= 2 || king.col() >= 5) {
        score += shield(board, king, color);
    }

    for dc in -1..=1 {
        let col = king.col() as i8 + dc;
        if !(0..8).contains(&col) {
            continue;
        }

        if profile.pawns_on_file(color, col as u8) == 0 {
            score -= if profile.pawns_on_file(enemy, col as u8) == 0 {
                OPEN_NEAR_KING
            } else {
                SEMI_OPEN_NEAR_KING
            };
        }
    }

    for dr in -1..=1 {
        for dc in -1..=1 {
            let Some(square) = king.offset(dr, dc) else { continue };
            if board.is_square_attacked(square, enemy) {
                score -= ZONE_ATTACK;
            }
        }
    }

    let escapes = escape_squares(board, king, color);
    score + escapes * ESCAPE_SQUARE
}

/// Counts friendly pawns covering the files around a castled king, one row
/// ahead at full weight and two rows ahead at half weight.
fn shield(board: &Board, king: Square, color: Color) -> i32 {
    let forward = color.forward();
    let own_pawn = Piece::new(PieceKind::Pawn, color);
    let mut score = 0;

    for dc in -1..=1 {
        let near = king.offset(forward, dc);
        let far = king.offset(2 * forward, dc);

        if near.is_some_and(|square| board.piece_on(square) == Some(own_pawn)) {
            score += SHIELD_NEAR;
        } else if far.is_some_and(|square| board.piece_on(square) == Some(own_pawn)) {
            score += SHIELD_FAR;
        }
    }

    score
}

/// Counts adjacent empty squares the king could step to without walking
/// into an attack.
fn escape_squares(board: &Board, king: Square, color: Color) -> i32 {
    use crate::board::KING_OFFSETS;

    let enemy = !color;
    KING_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| king.offset(dr, dc))
        .filter(|&square| board.piece_on(square).is_none() && !board.is_square_attacked(square, enemy))
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn king_score(fen: &str) -> i32 {
        let board = Board::new(fen).unwrap();
        let profile = Profile::scan(&board);
        evaluate(&board, &profile, profile.is_endgame())
    }

    #[test]
    fn castled_king_with_shield_beats_exposed_king() {
        let sheltered =
            king_score("rnbq1rk1/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1RK1 w - - 0 1");
        let wandering =
            king_score("rnbq1rk1/pppppppp/8/8/4K3/8/PPPP1PPP/RNBQ1R2 w - - 0 1");
        assert!(sheltered > wandering);
    }

    #[test]
    fn endgame_drives_the_losing_king_to_the_edge() {
        // White is up a rook; the cornered black king scores higher for
        // White than one in the middle of the board.
        let cornered = king_score("k7/8/8/8/8/8/8/4K2R w - - 0 1");
        let central = king_score("8/8/8/3k4/8/8/8/4K2R w - - 0 1");
        assert!(cornered > central);
    }
}
