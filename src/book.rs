use std::collections::HashMap;
use std::sync::OnceLock;

/// Book lookups stop after this many half-moves.
const MAX_BOOK_PLIES: usize = 24;

/// The opening book maps a comma-joined lowercase coordinate history to the
/// reply to play, covering the main lines of both colors' repertoires. The
/// first entry wins when a line is reachable through several sections.
#[rustfmt::skip]
const BOOK: &[(&str, &str)] = &[
    ("", "e2e4"),
    ("e2e4,e7e5", "g1f3"),
    ("e2e4,e7e5,g1f3,b8c6", "f1c4"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5", "c2c3"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6", "d2d3"),
    ("e2e4,e7e5,g1f3,g8f6", "b1c3"),
    ("e2e4,c7c5", "g1f3"),
    ("e2e4,c7c5,g1f3,d7d6", "d2d4"),
    ("e2e4,c7c5,g1f3,b8c6", "d2d4"),
    ("e2e4,c7c5,g1f3,e7e6", "d2d4"),
    ("e2e4,e7e6", "d2d4"),
    ("e2e4,e7e6,d2d4,d7d5", "b1c3"),
    ("e2e4,c7c6", "d2d4"),
    ("e2e4,c7c6,d2d4,d7d5", "b1c3"),
    ("e2e4,d7d5", "e4d5"),
    ("e2e4", "e7e5"),
    ("e2e4,g1f3", "b8c6"),
    ("e2e4,f1c4", "g8f6"),
    ("e2e4,d2d4", "e7e5"),
    ("e2e4,b1c3", "g8f6"),
    ("e2e4,e7e5,g1f3", "b8c6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4", "f8c5"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5", "a7a6"),
    ("e2e4,e7e5,g1f3,b8c6,d2d4", "e5d4"),
    ("d2d4", "g8f6"),
    ("d2d4,g8f6,c2c4", "g7g6"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3", "f8g7"),
    ("d2d4,g8f6,g1f3", "g7g6"),
    ("d2d4,g8f6,c1f4", "g7g6"),
    ("c2c4", "e7e5"),
    ("g1f3", "d7d5"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,c2c3", "g8f6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,c2c3,g8f6,d2d4", "e5d4"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4", "f3d4"),
    ("e2e4,c7c5,g1f3,b8c6,d2d4,c5d4", "f3d4"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,a7a6", "b5a4"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,a7a6,b5a4,g8f6", "e1g1"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,a7a6,b5a4,g8f6,e1g1,f8e7", "f1e1"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,a7a6,b5a4,g8f6,e1g1,b7b5", "a4b3"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,g8f6", "e1g1"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5,g8f6,e1g1,f6e4", "d2d4"),
    ("e2e4,e7e5,g1f3,b8c6,d2d4,e5d4,f3d4", "f8c5"),
    ("e2e4,e7e5,g1f3,b8c6,d2d4,e5d4,f3d4,g8f6", "d4c6"),
    ("e2e4,e7e6,d2d4,d7d5,e4e5", "c7c5"),
    ("e2e4,e7e6,d2d4,d7d5,b1c3,g8f6", "c1g5"),
    ("e2e4,e7e6,d2d4,d7d5,b1c3,f8b4", "e4e5"),
    ("e2e4,e7e6,d2d4,d7d5,b1c3,g8f6,c1g5,f8e7", "e4e5"),
    ("e2e4,c7c6,d2d4,d7d5,e4e5", "c8f5"),
    ("e2e4,c7c6,d2d4,d7d5,b1c3,d5e4", "c3e4"),
    ("e2e4,c7c6,d2d4,d7d5,b1c3,d5e4,c3e4,b8d7", "g1f3"),
    ("e2e4,c7c6,d2d4,d7d5,b1c3,d5e4,c3e4,c8f5", "e4g3"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6", "b1c3"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,a7a6", "c1e3"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,a7a6,c1e3,e7e5", "d4b3"),
    ("e2e4,c7c5,g1f3,b8c6,d2d4,c5d4,f3d4,g7g6", "b1c3"),
    ("e2e4,c7c5,g1f3,b8c6,d2d4,c5d4,f3d4,g7g6,b1c3,f8g7", "c1e3"),
    ("e2e4,c7c5,g1f3,e7e6,d2d4,c5d4,f3d4,a7a6", "b1c3"),
    ("e2e4,d7d5,e4d5,d8d5", "b1c3"),
    ("e2e4,d7d5,e4d5,d8d5,b1c3,d5a5", "d2d4"),
    ("e2e4,d7d5,e4d5,g8f6", "d2d4"),
    ("e2e4,d7d5,e4d5,d8d5,b1c3,d5a5,d2d4,g8f6", "g1f3"),
    ("e2e4,g8f6", "e4e5"),
    ("e2e4,g8f6,e4e5,f6d5", "d2d4"),
    ("e2e4,g8f6,e4e5,f6d5,d2d4,d7d6", "g1f3"),
    ("e2e4,d7d6", "d2d4"),
    ("e2e4,d7d6,d2d4,g8f6", "b1c3"),
    ("e2e4,d7d6,d2d4,g8f6,b1c3,g7g6", "f1c4"),
    ("e2e4,g7g6", "d2d4"),
    ("e2e4,g7g6,d2d4,f8g7", "b1c3"),
    ("d2d4,d7d5,c2c4", "e7e6"),
    ("d2d4,d7d5,c2c4,e7e6", "g8f6"),
    ("d2d4,d7d5,c2c4,e7e6,b1c3", "g8f6"),
    ("d2d4,d7d5,c2c4,c7c6", "g8f6"),
    ("d2d4,d7d5,c2c4,c7c6,g1f3", "g8f6"),
    ("d2d4,d7d5,c2c4,d5c4", "g1f3"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4", "d7d6"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4,d7d6,g1f3", "e8g8"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4,d7d6,g1f3,e8g8,f1e2", "e7e5"),
    ("d2d4,g8f6,c2c4,g7g6,g1f3,f8g7", "b1c3"),
    ("d2d4,g8f6,c1f4,d7d5,e2e3", "e7e6"),
    ("d2d4,g8f6,c1f4,d7d5,e2e3,e7e6,g1f3", "f8d6"),
    ("d2d4,d7d5,c1f4", "g8f6"),
    ("d2d4,d7d5,c1f4,g8f6,e2e3", "e7e6"),
    ("c2c4,e7e5,b1c3", "g8f6"),
    ("c2c4,e7e5,b1c3,g8f6,g1f3", "b8c6"),
    ("c2c4,e7e5,b1c3,b8c6", "g1f3"),
    ("c2c4,g8f6", "g7g6"),
    ("c2c4,c7c5", "g1f3"),
    ("g1f3,d7d5,d2d4", "g8f6"),
    ("g1f3,g8f6", "d7d5"),
    ("g1f3,d7d5,g2g3", "g8f6"),
    ("b2b3", "e7e5"),
    ("b2b3,e7e5", "d7d5"),
    ("g2g3", "d7d5"),
    ("g2g3,d7d5,f1g2", "g8f6"),
    ("f2f4", "d7d5"),
    ("e2e4,c7c5,g1f3", "d7d6"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4", "c5d4"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4", "g8f6"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3", "a7a6"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,a7a6,c1e3", "e7e5"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,a7a6,f1e2", "e7e5"),
    ("e2e4,c7c5,g1f3,b8c6,d2d4,c5d4,f3d4", "g8f6"),
    ("e2e4,c7c5,g1f3,e7e6,d2d4,c5d4,f3d4", "a7a6"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,g7g6", "c1e3"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,g7g6,c1e3", "f8g7"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6,b1c3,g7g6,c1e3,f8g7,f2f3", "e8g8"),
    ("d2d4,g8f6,c2c4,e7e6", "f8b4"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3", "f8b4"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3,f8b4,d1c2", "e8g8"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3,f8b4,e2e3", "e8g8"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3,f8b4,e2e3,e8g8,f1d3", "d7d5"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3,f8b4,a2a3", "b4c3"),
    ("d2d4,g8f6,c2c4,e7e6,b1c3,f8b4,a2a3,b4c3,b2c3", "c7c5"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3", "b7b6"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,b7b6,g2g3", "c8b7"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,b7b6,g2g3,c8b7,f1g2", "f8e7"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,b7b6,a2a3", "c8b7"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,b7b6,b1c3", "c8b7"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,d7d5", "c4d5"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,d7d5,c4d5", "f6d5"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,d7d5,c4d5,f6d5,e2e4", "d5c3"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,d7d5,c4d5,f6d5,e2e4,d5c3,b2c3", "f8g7"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,d7d5,g1f3", "f8g7"),
    ("d2d4,f7f5", "g1f3"),
    ("d2d4,f7f5,g1f3", "g8f6"),
    ("d2d4,f7f5,g1f3,g8f6,g2g3", "e7e6"),
    ("d2d4,f7f5,g1f3,g8f6,g2g3,e7e6,f1g2", "f8e7"),
    ("d2d4,f7f5,c2c4", "g8f6"),
    ("d2d4,f7f5,c2c4,g8f6,g2g3", "g7g6"),
    ("d2d4,g8f6,c2c4,c7c5", "d4d5"),
    ("d2d4,g8f6,c2c4,c7c5,d4d5,e7e6", "b1c3"),
    ("d2d4,g8f6,c2c4,c7c5,d4d5,e7e6,b1c3,e6d5", "c4d5"),
    ("d2d4,g8f6,c2c4,c7c5,d4d5,e7e6,b1c3,e6d5,c4d5,d7d6", "e2e4"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,f8b4", "c1d2"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,f8b4,c1d2", "b4d2"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,f8b4,c1d2,b4d2,d1d2", "e8g8"),
    ("d2d4,g8f6,c2c4,e7e6,g1f3,f8b4,b1d2", "b7b6"),
    ("d2d4,g8f6,c2c4,e7e6,g2g3", "d7d5"),
    ("d2d4,g8f6,c2c4,e7e6,g2g3,d7d5,f1g2", "f8e7"),
    ("d2d4,g8f6,c2c4,e7e6,g2g3,d7d5,f1g2,d5c4", "d1a4"),
    ("d2d4,g8f6,c2c4,e7e6,g2g3,d7d5,f1g2,f8e7,g1f3", "e8g8"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,d2d3", "f8e7"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,d2d3,f8e7,e1g1", "e8g8"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,f3g5", "d7d5"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,f3g5,d7d5,e4d5", "b8a5"),
    ("e2e4,e7e5,g1f3,b8c6,b1c3", "g8f6"),
    ("e2e4,e7e5,g1f3,b8c6,b1c3,g8f6,f1b5", "f8b4"),
    ("e2e4,e7e5,g1f3,b8c6,b1c3,g8f6,d2d4", "e5d4"),
    ("e2e4,e7e5,f2f4", "f8c5"),
    ("e2e4,e7e5,f2f4,f8c5,g1f3", "d7d6"),
    ("e2e4,e7e5,b1c3", "g8f6"),
    ("e2e4,e7e5,b1c3,g8f6,f2f4", "d7d5"),
    ("e2e4,e7e5,b1c3,b8c6", "f1c4"),
    ("e2e4,e7e5,f1c4", "g8f6"),
    ("e2e4,e7e5,f1c4,g8f6,d2d3", "f8c5"),
    ("e2e4,e7e5,g1f3,g8f6,f3e5,d7d6", "e5f3"),
    ("e2e4,e7e5,g1f3,g8f6,f3e5,d7d6,e5f3,f6e4", "d2d4"),
    ("e2e4,e7e5,g1f3,g8f6,b1c3", "b8c6"),
    ("e2e4,e7e5,g1f3,g8f6,d2d4", "f6e4"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,c2c3,g8f6,d2d4,e5d4,c3d4", "c5b4"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,d2d3", "g8f6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,d2d3,g8f6,c2c3", "d7d6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,d2d3,g8f6,e1g1", "d7d6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6,d2d3,f8e7", "e1g1"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,c2c3,g8f6,d2d3", "e1g1"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,e1g1", "g8f6"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4,d7d6,f1e2", "e8g8"),
];

fn table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::with_capacity(BOOK.len());
        for &(history, reply) in BOOK {
            table.entry(history).or_insert(reply);
        }
        table
    })
}

/// Looks up the reply for the given move history, if the game is still in
/// the opening and the line is in the book.
pub fn probe(history: &[String]) -> Option<&'static str> {
    if history.len() > MAX_BOOK_PLIES {
        return None;
    }

    let key = history.join(",");
    table().get(key.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_line(moves: &[&str]) -> Option<&'static str> {
        let history: Vec<String> = moves.iter().map(ToString::to_string).collect();
        probe(&history)
    }

    #[test]
    fn starting_position_plays_king_pawn() {
        assert_eq!(probe_line(&[]), Some("e2e4"));
    }

    #[test]
    fn answers_king_pawn_symmetrically() {
        assert_eq!(probe_line(&["e2e4"]), Some("e7e5"));
        assert_eq!(probe_line(&["e2e4", "e7e5"]), Some("g1f3"));
    }

    #[test]
    fn unknown_lines_fall_through_to_the_search() {
        assert_eq!(probe_line(&["a2a3"]), None);
        assert_eq!(probe_line(&["e2e4", "a7a6"]), None);
    }

    #[test]
    fn book_closes_after_the_opening() {
        let long: Vec<String> = std::iter::repeat("e2e4".to_string()).take(25).collect();
        assert_eq!(probe(&long), None);
    }

    #[test]
    fn replies_stay_within_the_lines_they_extend() {
        // Every non-root key must itself be an extension of a shorter key's
        // reply, so following the book never leaves it unexpectedly.
        assert_eq!(probe_line(&["e2e4", "e7e5", "g1f3", "b8c6"]), Some("f1c4"));
        assert_eq!(
            probe_line(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]),
            Some("c2c3"),
        );
    }
}
