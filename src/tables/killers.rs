use crate::types::{Move, MAX_SEARCH_PLY};

/// The ordering bonus a remembered refutation earns: below promotions and
/// winning captures, above every history-scored quiet move.
pub const KILLER_BONUS: i32 = 800;

#[derive(Clone, Copy)]
struct Slots {
    recent: Option<Move>,
    older: Option<Move>,
}

/// Quiet refutations remembered per ply. A quiet move that produced a beta
/// cutoff usually refutes the sibling lines at the same ply too, so the
/// move ordering pulls it ahead of the remaining quiet moves the next time
/// the search reaches that ply.
pub struct KillerMoves {
    plies: [Slots; MAX_SEARCH_PLY],
}

impl KillerMoves {
    /// Remembers a refutation at this ply, displacing the older of the two
    /// remembered moves. Recording the current front move again leaves the
    /// pair unchanged.
    pub fn record(&mut self, mv: Move, ply: usize) {
        let Some(slots) = self.plies.get_mut(ply) else { return };
        if slots.recent != Some(mv) {
            slots.older = slots.recent;
            slots.recent = Some(mv);
        }
    }

    /// Returns the ordering bonus for the move: `KILLER_BONUS` when it is
    /// one of the refutations remembered at this ply, zero otherwise.
    pub fn bonus(&self, mv: Move, ply: usize) -> i32 {
        match self.plies.get(ply) {
            Some(slots) if slots.recent == Some(mv) || slots.older == Some(mv) => KILLER_BONUS,
            _ => 0,
        }
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        const EMPTY: Slots = Slots { recent: None, older: None };
        Self { plies: [EMPTY; MAX_SEARCH_PLY] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn mv(from: &str, to: &str) -> Move {
        Move::new(Square::try_from(from).unwrap(), Square::try_from(to).unwrap())
    }

    #[test]
    fn refutations_rotate_through_two_slots() {
        let mut killers = KillerMoves::default();
        let first = mv("a2", "a3");
        let second = mv("c2", "c3");
        let third = mv("d2", "d3");

        killers.record(first, 3);
        killers.record(second, 3);
        assert_eq!(killers.bonus(first, 3), KILLER_BONUS);
        assert_eq!(killers.bonus(second, 3), KILLER_BONUS);

        killers.record(third, 3);
        assert_eq!(killers.bonus(first, 3), 0);
        assert_eq!(killers.bonus(third, 3), KILLER_BONUS);

        // Other plies are unaffected.
        assert_eq!(killers.bonus(third, 4), 0);
    }

    #[test]
    fn re_recording_the_front_move_keeps_the_older_slot() {
        let mut killers = KillerMoves::default();
        let first = mv("a2", "a3");
        let second = mv("c2", "c3");

        killers.record(first, 0);
        killers.record(second, 0);
        killers.record(second, 0);

        assert_eq!(killers.bonus(first, 0), KILLER_BONUS);
        assert_eq!(killers.bonus(second, 0), KILLER_BONUS);
    }

    #[test]
    fn out_of_range_plies_are_ignored() {
        let mut killers = KillerMoves::default();
        let refutation = mv("a2", "a3");

        killers.record(refutation, MAX_SEARCH_PLY + 1);
        assert_eq!(killers.bonus(refutation, MAX_SEARCH_PLY + 1), 0);
    }
}
