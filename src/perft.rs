//! Perft used for testing, debugging and benchmarking the move generator.
//! This is achieved by enumerating the number of leaf nodes for a given
//! depth.
//!
//! See [Perft](https://www.chessprogramming.org/Perft) for more information.

use crate::board::Board;

/// Counts the leaf nodes of the legal move tree to the given depth.
pub fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.generate_moves() {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        board.undo_move();
    }

    nodes
}
