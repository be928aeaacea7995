//! Exhaustive minimax for the bot
//!
//! The bot (O) maximizes, the human (X) minimizes. Wins are worth
//! `10 - depth` so faster wins and slower losses are preferred; a full board
//! without a line is 0. The board has at most 9! leaves, so no pruning.

use super::board::{Board, Mark};

const WIN: i32 = 10;

/// Value of `board` with `to_move` about to play, `depth` plies from the root
pub fn score(board: &Board, depth: i32, to_move: Mark) -> i32 {
    match board.winner() {
        Some((Mark::Bot, _)) => return WIN - depth,
        Some((Mark::Human, _)) => return depth - WIN,
        None => {}
    }
    if board.is_full() {
        return 0;
    }
    search(board, depth, to_move).0
}

/// Best (value, slot) for `to_move`. Ties keep the lowest slot index.
fn search(board: &Board, depth: i32, to_move: Mark) -> (i32, Option<usize>) {
    let mut best: Option<(i32, usize)> = None;
    for slot in board.empty_slots() {
        let value = score(&board.with(slot, to_move), depth + 1, to_move.opponent());
        let better = match best {
            None => true,
            Some((b, _)) => match to_move {
                Mark::Bot => value > b,
                Mark::Human => value < b,
            },
        };
        if better {
            best = Some((value, slot));
        }
    }
    match best {
        Some((value, slot)) => (value, Some(slot)),
        None => (0, None),
    }
}

/// The bot's move, or `None` if the game is already decided
pub fn best_move(board: &Board) -> Option<usize> {
    best_move_for(board, Mark::Bot)
}

/// Optimal move for either side (the native demo plays both)
pub fn best_move_for(board: &Board, mark: Mark) -> Option<usize> {
    if board.is_terminal() {
        return None;
    }
    search(board, 0, mark).1
}
