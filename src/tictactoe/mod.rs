//! Tic-tac-toe against an unbeatable bot

pub mod board;
pub mod game;
pub mod minimax;

pub use board::{Board, LINES, Mark, MoveError};
pub use game::{BotTicket, Outcome, TicTacToeMatch, Turn};
pub use minimax::{best_move, best_move_for};
