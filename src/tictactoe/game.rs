//! One tic-tac-toe match against the bot
//!
//! The human always opens. A human move hands back a [`BotTicket`]; the page
//! waits the configured delay and then redeems it with
//! [`TicTacToeMatch::apply_bot_move`]. Resetting bumps the generation, so a
//! ticket issued before the reset is refused even if its timer still fires.

use super::board::{Board, Mark, MoveError};
use super::minimax::best_move;
use crate::GameKind;
use crate::consts::TICTACTOE_WIN_SCORE;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::platform::now_iso;
use crate::session::{Identity, SubmitError};

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Human,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HumanWin,
    BotWin,
    Draw,
}

/// Claim on one pending bot move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTicket {
    generation: u64,
}

/// A match in progress (or just finished)
#[derive(Debug, Clone, Default)]
pub struct TicTacToeMatch {
    board: Board,
    bot_turn: bool,
    generation: u64,
    prompt_open: bool,
}

impl TicTacToeMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Turn {
        if self.bot_turn { Turn::Bot } else { Turn::Human }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.winner() {
            Some((Mark::Human, _)) => Some(Outcome::HumanWin),
            Some((Mark::Bot, _)) => Some(Outcome::BotWin),
            None if self.board.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }

    /// Slots of the winning line, for highlighting
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.board.winner().map(|(_, line)| line)
    }

    /// Board input is ignored while the bot is thinking
    pub fn is_locked(&self) -> bool {
        self.bot_turn && self.outcome().is_none()
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Status line shown above the board
    pub fn status(&self) -> &'static str {
        match self.outcome() {
            Some(Outcome::HumanWin) => "Du hast gewonnen!",
            Some(Outcome::BotWin) => "Mello-Bot gewinnt. Wie immer.",
            Some(Outcome::Draw) => "Unentschieden.",
            None if self.bot_turn => "Mello ist dran (O)…",
            None => "Dein Zug (X)",
        }
    }

    /// Place an X. Returns the ticket for the bot's reply, or `None` if the
    /// move ended the game.
    pub fn human_move(&mut self, slot: usize) -> Result<Option<BotTicket>, MoveError> {
        if self.outcome().is_some() {
            return Err(MoveError::GameOver);
        }
        if self.bot_turn {
            return Err(MoveError::NotYourTurn);
        }
        self.board.place(slot, Mark::Human)?;

        match self.outcome() {
            Some(Outcome::HumanWin) => {
                log::info!("Human beat the bot");
                self.prompt_open = true;
                Ok(None)
            }
            Some(outcome) => {
                log::info!("Match over: {:?}", outcome);
                Ok(None)
            }
            None => {
                self.bot_turn = true;
                Ok(Some(BotTicket {
                    generation: self.generation,
                }))
            }
        }
    }

    /// Redeem a ticket: the bot plays its minimax move.
    /// Returns the slot played, or `None` if the ticket is stale.
    pub fn apply_bot_move(&mut self, ticket: BotTicket) -> Option<usize> {
        if ticket.generation != self.generation || !self.bot_turn {
            log::debug!("Ignoring stale bot ticket");
            return None;
        }
        let slot = best_move(&self.board)?;
        self.board.place(slot, Mark::Bot).ok()?;
        self.bot_turn = false;
        if let Some(outcome) = self.outcome() {
            log::info!("Match over: {:?}", outcome);
        }
        Some(slot)
    }

    /// Fresh board, human to move. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.bot_turn = false;
        self.generation += 1;
        self.prompt_open = false;
    }

    /// Record a win on the leaderboard. A name is required here; a blank one
    /// leaves the prompt open.
    pub fn submit_identity<L: Leaderboard>(
        &mut self,
        identity: Identity,
        leaderboard: &mut L,
    ) -> Result<LeaderboardEntry, SubmitError> {
        if !self.prompt_open {
            return Err(SubmitError::NoOpenPrompt);
        }
        let identity = identity.normalized();
        if identity.name.is_empty() {
            return Err(SubmitError::MissingName);
        }

        let entry = LeaderboardEntry {
            game: GameKind::TicTacToe,
            name: identity.name,
            score: TICTACTOE_WIN_SCORE,
            contact: identity.contact,
            date: now_iso(),
        };
        entry.validate().map_err(SubmitError::InvalidEntry)?;

        leaderboard.submit(entry.clone());
        self.reset();
        Ok(entry)
    }

    /// Close the prompt without recording anything and start over
    pub fn dismiss_prompt(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::MemoryLeaderboard;

    /// Drive a human line against an opponent that plays into it
    fn rigged_human_win() -> TicTacToeMatch {
        let mut m = TicTacToeMatch::new();
        m.board.place(0, Mark::Human).unwrap();
        m.board.place(3, Mark::Bot).unwrap();
        m.board.place(1, Mark::Human).unwrap();
        m.board.place(4, Mark::Bot).unwrap();
        m.human_move(2).unwrap();
        m
    }

    #[test]
    fn test_human_move_hands_turn_to_bot() {
        let mut m = TicTacToeMatch::new();
        let ticket = m.human_move(4).unwrap();
        assert!(ticket.is_some());
        assert_eq!(m.turn(), Turn::Bot);
        assert!(m.is_locked());
        assert_eq!(m.human_move(0), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_bot_replies_with_minimax() {
        let mut m = TicTacToeMatch::new();
        let ticket = m.human_move(4).unwrap().unwrap();
        let slot = m.apply_bot_move(ticket).unwrap();
        // Corner reply to a center opening, lowest index first
        assert_eq!(slot, 0);
        assert_eq!(m.turn(), Turn::Human);
        // A ticket only works once
        assert_eq!(m.apply_bot_move(ticket), None);
    }

    #[test]
    fn test_stale_ticket_ignored_after_reset() {
        let mut m = TicTacToeMatch::new();
        let ticket = m.human_move(4).unwrap().unwrap();
        m.reset();
        m.human_move(8).unwrap();
        let before = *m.board();
        assert_eq!(m.apply_bot_move(ticket), None);
        assert_eq!(*m.board(), before);
    }

    #[test]
    fn test_occupied_slot_rejected() {
        let mut m = TicTacToeMatch::new();
        let ticket = m.human_move(4).unwrap().unwrap();
        m.apply_bot_move(ticket);
        assert_eq!(m.human_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(m.human_move(12), Err(MoveError::OutOfRange(12)));
        assert_eq!(m.turn(), Turn::Human);
    }

    #[test]
    fn test_bot_always_answers_until_game_over() {
        let mut m = TicTacToeMatch::new();
        // Human always takes the lowest free slot
        while m.outcome().is_none() {
            let slot = m.board().empty_slots().next().unwrap();
            if let Some(ticket) = m.human_move(slot).unwrap() {
                m.apply_bot_move(ticket).unwrap();
            }
        }
        assert_ne!(m.outcome(), Some(Outcome::HumanWin));
        assert!(!m.prompt_open());
        assert_eq!(m.human_move(0).err(), Some(MoveError::GameOver));
    }

    #[test]
    fn test_human_win_opens_prompt() {
        let m = rigged_human_win();
        assert_eq!(m.outcome(), Some(Outcome::HumanWin));
        assert_eq!(m.winning_line(), Some([0, 1, 2]));
        assert!(m.prompt_open());
        assert_eq!(m.status(), "Du hast gewonnen!");
    }

    #[test]
    fn test_submit_requires_name() {
        let mut m = rigged_human_win();
        let mut board = MemoryLeaderboard::new();
        let err = m.submit_identity(Identity::new("  ", ""), &mut board);
        assert_eq!(err, Err(SubmitError::MissingName));
        assert!(m.prompt_open());
        assert!(board.entries().is_empty());
    }

    #[test]
    fn test_submit_records_win_and_resets() {
        let mut m = rigged_human_win();
        let mut board = MemoryLeaderboard::new();
        let entry = m.submit_identity(Identity::new(" Mia ", " "), &mut board).unwrap();
        assert_eq!(entry.name, "Mia");
        assert_eq!(entry.score, 1);
        assert_eq!(entry.contact, None);
        assert_eq!(entry.game, GameKind::TicTacToe);
        assert_eq!(board.entries().len(), 1);
        assert!(!m.prompt_open());
        assert_eq!(m.board().empty_slots().count(), 9);
    }

    #[test]
    fn test_submit_without_prompt() {
        let mut m = TicTacToeMatch::new();
        let mut board = MemoryLeaderboard::new();
        assert_eq!(
            m.submit_identity(Identity::new("Mia", ""), &mut board),
            Err(SubmitError::NoOpenPrompt)
        );
    }
}
