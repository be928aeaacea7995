//! Mello Arcade - minigames for the Mello club website
//!
//! Core modules:
//! - `sim`: Deterministic arcade simulation (runner, flyer, pools, collisions)
//! - `tictactoe`: Board, minimax opponent and match flow
//! - `session`: Endgame, personal best and score submission
//! - `leaderboard`: Shared hall of fame client
//! - `renderer`: Draw lists and the Canvas2D backend
//! - `platform`: Frame scheduling and browser/native differences
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod leaderboard;
pub mod membership;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tictactoe;
pub mod tuning;

pub use highscores::LocalRecords;
pub use session::{Session, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (one tick per 60 Hz frame)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Name recorded when the player leaves the name field blank
    pub const ANONYMOUS_NAME: &str = "Unbekannt";
    /// Entries kept in the per-game local hall of fame
    pub const LOCAL_HALL_SIZE: usize = 5;
    /// Rows fetched for the combined hall of fame page
    pub const HALL_OF_FAME_LIMIT: usize = 50;

    /// Score recorded for beating the tic-tac-toe bot
    pub const TICTACTOE_WIN_SCORE: i64 = 1;
    /// Default pacing delay before the bot moves
    pub const BOT_DELAY_MS: u32 = 450;
}

/// The three minigames that share the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Endless runner (MelloRush)
    Runner,
    /// Flappy-style dodger (MelloTap)
    Flyer,
    TicTacToe,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Flyer, GameKind::Runner, GameKind::TicTacToe];

    /// Name stored in the shared leaderboard table
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Runner => "MelloRush",
            GameKind::Flyer => "MelloTap",
            GameKind::TicTacToe => "TicTacToe",
        }
    }
}

/// A game name no table entry or page uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGame(pub String);

impl std::fmt::Display for UnknownGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown game {:?}", self.0)
    }
}

impl std::error::Error for UnknownGame {}

/// Leaderboard or page name. The shared table holds mixed-case names, so
/// matching ignores case.
impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mellorush" | "runner" => Ok(GameKind::Runner),
            "mellotap" | "flyer" => Ok(GameKind::Flyer),
            "tictactoe" => Ok(GameKind::TicTacToe),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a page's `data-game` attribute asks to boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Game(GameKind),
    /// Combined top lists of every game
    HallOfFame,
}

impl FromStr for Page {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hall-of-fame" | "halloffame" => Ok(Page::HallOfFame),
            _ => s.parse().map(Page::Game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_parse_ignores_case() {
        assert_eq!("mellotap".parse::<GameKind>(), Ok(GameKind::Flyer));
        assert_eq!("MelloRush".parse::<GameKind>(), Ok(GameKind::Runner));
        assert_eq!(" TICTACTOE ".parse::<GameKind>(), Ok(GameKind::TicTacToe));
        assert_eq!("snake".parse::<GameKind>(), Err(UnknownGame("snake".to_string())));
    }

    #[test]
    fn test_game_kind_round_trips_through_name() {
        for kind in GameKind::ALL {
            assert_eq!(kind.as_str().parse::<GameKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_page_parse() {
        assert_eq!("hall-of-fame".parse::<Page>(), Ok(Page::HallOfFame));
        assert_eq!("Flyer".parse::<Page>(), Ok(Page::Game(GameKind::Flyer)));
        assert_eq!("tictactoe".parse::<Page>(), Ok(Page::Game(GameKind::TicTacToe)));
        assert!("lobby".parse::<Page>().is_err());
    }
}
