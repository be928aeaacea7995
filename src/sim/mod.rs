//! Deterministic arcade simulation
//!
//! All gameplay logic for the runner and the flyer lives here. This module
//! must stay pure and deterministic:
//! - One fixed tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod flyer;
pub mod pools;
pub mod runner;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Rect, circle_rect_collision, circle_rect_overlap};
pub use difficulty::{Difficulty, DifficultyCurve};
pub use flyer::FlyerState;
pub use runner::RunnerState;
pub use state::{EndReason, GameEvent, Obstacle, Pipe, PlayerBody, ScorePopup, TrailDot};
pub use tick::{Arcade, TickOutcome, run_ticks};
