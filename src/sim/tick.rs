//! The per-tick contract shared by the arcade games

use super::state::{EndReason, GameEvent};
use crate::GameKind;

/// Result of advancing a game by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Ended(EndReason),
}

impl TickOutcome {
    pub fn is_ended(&self) -> bool {
        matches!(self, TickOutcome::Ended(_))
    }
}

/// An arcade game driven one fixed tick at a time
///
/// Implementations own every entity of the play-through. All mutation goes
/// through these methods, called from the single loop that owns the game.
pub trait Arcade {
    const KIND: GameKind;

    /// Advance one tick. After `Ended` is returned the game must not be
    /// ticked again until [`Arcade::reset`].
    fn tick(&mut self) -> TickOutcome;

    /// Jump or flap. Returns false if the input was ignored.
    fn trigger_jump(&mut self) -> bool;

    /// Back to the initial state: empty pools, score 0, player at rest
    fn reset(&mut self);

    fn score(&self) -> u32;

    /// Canvas size in pixels
    fn size(&self) -> (f32, f32);

    /// React to a new canvas size
    fn resize(&mut self, width: f32, height: f32);

    /// Demo-mode decision: should the player jump this tick?
    fn autopilot(&self) -> bool;

    /// Events produced since the last call
    fn drain_events(&mut self) -> Vec<GameEvent>;
}

/// Advance `game` by `steps` ticks, stopping early if it ends.
///
/// Returns the outcome of the last tick run.
pub fn run_ticks<G: Arcade>(game: &mut G, steps: u32) -> TickOutcome {
    let mut outcome = TickOutcome::Running;
    for _ in 0..steps {
        outcome = game.tick();
        if outcome.is_ended() {
            break;
        }
    }
    outcome
}
