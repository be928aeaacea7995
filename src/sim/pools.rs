//! Transient entity pools: obstacles, trail dots and score popups
//!
//! Pools are plain `Vec`s owned by the running game. Each tick entities are
//! advanced in place, then expired ones are filtered out with `retain`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Pipe, PlayerBody, ScorePopup, TrailDot};

/// Anything that scrolls toward the player and scores once it is cleared
pub trait Scrolling {
    fn x(&self) -> f32;
    fn width(&self) -> f32;
    fn shift(&mut self, dx: f32);
    fn passed(&self) -> bool;
    fn mark_passed(&mut self);

    #[inline]
    fn trailing_edge(&self) -> f32 {
        self.x() + self.width()
    }
}

impl Scrolling for Obstacle {
    fn x(&self) -> f32 {
        self.x
    }
    fn width(&self) -> f32 {
        self.w
    }
    fn shift(&mut self, dx: f32) {
        self.x += dx;
    }
    fn passed(&self) -> bool {
        self.passed
    }
    fn mark_passed(&mut self) {
        self.passed = true;
    }
}

impl Scrolling for Pipe {
    fn x(&self) -> f32 {
        self.x
    }
    fn width(&self) -> f32 {
        self.width
    }
    fn shift(&mut self, dx: f32) {
        self.x += dx;
    }
    fn passed(&self) -> bool {
        self.passed
    }
    fn mark_passed(&mut self) {
        self.passed = true;
    }
}

/// Countdown until the next spawn, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub remaining: f32,
}

impl SpawnTimer {
    /// Decrement by one tick. Returns true when a spawn is due; the caller
    /// spawns and then calls [`SpawnTimer::reset_to`].
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1.0;
        self.remaining <= 0.0
    }

    pub fn reset_to(&mut self, interval: f32) {
        self.remaining = interval;
    }
}

/// Move every entity left by `speed`
pub fn advance<T: Scrolling>(items: &mut [T], speed: f32) {
    for item in items.iter_mut() {
        item.shift(-speed);
    }
}

/// Mark every entity whose trailing edge cleared `back_edge` this tick.
///
/// Returns the number of newly passed entities. Already passed entities are
/// skipped, so each one scores at most once no matter how often this runs.
pub fn award_passes<T: Scrolling>(items: &mut [T], back_edge: f32) -> u32 {
    let mut awarded = 0;
    for item in items.iter_mut() {
        if !item.passed() && item.trailing_edge() < back_edge {
            item.mark_passed();
            awarded += 1;
        }
    }
    awarded
}

/// Drop entities whose trailing edge is at or left of `threshold`
pub fn retire_offscreen<T: Scrolling>(items: &mut Vec<T>, threshold: f32) {
    items.retain(|item| item.trailing_edge() > threshold);
}

/// Spawn a burst of trail dots just behind the player
pub fn burst_trail<R: Rng>(trail: &mut Vec<TrailDot>, rng: &mut R, player: &PlayerBody, count: u32) {
    for _ in 0..count {
        trail.push(TrailDot {
            pos: Vec2::new(
                player.pos.x - 10.0 - rng.random::<f32>() * 10.0,
                player.pos.y + (rng.random::<f32>() - 0.5) * 10.0,
            ),
            alpha: 1.0,
        });
    }
}

/// Drift trail dots left and fade them out
pub fn update_trail(trail: &mut Vec<TrailDot>, drift: f32, fade: f32) {
    for dot in trail.iter_mut() {
        dot.pos.x -= drift;
        dot.alpha -= fade;
    }
    trail.retain(|d| d.alpha > 0.0);
}

/// Let popups float up and expire
pub fn update_popups(popups: &mut Vec<ScorePopup>, rise: f32) {
    for popup in popups.iter_mut() {
        popup.pos.y -= rise;
        popup.life -= 1.0;
    }
    popups.retain(|p| p.life > 0.0);
}
