//! Entity types shared by the arcade games
//!
//! Everything here lives for one session only and is dropped on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// The player's ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// `x` is a fixed anchor, only `y` moves
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    /// Resting on the ground line (runner only)
    pub grounded: bool,
}

impl PlayerBody {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            vel_y: 0.0,
            grounded: false,
        }
    }

    /// Apply one tick of gravity
    #[inline]
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
    }

    /// Stop on the ground line. Returns true if the body is resting on it.
    pub fn clamp_to_ground(&mut self, ground_y: f32) -> bool {
        let rest_y = ground_y - self.radius;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vel_y = 0.0;
            self.grounded = true;
        }
        self.grounded
    }

    /// Jump if grounded (runner)
    pub fn try_jump(&mut self, strength: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = strength;
        self.grounded = false;
        true
    }

    /// Flap unconditionally (flyer)
    #[inline]
    pub fn flap(&mut self, strength: f32) {
        self.vel_y = strength;
    }

    /// Whether any part of the ball has left `[0, height]`
    pub fn out_of_bounds(&self, height: f32) -> bool {
        self.pos.y + self.radius > height || self.pos.y - self.radius < 0.0
    }

    /// Left-most x of the ball; obstacles score once they clear it
    #[inline]
    pub fn back_edge(&self) -> f32 {
        self.pos.x - self.radius
    }
}

/// A runner obstacle standing on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub passed: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// A flyer pipe pair with an opening around `gap_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    /// Center of the opening
    pub gap_y: f32,
    pub width: f32,
    /// Opening height, refreshed every tick from the difficulty curve
    pub gap: f32,
    pub passed: bool,
}

impl Pipe {
    /// Upper pipe, from the top of the canvas down to the opening
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, (self.gap_y - self.gap / 2.0).max(0.0))
    }

    /// Lower pipe, from the opening down to `height`
    pub fn bottom_rect(&self, height: f32) -> Rect {
        let top = self.gap_y + self.gap / 2.0;
        Rect::new(self.x, top, self.width, (height - top).max(0.0))
    }
}

/// Cosmetic particle left behind by a jump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailDot {
    pub pos: Vec2,
    /// 1.0 when spawned, removed at 0
    pub alpha: f32,
}

/// Floating "+1" shown on each point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    /// Remaining ticks
    pub life: f32,
}

/// Why an arcade session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision,
    OutOfBounds,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Scored { score: u32 },
    Ended(EndReason),
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_clamp_zeroes_velocity() {
        let mut body = PlayerBody::new(Vec2::new(80.0, 100.0), 18.0);
        body.vel_y = 30.0;
        body.integrate(1.0);
        assert!(body.clamp_to_ground(120.0));
        assert_eq!(body.pos.y, 102.0);
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut body = PlayerBody::new(Vec2::new(80.0, 102.0), 18.0);
        assert!(!body.try_jump(-16.5));
        body.grounded = true;
        assert!(body.try_jump(-16.5));
        assert_eq!(body.vel_y, -16.5);
        assert!(!body.grounded);
        assert!(!body.try_jump(-16.5));
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let mut body = PlayerBody::new(Vec2::new(160.0, 14.0), 14.0);
        assert!(!body.out_of_bounds(480.0));
        body.pos.y = 13.9;
        assert!(body.out_of_bounds(480.0));
        body.pos.y = 466.5;
        assert!(body.out_of_bounds(480.0));
    }

    #[test]
    fn test_pipe_rects_frame_the_gap() {
        let pipe = Pipe {
            x: 300.0,
            gap_y: 200.0,
            width: 40.0,
            gap: 150.0,
            passed: false,
        };
        let top = pipe.top_rect();
        let bottom = pipe.bottom_rect(480.0);
        assert_eq!(top.bottom(), 125.0);
        assert_eq!(bottom.y, 275.0);
        assert_eq!(bottom.bottom(), 480.0);
    }
}
