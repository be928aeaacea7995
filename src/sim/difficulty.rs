//! Score-driven difficulty
//!
//! Both arcade games ramp up through the same parameterized curve; only the
//! table differs. Everything here is a pure function of the cumulative score
//! and is recomputed every tick.

use serde::{Deserialize, Serialize};

/// Spawn intervals never drop below one tick
pub const MIN_SPAWN_INTERVAL: f32 = 1.0;
/// Pipe gaps never close completely
pub const MIN_GAP: f32 = 1.0;

/// Difficulty configuration table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    /// Horizontal scroll speed at score 0 (px/tick)
    pub base_speed: f32,
    pub speed_per_point: f32,
    /// Downward acceleration at score 0 (px/tick²)
    pub base_gravity: f32,
    pub gravity_per_point: f32,
    /// Ticks between spawns at score 0
    pub spawn_interval: f32,
    pub spawn_interval_per_point: f32,
    pub spawn_interval_floor: f32,
    /// Vertical opening between pipes at score 0 (flyer only)
    pub gap_base: f32,
    pub gap_per_point: f32,
    /// Maximum total gap reduction
    pub gap_cap: f32,
    /// Extra obstacle height per point (runner only)
    pub height_per_point: f32,
}

/// Parameters in effect for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub speed: f32,
    pub gravity: f32,
    pub spawn_interval: f32,
    pub gap: f32,
    pub height_bonus: f32,
}

impl DifficultyCurve {
    /// MelloRush: everything speeds up, obstacles get denser and taller
    pub const RUNNER: Self = Self {
        base_speed: 6.0,
        speed_per_point: 0.08,
        base_gravity: 0.85,
        gravity_per_point: 0.0045,
        spawn_interval: 115.0,
        spawn_interval_per_point: 0.9,
        spawn_interval_floor: 45.0,
        gap_base: 0.0,
        gap_per_point: 0.0,
        gap_cap: 0.0,
        height_per_point: 0.05,
    };

    /// MelloTap: constant pace, only the gap narrows
    pub const FLYER: Self = Self {
        base_speed: 3.6,
        speed_per_point: 0.0,
        base_gravity: 0.23,
        gravity_per_point: 0.0,
        spawn_interval: 110.0,
        spawn_interval_per_point: 0.0,
        spawn_interval_floor: 110.0,
        gap_base: 150.0,
        gap_per_point: 1.5,
        gap_cap: 60.0,
        height_per_point: 0.0,
    };

    /// Evaluate the curve at cumulative score `score`
    pub fn at(&self, score: u32) -> Difficulty {
        let s = score as f32;
        let spawn_interval = (self.spawn_interval - s * self.spawn_interval_per_point)
            .max(self.spawn_interval_floor)
            .max(MIN_SPAWN_INTERVAL);
        let gap = (self.gap_base - (s * self.gap_per_point).min(self.gap_cap)).max(MIN_GAP);

        Difficulty {
            speed: self.base_speed + s * self.speed_per_point,
            gravity: self.base_gravity + s * self.gravity_per_point,
            spawn_interval,
            gap,
            height_bonus: s * self.height_per_point,
        }
    }

    /// Narrowest gap the curve can ever produce
    pub fn gap_floor(&self) -> f32 {
        (self.gap_base - self.gap_cap).max(MIN_GAP)
    }
}
