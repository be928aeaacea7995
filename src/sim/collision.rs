//! Collision detection between the player circle and axis-aligned obstacles
//!
//! Every obstacle in both arcade games is a rectangle (a pipe is two), and the
//! player is always a circle, so one test covers everything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point inside (or on the border of) the rectangle closest to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// Result of a circle/rectangle test
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circle touches or overlaps the rectangle
    pub hit: bool,
    /// Closest point on the rectangle to the circle center
    pub point: Vec2,
    /// Squared distance from the circle center to `point`
    pub distance_sq: f32,
}

/// Full circle vs rectangle test
///
/// Clamps the center onto the rectangle per axis and compares the squared
/// distance to r². Touching counts as a hit.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let point = rect.nearest_point(center);
    let distance_sq = center.distance_squared(point);
    CollisionResult {
        hit: distance_sq <= radius * radius,
        point,
        distance_sq,
    }
}

/// Boolean form of [`circle_rect_collision`] used in the tick loops
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    circle_rect_collision(center, radius, rect).hit
}
