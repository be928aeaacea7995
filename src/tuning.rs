//! Data-driven game balance
//!
//! `Tuning::default()` is the shipped balance. A JSON document can override
//! any subset of it; missing fields keep their defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::difficulty::DifficultyCurve;

/// MelloRush balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub curve: DifficultyCurve,
    pub player_x: f32,
    pub player_radius: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_strength: f32,
    /// Distance from the bottom of the canvas to the ground line
    pub ground_margin: f32,
    pub max_width: f32,
    pub min_height: f32,
    /// Canvas height as a fraction of its width
    pub height_ratio: f32,
    pub obstacle_base_height: f32,
    pub obstacle_height_jitter: f32,
    pub obstacle_min_width: f32,
    pub obstacle_width_jitter: f32,
    /// How far right of the canvas edge obstacles appear
    pub spawn_offset: f32,
    /// Obstacles are dropped once their trailing edge passes `-retire_margin`
    pub retire_margin: f32,
    pub trail_burst: u32,
    /// Trail drift as a fraction of the scroll speed
    pub trail_drift_factor: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            curve: DifficultyCurve::RUNNER,
            player_x: 80.0,
            player_radius: 18.0,
            jump_strength: -16.5,
            ground_margin: 60.0,
            max_width: 1000.0,
            min_height: 320.0,
            height_ratio: 0.42,
            obstacle_base_height: 30.0,
            obstacle_height_jitter: 50.0,
            obstacle_min_width: 22.0,
            obstacle_width_jitter: 36.0,
            spawn_offset: 20.0,
            retire_margin: 50.0,
            trail_burst: 10,
            trail_drift_factor: 0.6,
        }
    }
}

impl RunnerTuning {
    /// Canvas size for a viewport of the given width
    pub fn canvas_size(&self, viewport_width: f32) -> (f32, f32) {
        let width = (viewport_width - 32.0).min(self.max_width).max(1.0);
        let height = (width * self.height_ratio).round().max(self.min_height);
        (width, height)
    }
}

/// MelloTap balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyerTuning {
    pub curve: DifficultyCurve,
    pub player_x: f32,
    pub player_start_y: f32,
    pub player_radius: f32,
    /// Vertical velocity set by every flap (negative is up)
    pub flap_strength: f32,
    pub pipe_width: f32,
    /// Lowest possible gap center
    pub gap_center_min: f32,
    pub gap_center_jitter: f32,
    pub spawn_offset: f32,
    pub max_width: f32,
    pub height: f32,
    pub trail_burst: u32,
    pub trail_drift: f32,
}

impl Default for FlyerTuning {
    fn default() -> Self {
        Self {
            curve: DifficultyCurve::FLYER,
            player_x: 160.0,
            player_start_y: 250.0,
            player_radius: 14.0,
            flap_strength: -4.8,
            pipe_width: 40.0,
            gap_center_min: 120.0,
            gap_center_jitter: 240.0,
            spawn_offset: 40.0,
            max_width: 800.0,
            height: 480.0,
            trail_burst: 8,
            trail_drift: 1.5,
        }
    }
}

impl FlyerTuning {
    pub fn canvas_size(&self, viewport_width: f32) -> (f32, f32) {
        ((viewport_width - 32.0).min(self.max_width).max(1.0), self.height)
    }
}

/// Cosmetic effect constants shared by both games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsTuning {
    /// Alpha lost by each trail dot per tick
    pub trail_fade: f32,
    /// Ticks a "+1" popup stays visible
    pub popup_life: f32,
    pub popup_rise: f32,
}

impl Default for EffectsTuning {
    fn default() -> Self {
        Self {
            trail_fade: 0.03,
            popup_life: 30.0,
            popup_rise: 1.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub runner: RunnerTuning,
    pub flyer: FlyerTuning,
    pub effects: EffectsTuning,
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid tuning document")
    }

    /// Load a tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "runner": { "jump_strength": -20.0 } }"#).unwrap();
        assert_eq!(tuning.runner.jump_strength, -20.0);
        assert_eq!(tuning.runner.player_radius, 18.0);
        assert_eq!(tuning.flyer, FlyerTuning::default());
    }

    #[test]
    fn test_curve_override_must_be_complete() {
        // Curves are replaced whole
        assert!(Tuning::from_json(r#"{ "flyer": { "curve": { "gap_cap": 40.0 } } }"#).is_err());

        let mut curve = DifficultyCurve::FLYER;
        curve.gap_cap = 40.0;
        let json = format!(r#"{{ "flyer": {{ "curve": {} }} }}"#, serde_json::to_string(&curve).unwrap());
        let tuning = Tuning::from_json(&json).unwrap();
        assert_eq!(tuning.flyer.curve, curve);
        assert_eq!(tuning.flyer.curve.at(100).gap, 110.0);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Tuning::from_json("{ runner: ").is_err());
    }

    #[test]
    fn test_runner_canvas_size() {
        let tuning = RunnerTuning::default();
        assert_eq!(tuning.canvas_size(1400.0), (1000.0, 420.0));
        // Narrow phones keep the minimum height
        assert_eq!(tuning.canvas_size(400.0), (368.0, 320.0));
    }

    #[test]
    fn test_flyer_canvas_size() {
        let tuning = FlyerTuning::default();
        assert_eq!(tuning.canvas_size(1920.0), (800.0, 480.0));
    }
}
