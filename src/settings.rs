//! Player preferences
//!
//! Persisted separately from local records in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::BOT_DELAY_MS;

/// Longest bot delay accepted from a stored document
const MAX_BOT_DELAY_MS: u32 = 5000;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Dot trail behind the ball on jump/flap
    pub trails: bool,
    /// "+1" popups on scoring
    pub score_popups: bool,
    /// Soft glow around the ball
    pub glow: bool,

    // === HUD ===
    /// Show the personal best next to the score
    pub show_best: bool,

    // === Tic-tac-toe ===
    /// Pause before the bot answers, in milliseconds
    pub bot_delay_ms: u32,

    // === Records ===
    /// Forget personal bests every time the page loads
    pub reset_best_on_load: bool,

    // === Accessibility ===
    /// Reduced motion (no trails, popups or glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trails: true,
            score_popups: true,
            glow: true,

            show_best: true,

            bot_delay_ms: BOT_DELAY_MS,

            reset_best_on_load: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective trails (respects reduced_motion)
    pub fn effective_trails(&self) -> bool {
        self.trails && !self.reduced_motion
    }

    /// Effective score popups (respects reduced_motion)
    pub fn effective_popups(&self) -> bool {
        self.score_popups && !self.reduced_motion
    }

    /// Effective glow (respects reduced_motion)
    pub fn effective_glow(&self) -> bool {
        self.glow && !self.reduced_motion
    }

    /// Bot delay clamped to a sane range
    pub fn bot_delay_ms(&self) -> u32 {
        self.bot_delay_ms.min(MAX_BOT_DELAY_MS)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mello_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bot_delay_ms, 450);
        assert!(!settings.reset_best_on_load);
        assert!(settings.effective_trails());
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_trails());
        assert!(!settings.effective_popups());
        assert!(!settings.effective_glow());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"bot_delay_ms": 90000}"#).unwrap();
        assert_eq!(settings.bot_delay_ms(), 5000);
        assert!(settings.trails);
    }
}
