//! Visual preferences
//!
//! Persisted separately from the high score in LocalStorage, as JSON.

use serde::{Deserialize, Serialize};

/// Player-tweakable rendering switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background grid lines
    pub grid: bool,
    /// Particle bursts
    pub particles: bool,
    /// Glow (canvas shadow blur) around entities; the most expensive effect
    pub glow: bool,
    /// FPS counter in the HUD
    pub show_fps: bool,
    /// Minimize flicker and jitter effects
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: true,
            particles: true,
            glow: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lumen_rush_settings";

    /// Effective enemy flicker/jitter (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
