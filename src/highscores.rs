//! High score persistence
//!
//! One scalar, stored in LocalStorage as decimal text. Absent or garbage
//! values read as zero.

/// Best final score seen across sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lumen_rush_highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a finished run. Persists and returns true only when the score
    /// beats the stored best.
    pub fn record(&mut self, final_score: u32) -> bool {
        if final_score > self.best {
            self.best = final_score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the stored best from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                let best = text.trim().parse::<u32>().unwrap_or(0);
                log::info!("Loaded high score: {}", best);
                return Self { best };
            }
        }

        log::info!("No stored high score, starting at 0");
        Self::new()
    }

    /// Write the current best to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved: {}", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // No-op for native
    }
}
