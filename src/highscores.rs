//! Best score per game
//!
//! One number per game, read at load and written at game over.

use crate::error::Result;
use crate::platform::Storage;

/// Storage key for Wild Boar Life (best score)
pub const BOAR_KEY: &str = "wild_boar_best";
/// Storage key for the platformer (furthest level cleared)
pub const SHADOW_KEY: &str = "shadow_best_level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    pub best: u64,
}

impl HighScore {
    pub fn new(key: &'static str) -> Self {
        Self { key, best: 0 }
    }

    /// Read the stored best; anything unreadable counts as zero
    pub fn load(storage: &dyn Storage, key: &'static str) -> Self {
        let best = match storage.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<u64>(&raw) {
                Ok(best) => best,
                Err(e) => {
                    log::warn!("Discarding corrupt best score under {key}: {e}");
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Best score unavailable: {e}");
                0
            }
        };
        Self { key, best }
    }

    /// Offer a final score; returns whether it beat the previous best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            log::info!("New best for {}: {} (was {})", self.key, score, self.best);
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.set(self.key, &serde_json::to_string(&self.best)?)
    }
}
