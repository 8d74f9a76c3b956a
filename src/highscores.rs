//! High score watermark and theme preference storage
//!
//! The core only reads the current high score and writes a new one; where it
//! lives is up to the embedding app.

use serde::{Deserialize, Serialize};

use crate::settings::Theme;

/// Persistence collaborator for the session
pub trait ScoreStore {
    /// Best total score ever reached
    fn high_score(&self) -> u64;
    /// Record a new best total score
    fn save_high_score(&mut self, score: u64);
    /// Theme the player picked, if any
    fn selected_theme(&self) -> Option<Theme> {
        None
    }
}

/// In-memory store, serializable as JSON for simple key/value backends
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    pub high_score: u64,
    #[serde(default)]
    pub selected_theme: Option<String>,
}

impl MemoryStore {
    /// Storage key for key/value backends
    pub const STORAGE_KEY: &'static str = "gravity_jumper_prefs";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            selected_theme: None,
        }
    }

    pub fn set_selected_theme(&mut self, theme: Theme) {
        self.selected_theme = Some(theme.as_str().to_string());
    }

    /// Load from JSON, starting fresh on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<MemoryStore>(json) {
            Ok(store) => {
                log::info!("Loaded preferences (high score {})", store.high_score);
                store
            }
            Err(e) => {
                log::warn!("Unreadable preferences ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl ScoreStore for MemoryStore {
    fn high_score(&self) -> u64 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u64) {
        self.high_score = score;
        log::info!("High score saved ({})", score);
    }

    fn selected_theme(&self) -> Option<Theme> {
        self.selected_theme.as_deref().and_then(Theme::from_str)
    }
}
