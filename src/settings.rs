//! Simulation tuning and theme identifiers
//!
//! Tuning is plain data so it can be loaded from JSON; themes are only
//! identifiers here, colors and art belong to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::AvatarTuning;

/// Visual themes, cycled per level unless the player picked one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Space,
    Underwater,
    Lava,
    Forest,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Classic,
        Theme::Space,
        Theme::Underwater,
        Theme::Lava,
        Theme::Forest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Space => "Space",
            Theme::Underwater => "Underwater",
            Theme::Lava => "Lava",
            Theme::Forest => "Forest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "space" => Some(Theme::Space),
            "underwater" => Some(Theme::Underwater),
            "lava" => Some(Theme::Lava),
            "forest" => Some(Theme::Forest),
            _ => None,
        }
    }

    /// Theme for a 1-based level number
    pub fn for_level(level: u32) -> Self {
        let index = level.saturating_sub(1) as usize % Self::ALL.len();
        Self::ALL[index]
    }
}

/// Physics and level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Avatar physics ===
    /// Gravity acceleration (units/tick²)
    pub gravity: f32,
    /// Velocity multiplier applied each tick (0.98 feels icier)
    pub drag: f32,
    /// Per-axis velocity clamp (units/tick)
    pub max_speed: f32,
    /// Horizontal bounce damping (0.0 - 1.0)
    pub bounce_x: f32,
    /// Vertical bounce damping (0.0 - 1.0)
    pub bounce_y: f32,

    // === Avatar size ===
    pub avatar_width: u32,
    pub avatar_height: u32,

    // === Level size ===
    pub level_width: u32,
    pub level_height: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
            max_speed: MAX_SPEED,
            bounce_x: BOUNCE_X,
            bounce_y: BOUNCE_Y,

            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,

            level_width: LEVEL_WIDTH,
            level_height: LEVEL_HEIGHT,
        }
    }
}

impl SimConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<SimConfig>(json).map(|c| c.sanitized())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON, falling back to defaults on any error
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded simulation config");
                config
            }
            Err(e) => {
                log::warn!("Invalid simulation config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace values the physics can't work with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v >= 0.0 { v } else { fallback }
        };

        self.gravity = positive(self.gravity, defaults.gravity);
        self.max_speed = positive(self.max_speed, defaults.max_speed);
        self.drag = positive(self.drag, defaults.drag).min(1.0);
        self.bounce_x = positive(self.bounce_x, defaults.bounce_x).min(1.0);
        self.bounce_y = positive(self.bounce_y, defaults.bounce_y).min(1.0);

        if self.avatar_width == 0 {
            self.avatar_width = defaults.avatar_width;
        }
        if self.avatar_height == 0 {
            self.avatar_height = defaults.avatar_height;
        }
        if self.level_width == 0 {
            self.level_width = defaults.level_width;
        }
        if self.level_height == 0 {
            self.level_height = defaults.level_height;
        }
        self
    }

    /// Physics constants for the avatar
    pub fn avatar_tuning(&self) -> AvatarTuning {
        AvatarTuning {
            gravity: self.gravity,
            drag: self.drag,
            max_speed: self.max_speed,
            bounce_x: self.bounce_x,
            bounce_y: self.bounce_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycles_by_level() {
        assert_eq!(Theme::for_level(1), Theme::Classic);
        assert_eq!(Theme::for_level(5), Theme::Forest);
        assert_eq!(Theme::for_level(6), Theme::Classic);
        assert_eq!(Theme::for_level(0), Theme::Classic);
    }

    #[test]
    fn test_theme_names_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("LAVA"), Some(Theme::Lava));
        assert_eq!(Theme::from_str("neon"), None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "drag": 0.98, "level_width": 3000 }"#).unwrap();
        assert_eq!(config.drag, 0.98);
        assert_eq!(config.level_width, 3000);
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.level_height, LEVEL_HEIGHT);
    }

    #[test]
    fn test_bad_config_falls_back() {
        assert_eq!(SimConfig::load_or_default("not json"), SimConfig::default());
    }

    #[test]
    fn test_sanitize() {
        let config = SimConfig {
            gravity: -1.0,
            drag: 1.5,
            bounce_y: f32::NAN,
            avatar_width: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.gravity, GRAVITY);
        assert_eq!(config.drag, 1.0);
        assert_eq!(config.bounce_y, BOUNCE_Y);
        assert_eq!(config.avatar_width, AVATAR_WIDTH);
    }

    #[test]
    fn test_avatar_tuning_matches() {
        let tuning = SimConfig::default().avatar_tuning();
        assert_eq!(tuning, AvatarTuning::default());
    }
}
