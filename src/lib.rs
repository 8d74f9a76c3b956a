//! Gravity Jumper - simulation core for a gravity-switching platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, collisions, levels, driver)
//! - `audio`: Sound-effect trigger collaborator
//! - `highscores`: High score / theme persistence collaborator
//! - `settings`: Data-driven physics and level tuning

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{MemoryStore, ScoreStore};
pub use settings::{SimConfig, Theme};

/// Game configuration constants
pub mod consts {
    /// Gravity acceleration added to velocity each tick (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Isotropic drag multiplier applied each tick
    pub const DRAG: f32 = 0.95;
    /// Velocity clamp per axis (units/tick), stops tunneling through thin platforms
    pub const MAX_SPEED: f32 = 15.0;
    /// Horizontal bounce damping
    pub const BOUNCE_X: f32 = 0.5;
    /// Vertical bounce damping (floatier than horizontal)
    pub const BOUNCE_Y: f32 = 0.3;

    /// Avatar defaults
    pub const AVATAR_WIDTH: u32 = 50;
    pub const AVATAR_HEIGHT: u32 = 50;

    /// Level defaults
    pub const LEVEL_WIDTH: u32 = 2000;
    pub const LEVEL_HEIGHT: u32 = 1500;
    /// Thickness of the four boundary walls
    pub const WALL_THICKNESS: f32 = 50.0;

    /// Interior platform generation
    pub const BASE_PLATFORMS: u32 = 5;
    pub const PLATFORM_MIN_WIDTH: i32 = 100;
    pub const PLATFORM_MAX_WIDTH: i32 = 300;
    pub const PLATFORM_MIN_HEIGHT: i32 = 20;
    pub const PLATFORM_MAX_HEIGHT: i32 = 40;
    pub const PLATFORM_EDGE_MARGIN: i32 = 100;

    /// Collectibles
    pub const COLLECTIBLE_COUNT: usize = 3;
    /// Drawn radius
    pub const COLLECTIBLE_RADIUS: f32 = 25.0;
    /// Pickup trigger radius (wider than the drawn radius on purpose)
    pub const COLLECT_RADIUS: f32 = 80.0;
    pub const COLLECTIBLE_EDGE_MARGIN: i32 = 150;
    pub const COLLECTIBLE_CLEARANCE: f32 = 120.0;
    pub const COLLECTIBLE_ATTEMPTS: u32 = 15;

    /// Goal region
    pub const GOAL_SIZE: f32 = 100.0;
    pub const GOAL_EDGE_MARGIN: i32 = 100;
    pub const GOAL_CLEARANCE: f32 = 150.0;
    pub const GOAL_ATTEMPTS: u32 = 20;

    /// Scoring
    pub const COLLECT_POINTS: u64 = 100;
    pub const COMPLETION_BONUS: u64 = 500;
    pub const LEVEL_BONUS: u64 = 500;
}
