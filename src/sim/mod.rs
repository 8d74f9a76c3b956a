//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no timing or sleeping
//! - Seeded RNG only (levels are seeded by their number)
//! - Stable iteration order (generation order)
//! - No rendering, audio or platform dependencies

pub mod avatar;
pub mod collision;
pub mod geom;
pub mod level;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, AvatarTuning, GravityDirection};
pub use collision::{MAX_RESOLVE_PASSES, Push, clamp_to_world, resolve_obstacle};
pub use geom::{Overlap, Rect};
pub use level::{
    LEVEL_STREAM, Level, LevelRng, Placement, PlacementReport, collectible_clear, goal_clear,
    place_collectible, place_goal,
};
pub use state::{Collectible, GameEvent, HitboxInset, Obstacle, ObstacleKind};
pub use tick::{Session, SessionPhase, Snapshot};
