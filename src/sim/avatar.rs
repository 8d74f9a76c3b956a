//! The gravity-driven avatar
//!
//! Integration order per tick (one tick = one frame):
//! 1. add gravity to velocity
//! 2. integrate position with the new, pre-drag velocity
//! 3. apply drag
//! 4. clamp each velocity component

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// Direction gravity currently pulls the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl GravityDirection {
    /// Unit acceleration vector (screen space, +y is down)
    pub fn unit(&self) -> Vec2 {
        match self {
            GravityDirection::Down => Vec2::Y,
            GravityDirection::Up => Vec2::NEG_Y,
            GravityDirection::Left => Vec2::NEG_X,
            GravityDirection::Right => Vec2::X,
        }
    }

    /// Next direction in the flip cycle: Down -> Up -> Left -> Right -> Down
    pub fn next(&self) -> Self {
        match self {
            GravityDirection::Down => GravityDirection::Up,
            GravityDirection::Up => GravityDirection::Left,
            GravityDirection::Left => GravityDirection::Right,
            GravityDirection::Right => GravityDirection::Down,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityDirection::Down => "DOWN",
            GravityDirection::Up => "UP",
            GravityDirection::Left => "LEFT",
            GravityDirection::Right => "RIGHT",
        }
    }
}

/// Physics constants the avatar integrates with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarTuning {
    pub gravity: f32,
    pub drag: f32,
    pub max_speed: f32,
    pub bounce_x: f32,
    pub bounce_y: f32,
}

impl Default for AvatarTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
            max_speed: MAX_SPEED,
            bounce_x: BOUNCE_X,
            bounce_y: BOUNCE_Y,
        }
    }
}

/// The player's avatar
///
/// The bounding box is derived from `pos` on every read, so it can never be
/// observed stale after a position change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pos: Vec2,
    pub vel: Vec2,
    width: u32,
    height: u32,
    pub tuning: AvatarTuning,
}

impl Avatar {
    pub fn new(width: u32, height: u32, tuning: AvatarTuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            width,
            height,
            tuning,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.pos.x, self.pos.y, self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    /// Advance one tick under `gravity`
    pub fn update(&mut self, gravity: GravityDirection) {
        let t = self.tuning;
        self.vel += gravity.unit() * t.gravity;
        self.pos += self.vel;
        self.vel *= t.drag;
        self.vel = self.vel.clamp(Vec2::splat(-t.max_speed), Vec2::splat(t.max_speed));
    }

    /// Reverse and dampen horizontal velocity
    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x * self.tuning.bounce_x;
    }

    /// Reverse and dampen vertical velocity
    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y * self.tuning.bounce_y;
    }

    /// Put the avatar at rest at `pos` (level transitions)
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}
