//! Level entities and simulation events
//!
//! Plain data read by presentation collaborators once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::GravityDirection;
use super::geom::Rect;
use crate::consts::*;

/// Fractional sub-rectangle of an obstacle's visual box used for collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxInset {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl HitboxInset {
    /// Platform sprites carry transparent padding around the solid part
    pub const PLATFORM: HitboxInset = HitboxInset {
        left: 0.1,
        top: 0.2,
        width: 0.8,
        height: 0.6,
    };

    /// Map the inset onto a visual box
    pub fn apply(&self, visual: &Rect) -> Rect {
        let w = visual.width();
        let h = visual.height();
        Rect::from_xywh(
            visual.left + w * self.left,
            visual.top + h * self.top,
            w * self.width,
            h * self.height,
        )
    }
}

/// What an obstacle is, for presentation and level bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// One of the four walls framing the level
    Boundary,
    /// Generated interior platform
    Platform,
}

/// A static or translating rectangular obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner of the visual box
    pub pos: Vec2,
    /// Nominal (visual) size
    pub size: Vec2,
    /// Collision sub-box; `None` means the hit-box is the visual box
    pub inset: Option<HitboxInset>,
    /// Leftward translation per tick (0 = static)
    pub speed: f32,
}

impl Obstacle {
    /// Full-span wall with no inset
    pub fn boundary(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: ObstacleKind::Boundary,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            inset: None,
            speed: 0.0,
        }
    }

    /// Interior platform with the standard inset hit-box
    pub fn platform(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind: ObstacleKind::Platform,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            inset: Some(HitboxInset::PLATFORM),
            speed: 0.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// What gets drawn
    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// What actually blocks the avatar
    pub fn hitbox(&self) -> Rect {
        let visual = self.bounds();
        match &self.inset {
            Some(inset) => inset.apply(&visual),
            None => visual,
        }
    }

    /// Translate by one tick
    pub fn update(&mut self) {
        if self.speed != 0.0 {
            self.pos.x -= self.speed;
        }
    }

    /// Fully past the left edge of the level
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A point pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pos: Vec2,
    collected: bool,
}

impl Collectible {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Drawn radius
    #[inline]
    pub fn radius(&self) -> f32 {
        COLLECTIBLE_RADIUS
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Whether a point is close enough to pick this up
    pub fn in_reach(&self, point: Vec2) -> bool {
        self.pos.distance(point) < COLLECT_RADIUS
    }

    /// Mark collected. Returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Discrete things that happened during a tick, for sound and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Gravity changed direction
    GravityFlipped(GravityDirection),
    /// Collectible at this index was picked up
    Collected { index: usize, points: u64 },
    /// Level finished; `score` is the level's final score
    LevelCompleted { level: u32, score: u64 },
    /// Session total beat the stored watermark
    NewHighScore(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_hitbox_inset() {
        let o = Obstacle::platform(100.0, 200.0, 200.0, 30.0);
        let hb = o.hitbox();
        assert!((hb.left - 120.0).abs() < 1e-4);
        assert!((hb.top - 206.0).abs() < 1e-4);
        assert!((hb.width() - 160.0).abs() < 1e-4);
        assert!((hb.height() - 18.0).abs() < 1e-4);
        assert_eq!(o.bounds(), Rect::new(100.0, 200.0, 300.0, 230.0));
    }

    #[test]
    fn test_boundary_hitbox_is_visual() {
        let o = Obstacle::boundary(0.0, 0.0, 2000.0, 50.0);
        assert_eq!(o.hitbox(), o.bounds());
    }

    #[test]
    fn test_obstacle_translation() {
        let mut o = Obstacle::platform(10.0, 0.0, 100.0, 20.0).with_speed(4.0);
        o.update();
        assert_eq!(o.pos.x, 6.0);
        assert!(!o.is_off_screen());

        for _ in 0..30 {
            o.update();
        }
        assert!(o.is_off_screen());

        let mut still = Obstacle::boundary(0.0, 0.0, 50.0, 50.0);
        still.update();
        assert_eq!(still.pos, Vec2::ZERO);
    }

    #[test]
    fn test_collect_once() {
        let mut c = Collectible::new(Vec2::new(500.0, 500.0));
        assert!(c.in_reach(Vec2::new(560.0, 500.0)));
        assert!(!c.in_reach(Vec2::new(580.0, 500.0)));
        assert!(c.collect());
        assert!(!c.collect());
        assert!(c.is_collected());
    }
}
