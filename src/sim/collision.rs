//! Per-tick collision pass for one avatar against one level
//!
//! Order matters and every step runs every tick:
//! 1. world boundary clamp
//! 2. obstacle push-out (minimum translation along the axis of least overlap),
//!    repeated until nothing overlaps or the pass budget runs out
//! 3. collectible pickup
//! 4. goal / completion check

use glam::Vec2;

use super::avatar::Avatar;
use super::geom::Rect;
use super::level::Level;
use super::state::{GameEvent, ObstacleKind};
use crate::consts::*;

/// Push-out sweeps over all obstacles per tick
pub const MAX_RESOLVE_PASSES: usize = 4;

/// Penetration below this is treated as touching
const SLOP: f32 = 1e-3;

/// Which way an obstacle pushed the avatar out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Push {
    Left,
    Right,
    Up,
    Down,
}

impl Level {
    /// Run the full collision pass, appending anything notable to `events`
    pub fn check_collisions(&mut self, avatar: &mut Avatar, events: &mut Vec<GameEvent>) {
        clamp_to_world(avatar, self.width as f32, self.height as f32);
        self.resolve_obstacles(avatar);

        let center = avatar.center();
        for (index, collectible) in self.collectibles.iter_mut().enumerate() {
            if !collectible.is_collected() && collectible.in_reach(center) && collectible.collect() {
                self.score += COLLECT_POINTS;
                log::debug!(
                    "Level {}: collectible {} picked up, score {}",
                    self.number,
                    index,
                    self.score
                );
                events.push(GameEvent::Collected {
                    index,
                    points: COLLECT_POINTS,
                });
            }
        }

        if !self.completed && avatar.bounds().intersects(&self.goal) && self.all_collected() {
            self.completed = true;
            self.score += COMPLETION_BONUS + LEVEL_BONUS * self.number as u64;
            log::debug!("Level {} completed with score {}", self.number, self.score);
            events.push(GameEvent::LevelCompleted {
                level: self.number,
                score: self.score,
            });
        }
    }

    /// Push the avatar out of every obstacle it overlaps
    ///
    /// Walls always push toward the interior. Platforms use the minimum
    /// translation. A push can land the avatar in a neighbour, so the sweep
    /// repeats up to `MAX_RESOLVE_PASSES` times; anything still stuck after
    /// that is moved to the nearest free spot.
    pub fn resolve_obstacles(&self, avatar: &mut Avatar) {
        let (width, height) = (self.width as f32, self.height as f32);

        for _ in 0..MAX_RESOLVE_PASSES {
            let mut moved = false;
            for obstacle in &self.obstacles {
                let hitbox = obstacle.hitbox();
                if !hitbox.overlaps_by(&avatar.bounds(), SLOP) {
                    continue;
                }
                match obstacle.kind {
                    ObstacleKind::Boundary => resolve_wall(avatar, &hitbox, width, height),
                    ObstacleKind::Platform => {
                        resolve_obstacle(avatar, &hitbox);
                    }
                }
                moved = true;
            }
            if !moved {
                break;
            }
        }

        if !self.is_free(avatar.bounds()) {
            self.settle(avatar);
        }
    }

    /// Inside the world and clear of every hit-box
    fn is_free(&self, bounds: Rect) -> bool {
        bounds.left >= 0.0
            && bounds.top >= 0.0
            && bounds.right <= self.width as f32
            && bounds.bottom <= self.height as f32
            && !self
                .obstacles
                .iter()
                .any(|o| o.hitbox().overlaps_by(&bounds, SLOP))
    }

    /// Move to the closest free position built from obstacle edges
    fn settle(&self, avatar: &mut Avatar) {
        let (width, height) = (self.width as f32, self.height as f32);
        let size = avatar.size();
        let here = avatar.pos();

        let mut xs = vec![here.x, 0.0, width - size.x];
        let mut ys = vec![here.y, 0.0, height - size.y];
        for obstacle in &self.obstacles {
            let hb = obstacle.hitbox();
            xs.extend([hb.left - size.x, hb.right]);
            ys.extend([hb.top - size.y, hb.bottom]);
        }
        xs.retain(|&x| x >= 0.0 && x + size.x <= width);
        ys.retain(|&y| y >= 0.0 && y + size.y <= height);

        let mut best: Option<(f32, Vec2)> = None;
        for &x in &xs {
            for &y in &ys {
                let pos = Vec2::new(x, y);
                let dist = pos.distance_squared(here);
                if best.is_some_and(|(d, _)| d <= dist) {
                    continue;
                }
                if self.is_free(Rect::from_xywh(x, y, size.x, size.y)) {
                    best = Some((dist, pos));
                }
            }
        }

        match best {
            Some((_, pos)) => {
                log::debug!(
                    "Level {}: avatar wedged at ({}, {}), settled at ({}, {})",
                    self.number,
                    here.x,
                    here.y,
                    pos.x,
                    pos.y
                );
                avatar.set_pos(pos);
            }
            None => {
                log::warn!("Level {}: no free spot for the avatar", self.number);
                contain(avatar, width, height);
            }
        }
    }
}

/// Keep the avatar inside `[0, width] x [0, height]`, bouncing off the edge it hit
pub fn clamp_to_world(avatar: &mut Avatar, width: f32, height: f32) {
    let b = avatar.bounds();
    let (w, h) = (avatar.width() as f32, avatar.height() as f32);

    if b.left < 0.0 {
        avatar.set_x(0.0);
        avatar.bounce_x();
    } else if b.right > width {
        avatar.set_x((width - w).max(0.0));
        avatar.bounce_x();
    }

    if b.top < 0.0 {
        avatar.set_y(0.0);
        avatar.bounce_y();
    } else if b.bottom > height {
        avatar.set_y((height - h).max(0.0));
        avatar.bounce_y();
    }
}

/// Position-only containment, no bounce
fn contain(avatar: &mut Avatar, width: f32, height: f32) {
    let max_x = (width - avatar.width() as f32).max(0.0);
    let max_y = (height - avatar.height() as f32).max(0.0);
    let x = avatar.x().clamp(0.0, max_x);
    let y = avatar.y().clamp(0.0, max_y);
    if x != avatar.x() {
        avatar.set_x(x);
    }
    if y != avatar.y() {
        avatar.set_y(y);
    }
}

/// Push the avatar off a boundary wall toward the level interior
///
/// A wall at least as wide as it is tall runs horizontally; which half of the
/// level its center sits in decides the inward side.
fn resolve_wall(avatar: &mut Avatar, hitbox: &Rect, width: f32, height: f32) {
    let center = hitbox.center();
    if hitbox.width() >= hitbox.height() {
        if center.y < height * 0.5 {
            avatar.set_y(hitbox.bottom);
            avatar.bounce_y();
        } else {
            avatar.set_y(hitbox.top - avatar.height() as f32);
            if avatar.vel.y <= 0.0 {
                avatar.vel.y = 0.0;
            } else {
                avatar.bounce_y();
            }
        }
    } else if center.x < width * 0.5 {
        avatar.set_x(hitbox.right);
        avatar.bounce_x();
    } else {
        avatar.set_x(hitbox.left - avatar.width() as f32);
        avatar.bounce_x();
    }
}

/// Push the avatar out of `hitbox` along the axis of least overlap
///
/// Ties go to the horizontal axis, then to the left or top side. Landing on
/// top of a platform while already moving up (or at rest) just stops vertical
/// motion instead of bouncing.
pub fn resolve_obstacle(avatar: &mut Avatar, hitbox: &Rect) -> Push {
    let overlap = avatar.bounds().overlap(hitbox);

    if overlap.horizontal() <= overlap.vertical() {
        if overlap.left <= overlap.right {
            avatar.set_x(hitbox.left - avatar.width() as f32);
            avatar.bounce_x();
            Push::Left
        } else {
            avatar.set_x(hitbox.right);
            avatar.bounce_x();
            Push::Right
        }
    } else if overlap.top <= overlap.bottom {
        avatar.set_y(hitbox.top - avatar.height() as f32);
        if avatar.vel.y <= 0.0 {
            avatar.vel.y = 0.0;
        } else {
            avatar.bounce_y();
        }
        Push::Up
    } else {
        avatar.set_y(hitbox.bottom);
        avatar.bounce_y();
        Push::Down
    }
}
