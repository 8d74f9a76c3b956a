//! Simulation driver
//!
//! One `tick()` advances the avatar, then obstacles, then runs the level's
//! collision pass and, on completion, swaps in the next level. Pacing is the
//! caller's job; pausing is simply not calling `tick()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::{Avatar, GravityDirection};
use super::geom::Rect;
use super::level::Level;
use super::state::{Collectible, GameEvent, Obstacle};
use crate::audio::{SoundEffect, SoundPlayer};
use crate::consts::COLLECTIBLE_RADIUS;
use crate::highscores::ScoreStore;
use crate::settings::{SimConfig, Theme};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Level size not known yet
    Uninitialized,
    /// Levels are being played
    Running,
}

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub level_number: u32,
    pub level_width: u32,
    pub level_height: u32,
    pub avatar_pos: Vec2,
    pub avatar_vel: Vec2,
    pub avatar_size: Vec2,
    pub gravity: GravityDirection,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    /// Drawn radius of every collectible
    pub collectible_radius: f32,
    pub goal: Rect,
    pub level_score: u64,
    pub total_score: u64,
    pub high_score: u64,
    pub theme: Theme,
}

/// One continuous play sequence
pub struct Session {
    config: SimConfig,
    phase: SessionPhase,
    avatar: Avatar,
    gravity: GravityDirection,
    level: Option<Level>,
    /// Sum of completed levels' scores
    total_score: u64,
    high_score: u64,
    time_ticks: u64,
    store: Box<dyn ScoreStore>,
    sound: Box<dyn SoundPlayer>,
}

impl Session {
    pub fn new(
        config: SimConfig,
        store: Box<dyn ScoreStore>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        let config = config.sanitized();
        let avatar = Avatar::new(
            config.avatar_width,
            config.avatar_height,
            config.avatar_tuning(),
        );
        let high_score = store.high_score();
        Self {
            config,
            phase: SessionPhase::Uninitialized,
            avatar,
            gravity: GravityDirection::Down,
            level: None,
            total_score: 0,
            high_score,
            time_ticks: 0,
            store,
            sound,
        }
    }

    /// Start at level 1 with the configured level size
    pub fn start(&mut self) {
        let (w, h) = (self.config.level_width, self.config.level_height);
        self.start_with_size(w, h);
    }

    /// Start at level 1 with an explicit level size (e.g. derived from the screen)
    pub fn start_with_size(&mut self, width: u32, height: u32) {
        let level = Level::new(1, width, height);
        self.avatar.reset(level.spawn_point());
        self.level = Some(level);
        self.phase = SessionPhase::Running;
        log::info!("Session started at level 1 ({}x{})", width, height);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Completed levels plus the level in progress
    pub fn score(&self) -> u64 {
        self.total_score + self.level.as_ref().map_or(0, Level::score)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// The player's chosen theme, else the one the current level cycles to
    pub fn theme(&self) -> Theme {
        self.store.selected_theme().unwrap_or_else(|| {
            Theme::for_level(self.level.as_ref().map_or(1, Level::number))
        })
    }

    /// Point gravity in a direction. Returns the flip event if it changed.
    pub fn set_gravity(&mut self, direction: GravityDirection) -> Option<GameEvent> {
        if direction == self.gravity {
            return None;
        }
        self.gravity = direction;
        let event = GameEvent::GravityFlipped(direction);
        self.emit(&event);
        Some(event)
    }

    /// Cycle gravity Down -> Up -> Left -> Right -> Down
    pub fn flip_gravity(&mut self) -> GameEvent {
        let next = self.gravity.next();
        self.gravity = next;
        let event = GameEvent::GravityFlipped(next);
        self.emit(&event);
        event
    }

    /// Advance one tick. Does nothing before `start()`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(level) = self.level.as_mut() else {
            return events;
        };

        self.time_ticks += 1;

        self.avatar.update(self.gravity);
        level.update_obstacles();
        level.check_collisions(&mut self.avatar, &mut events);

        if level.is_completed() {
            self.advance_level(&mut events);
        }

        for event in &events {
            self.sound.play(SoundEffect::for_event(event));
        }
        events
    }

    /// Bank the finished level's score and replace it with the next one
    fn advance_level(&mut self, events: &mut Vec<GameEvent>) {
        let Some(finished) = self.level.take() else {
            return;
        };

        self.total_score += finished.score();
        if self.total_score > self.high_score {
            self.high_score = self.total_score;
            self.store.save_high_score(self.high_score);
            log::debug!("New high score {}", self.high_score);
            events.push(GameEvent::NewHighScore(self.high_score));
        }

        let next = Level::new(
            finished.number().saturating_add(1),
            finished.width(),
            finished.height(),
        );
        self.avatar.reset(next.spawn_point());
        log::info!(
            "Level {} complete (score {}), total {}, starting level {}",
            finished.number(),
            finished.score(),
            self.total_score,
            next.number()
        );
        self.level = Some(next);
    }

    fn emit(&mut self, event: &GameEvent) {
        self.sound.play(SoundEffect::for_event(event));
    }

    /// Copy out the current state for presentation
    pub fn snapshot(&self) -> Option<Snapshot> {
        let level = self.level.as_ref()?;
        Some(Snapshot {
            level_number: level.number(),
            level_width: level.width(),
            level_height: level.height(),
            avatar_pos: self.avatar.pos(),
            avatar_vel: self.avatar.vel,
            avatar_size: self.avatar.size(),
            gravity: self.gravity,
            obstacles: level.obstacles().to_vec(),
            collectibles: level.collectibles().to_vec(),
            collectible_radius: COLLECTIBLE_RADIUS,
            goal: level.goal(),
            level_score: level.score(),
            total_score: self.total_score,
            high_score: self.high_score,
            theme: self.theme(),
        })
    }

    /// Drop the avatar at a position (debug tools, tests)
    pub fn place_avatar(&mut self, pos: Vec2) {
        self.avatar.reset(pos);
    }
}
