//! Sound-effect triggers
//!
//! The simulation never plays audio. It hands discrete effects to whatever
//! `SoundPlayer` the session was built with.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gravity flipped
    Flip,
    /// Collectible picked up
    Collect,
    /// Level finished
    LevelComplete,
    /// New high score
    HighScore,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::GravityFlipped(_) => SoundEffect::Flip,
            GameEvent::Collected { .. } => SoundEffect::Collect,
            GameEvent::LevelCompleted { .. } => SoundEffect::LevelComplete,
            GameEvent::NewHighScore(_) => SoundEffect::HighScore,
        }
    }
}

/// Receives sound triggers from the simulation
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every effect (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Remembers what was played, in order
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub played: Vec<SoundEffect>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundPlayer for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound: {:?}", effect);
        self.played.push(effect);
    }
}
