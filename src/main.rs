//! Gravity Jumper headless runner
//!
//! Drives a session without rendering, flipping gravity on a fixed cadence.
//! Usage: `gravity-jumper [ticks] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravity_jumper::audio::Silent;
    use gravity_jumper::sim::{GameEvent, Session};
    use gravity_jumper::{MemoryStore, SimConfig};

    env_logger::init();
    log::info!("Gravity Jumper (headless) starting...");

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * 60);
    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => SimConfig::load_or_default(&json),
            Err(e) => {
                log::warn!("Can't read {} ({}), using default config", path, e);
                SimConfig::default()
            }
        },
        None => SimConfig::default(),
    };

    let mut session = Session::new(config, Box::new(MemoryStore::new()), Box::new(Silent));
    session.start();

    // Flip roughly every two seconds at 60 Hz
    let flip_every = 120;
    for t in 0..ticks {
        if t > 0 && t % flip_every == 0 {
            session.flip_gravity();
        }
        for event in session.tick() {
            if let GameEvent::LevelCompleted { level, score } = event {
                println!("level {} complete: +{}", level, score);
            }
        }
    }

    if let Some(snapshot) = session.snapshot() {
        println!(
            "after {} ticks: level {}, score {}, high score {}, avatar at ({:.1}, {:.1})",
            ticks,
            snapshot.level_number,
            session.score(),
            snapshot.high_score,
            snapshot.avatar_pos.x,
            snapshot.avatar_pos.y
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the embedding page drives `Session` directly
}
