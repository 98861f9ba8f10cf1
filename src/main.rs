//! Survival Arcade entry point
//!
//! The browser build is driven from JS through `survival_arcade::web`. Natively
//! this runs a headless autopilot session and logs what happens.
//!
//! Usage: `survival-arcade [tuning.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use survival_arcade::sim::GameEvent;
    use survival_arcade::{Clicker, Session, Tuning, Upgrade};

    env_logger::init();
    log::info!("Survival Arcade (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => Tuning::default(),
    };
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut session = match Session::new(tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };
    let mut clicker = Clicker::new();

    session.set_autopilot(true);
    session.start();

    // Simulate 60 fps frames
    let frame_ms = 1000.0 / 60.0;
    let frames = (seconds * 1000.0 / frame_ms) as u64;
    let mut runs = 1;

    for _ in 0..frames {
        session.advance(frame_ms);
        clicker.advance(frame_ms);

        for event in session.drain_events() {
            match event {
                GameEvent::GameOver { experience, level } => {
                    println!("Run {} over at level {} ({:.0} xp)", runs, level, experience);
                    clicker.deposit(experience.max(0.0).floor() as u64);
                }
                GameEvent::LevelUp { level } => println!("  level {}", level),
                GameEvent::WeaponUnlocked { name, damage, cooldown_ms } => {
                    println!("  unlocked {} (dmg {}, cd {}ms)", name, damage, cooldown_ms)
                }
                GameEvent::SessionStarted => {}
            }
        }

        if !session.is_running() {
            runs += 1;
            session.start();
        }

        // Spend clicker score greedily on the cheapest affordable upgrade
        if let Some(upgrade) = Upgrade::ALL
            .into_iter()
            .filter(|u| clicker.cost(*u) <= clicker.score)
            .min_by_key(|u| clicker.cost(*u))
        {
            let _ = clicker.purchase(upgrade);
        }
    }

    if let Some(world) = session.world() {
        println!(
            "Final run: level {}, health {}, {} enemies, {} weapons",
            world.level,
            world.player.health,
            world.enemies.len(),
            world.weapons.len()
        );
    }
    println!(
        "Survival score {} | clicker score {} (level {}, {} per click, {}/s)",
        session.score(),
        clicker.score,
        clicker.level,
        clicker.per_click,
        clicker.auto_rate
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> survival_arcade::Tuning {
    use survival_arcade::Tuning;

    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
