//! Survival session controller
//!
//! Owns the world, the held-key set and the RNG, and drives the tick on a fixed
//! interval. Everything runs on one thread: a tick always finishes before the
//! next one starts, and input changes land on the following tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::sim::{GameEvent, GamePhase, InputState, World, autopilot_input, tick};
use crate::tuning::{Tuning, TuningError};

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No world, not ticking
    Idle,
    /// World exists and advances every tick
    Running,
}

/// Survival game session
pub struct Session {
    tuning: Tuning,
    rng: Pcg32,
    world: Option<World>,
    input: InputState,
    /// Idle/demo mode - autopilot replaces held keys
    autopilot: bool,
    /// Unsimulated time (ms) carried between `advance` calls
    accumulator: f64,
    /// Experience banked from finished runs
    score: u64,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session. Fails if the tuning cannot be simulated.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            world: None,
            input: InputState::default(),
            autopilot: false,
            accumulator: 0.0,
            score: 0,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> SessionState {
        if self.world.is_some() {
            SessionState::Running
        } else {
            SessionState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SessionState::Running
    }

    /// Begin a fresh run. Does nothing if one is already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.world = Some(World::new(&self.tuning));
        self.accumulator = 0.0;
        self.events.push(GameEvent::SessionStarted);
        log::info!("Survival started");
    }

    /// Stop the current run and clear all run state. The banked score survives.
    pub fn reset(&mut self) {
        if self.world.take().is_some() {
            log::info!("Survival reset");
        }
        self.input.clear();
        self.accumulator = 0.0;
    }

    /// Raw key down; returns false for keys that aren't movement keys
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    /// Raw key up; returns false for keys that aren't movement keys
    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Run exactly one tick. Returns false when idle.
    pub fn step(&mut self) -> bool {
        let Some(world) = self.world.as_mut() else {
            return false;
        };

        let now = world.elapsed_ms + self.tuning.tick_ms;
        let input = if self.autopilot {
            autopilot_input(world)
        } else {
            self.input
        };
        let events = tick(world, &input, now, &self.tuning, &mut self.rng);
        self.events.extend(events);

        if world.phase == GamePhase::GameOver {
            let banked = world.experience.max(0.0).floor() as u64;
            self.score += banked;
            log::info!("Banked {} experience, score now {}", banked, self.score);
            self.reset();
        }
        true
    }

    /// Feed wall-clock time (ms) and run as many fixed ticks as it covers.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.is_running() {
            return 0;
        }

        // Non-finite deltas (NaN from a bad timestamp) are dropped
        if dt_ms.is_finite() {
            self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_MS);
        }
        let tick_ms = self.tuning.tick_ms as f64;

        let mut substeps = 0;
        while self.accumulator >= tick_ms && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= tick_ms;
            substeps += 1;
            if !self.is_running() {
                break;
            }
        }
        substeps
    }

    /// Read-only view of the current run
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Experience banked from all finished runs
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
