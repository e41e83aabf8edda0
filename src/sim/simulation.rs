//! The simulation object hosts drive once per frame
//!
//! Owns the state, the seeded RNG and the frame clock. Input handlers and
//! `advance_frame` are the only ways to mutate the world.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::FrameClock;
use super::snapshot::FrameSnapshot;
use super::state::{GameEvent, RunPhase, SimulationState};
use super::tick::tick;
use crate::tuning::Tuning;

pub struct Simulation {
    tuning: Tuning,
    state: SimulationState,
    rng: Pcg32,
    clock: FrameClock,
    events: Vec<GameEvent>,
    /// Seed the RNG was built from, when known
    seed: Option<u64>,
}

impl Simulation {
    /// New Idle simulation. `best_score` is the value the host loaded from
    /// storage.
    pub fn new(tuning: Tuning, seed: u64, best_score: u64) -> Self {
        let mut sim = Self::with_rng(tuning, Pcg32::seed_from_u64(seed), best_score);
        sim.seed = Some(seed);
        sim
    }

    /// New Idle simulation drawing from an already-constructed RNG
    pub fn with_rng(tuning: Tuning, rng: Pcg32, best_score: u64) -> Self {
        let tuning = tuning.sanitized();
        let state = SimulationState::new(&tuning, best_score);
        let clock = FrameClock::new(tuning.max_frame_dt);
        Self {
            tuning,
            state,
            rng,
            clock,
            events: Vec::new(),
            seed: None,
        }
    }

    // === Input ===

    /// Idle -> Running
    pub fn on_start(&mut self) {
        if self.state.phase == RunPhase::Idle {
            self.state
                .begin_run(&self.tuning, &mut self.rng, &mut self.events);
        }
    }

    /// Jump if running and grounded; otherwise ignored
    pub fn on_jump(&mut self) {
        if self.state.phase != RunPhase::Running {
            return;
        }
        if self.state.player.jump(self.tuning.jump_velocity) {
            self.events.push(GameEvent::Jumped);
        }
    }

    /// Dead -> Running, with a full reset
    pub fn on_restart(&mut self) {
        if self.state.phase == RunPhase::Dead {
            self.state
                .begin_run(&self.tuning, &mut self.rng, &mut self.events);
        }
    }

    /// Single "action" key: start when idle, restart when dead, else jump
    pub fn on_primary_action(&mut self) {
        match self.state.phase {
            RunPhase::Idle => self.on_start(),
            RunPhase::Running => self.on_jump(),
            RunPhase::Dead => self.on_restart(),
        }
    }

    /// End a run without a hit (host time limit, tab closed, ...).
    /// Commits the best score the same way a death does.
    pub fn end_run(&mut self) {
        self.state.die(&mut self.events);
    }

    /// Back to Idle from any phase, keeping the best score
    pub fn on_reset(&mut self) {
        self.state.return_to_idle(&self.tuning);
    }

    // === Clock ===

    /// Advance using a host frame timestamp (milliseconds)
    pub fn advance_frame(&mut self, timestamp_ms: f64) {
        let dt = self.clock.frame_dt(timestamp_ms);
        self.step(dt);
    }

    /// Advance by an explicit delta-time (seconds), clamped
    pub fn step(&mut self, dt: f32) {
        tick(
            &mut self.state,
            &self.tuning,
            &mut self.rng,
            dt,
            &mut self.events,
        );
    }

    // === Output ===

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }

    /// `None` for simulations built with `with_rng`
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
