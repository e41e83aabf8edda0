//! Run state and core simulation types
//!
//! Everything the step mutates lives in `SimulationState`; the RNG and the
//! frame clock live beside it in `Simulation`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::stone::{Stone, StoneFlight};
use super::thrower::Thrower;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the start signal
    Idle,
    /// Active gameplay
    Running,
    /// Hit by a stone; frozen until restart
    Dead,
}

/// Side effects for the host, drained after each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (from Idle or Dead)
    Started,
    /// The player left the ground
    Jumped,
    /// A thrower let go of its stone
    StoneReleased { thrower_id: u32, stone_id: u32 },
    /// The run ended
    Died { score: u64 },
    /// A new best score; the host should persist it
    BestScoreUpdated(u64),
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: RunPhase,
    /// Points this run
    pub score: u64,
    /// Fractional score not yet committed
    pub score_carry: f32,
    /// Horizontal scroll rate (pixels/s)
    pub world_speed: f32,
    /// Best score across runs
    pub best_score: u64,
    /// Simulated seconds this run
    pub elapsed: f32,
    /// Steps applied this run
    pub time_ticks: u64,
    /// Countdown to the next thrower spawn (seconds)
    pub next_spawn_in: f32,
    pub player: Player,
    /// Live throwers, in spawn order
    pub throwers: Vec<Thrower>,
    /// Live stones, in release order
    pub stones: Vec<Stone>,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Fresh Idle state
    pub fn new(tuning: &Tuning, best_score: u64) -> Self {
        Self {
            phase: RunPhase::Idle,
            score: 0,
            score_carry: 0.0,
            world_speed: tuning.world_speed_base,
            best_score,
            elapsed: 0.0,
            time_ticks: 0,
            next_spawn_in: 0.0,
            player: Player::new(tuning),
            throwers: Vec::new(),
            stones: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear the world back to the start-of-run layout
    fn clear_world(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.score_carry = 0.0;
        self.world_speed = tuning.world_speed_base;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.player.reset(tuning);
        self.throwers.clear();
        self.stones.clear();
    }

    /// Enter Running with a clean world and a freshly sampled spawn delay
    pub fn begin_run<R: Rng>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.clear_world(tuning);
        self.next_spawn_in = tuning.spawn.sample_delay(rng);
        self.phase = RunPhase::Running;
        events.push(GameEvent::Started);
        log::info!("Run started (best {})", self.best_score);
    }

    /// Back to Idle in the initial pose; the best score is kept
    pub fn return_to_idle(&mut self, tuning: &Tuning) {
        self.clear_world(tuning);
        self.next_spawn_in = 0.0;
        self.phase = RunPhase::Idle;
    }

    /// Running -> Dead, committing the best score
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != RunPhase::Running {
            return;
        }
        self.phase = RunPhase::Dead;
        events.push(GameEvent::Died { score: self.score });
        log::info!("Run ended with score {}", self.score);

        if self.score > self.best_score {
            self.best_score = self.score;
            events.push(GameEvent::BestScoreUpdated(self.score));
            log::info!("New best score: {}", self.score);
        }
    }

    /// Spawn a thrower just beyond the right edge
    pub fn spawn_thrower(&mut self, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        let x = tuning.field_width + tuning.spawn.spawn_offset;
        self.throwers.push(Thrower::new(id, x));
        log::debug!("Thrower {} spawned at x={}", id, x);
        id
    }

    /// Create the stone released by a thrower at `thrower_x`.
    ///
    /// Size and speed scale with the current score; the flight kind is drawn
    /// once here and never changes.
    pub fn release_stone<R: Rng>(
        &mut self,
        thrower_x: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> u32 {
        let id = self.next_entity_id();
        let st = &tuning.stone;
        let size = st.size * tuning.stone_size_curve.multiplier(self.score);
        let speed = st.speed * tuning.stone_speed_curve.multiplier(self.score);
        let flight = if rng.random_bool(st.toss_chance) {
            StoneFlight::Tossed {
                vy: -st.toss_velocity,
            }
        } else {
            StoneFlight::Flat
        };
        let pos = Vec2::new(
            thrower_x + st.release_dx,
            tuning.ground_y - st.release_height,
        );
        self.stones.push(Stone::new(id, pos, size, speed, flight));
        log::debug!("Stone {} released ({:?})", id, flight.kind());
        id
    }
}
