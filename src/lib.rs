//! Stone Runner - a side-scrolling stone-dodging endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, throwers, stones, run state)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score persistence (file, LocalStorage, in-memory)
//! - `web`: wasm-bindgen surface for browser hosts

pub mod best_score;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::{BEST_SCORE_KEY, BestScoreStore, MemoryStore};
pub use sim::{FrameSnapshot, GameEvent, RunPhase, Simulation};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed step used by headless hosts (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest delta-time a single step may apply (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Ground line sits at 80% of the field height
    pub const GROUND_Y: f32 = 432.0;

    /// Player sprite box (run frame, scaled to the base height)
    pub const PLAYER_X: f32 = 172.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 92.0;

    /// World scroll (pixels/s, pixels/s²)
    pub const WORLD_SPEED_BASE: f32 = 460.0;
    pub const WORLD_RAMP: f32 = 7.0;
    pub const WORLD_SPEED_CAP: f32 = 760.0;

    /// Player vertical physics
    pub const GRAVITY: f32 = 2400.0;
    pub const JUMP_VELOCITY: f32 = 1050.0;
    pub const MAX_FALL_SPEED: f32 = 1800.0;

    /// Score points per second of running
    pub const SCORE_RATE: f32 = 120.0;

    /// Stones
    pub const STONE_SIZE: f32 = 18.0;
    pub const STONE_SPEED: f32 = 520.0;
}
