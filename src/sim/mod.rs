//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod player;
pub mod rect;
pub mod simulation;
pub mod snapshot;
pub mod state;
pub mod stone;
pub mod thrower;
pub mod tick;

pub use clock::{FrameClock, clamp_dt};
pub use collision::resolve;
pub use difficulty::{RampCurve, accumulate_score, ramp_world_speed};
pub use player::{HitInset, Player, PlayerFrame};
pub use rect::Rect;
pub use simulation::Simulation;
pub use snapshot::{FrameSnapshot, PlayerView, StoneView, ThrowerView};
pub use state::{GameEvent, RunPhase, SimulationState};
pub use stone::{Stone, StoneFlight, StoneKind, StoneTuning};
pub use thrower::{SpawnPolicy, Thrower};
pub use tick::tick;
