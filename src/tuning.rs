//! Data-driven game balance
//!
//! Persisted as JSON: a file on native (path from `STONE_RUNNER_TUNING`),
//! LocalStorage on the web. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{HitInset, RampCurve, SpawnPolicy, StoneTuning};

/// Environment variable naming a tuning JSON file (native only)
pub const TUNING_ENV: &str = "STONE_RUNNER_TUNING";

/// All gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_y: f32,

    // === Clock ===
    /// Largest dt a single step applies
    pub max_frame_dt: f32,

    // === World ===
    pub world_speed_base: f32,
    /// World speed gain per second
    pub world_ramp: f32,
    pub world_speed_cap: f32,
    /// Score points per second
    pub score_rate: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    /// Seconds between run-frame flips
    pub run_frame_interval: f32,
    pub hit_inset: HitInset,

    // === Throwers ===
    pub spawn: SpawnPolicy,
    pub thrower_frame_interval: f32,
    pub thrower_frame_count: u8,
    /// Frame on which the stone leaves the hand
    pub release_frame: u8,
    pub thrower_retire_x: f32,

    // === Stones ===
    pub stone: StoneTuning,
    pub stone_size_curve: RampCurve,
    pub stone_speed_curve: RampCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            max_frame_dt: MAX_FRAME_DT,

            world_speed_base: WORLD_SPEED_BASE,
            world_ramp: WORLD_RAMP,
            world_speed_cap: WORLD_SPEED_CAP,
            score_rate: SCORE_RATE,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_fall_speed: MAX_FALL_SPEED,
            run_frame_interval: 0.1,
            hit_inset: HitInset::default(),

            spawn: SpawnPolicy::default(),
            thrower_frame_interval: 0.1,
            thrower_frame_count: 4,
            release_frame: 2,
            thrower_retire_x: -320.0,

            stone: StoneTuning::default(),
            stone_size_curve: RampCurve::new(1500.0, 6000.0, 1.6),
            stone_speed_curve: RampCurve::new(1000.0, 8000.0, 1.35),
        }
    }
}

impl Tuning {
    /// Parse from JSON and repair inconsistent values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // Plain data with string keys cannot fail to serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Repair values that would break invariants (cap below base, zero
    /// intervals, probabilities outside [0, 1], ...)
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let non_negative = |v: f32, fallback: f32| if v.is_finite() && v >= 0.0 { v } else { fallback };

        self.field_width = positive(self.field_width, d.field_width);
        self.field_height = positive(self.field_height, d.field_height);
        self.ground_y = positive(self.ground_y, d.ground_y).min(self.field_height);

        self.max_frame_dt = positive(self.max_frame_dt, d.max_frame_dt);

        self.world_speed_base = non_negative(self.world_speed_base, d.world_speed_base);
        self.world_ramp = non_negative(self.world_ramp, d.world_ramp);
        self.world_speed_cap = non_negative(self.world_speed_cap, d.world_speed_cap).max(self.world_speed_base);
        self.score_rate = non_negative(self.score_rate, d.score_rate);

        self.player_width = positive(self.player_width, d.player_width);
        self.player_height = positive(self.player_height, d.player_height).min(self.ground_y);
        self.gravity = positive(self.gravity, d.gravity);
        self.jump_velocity = non_negative(self.jump_velocity, d.jump_velocity);
        self.max_fall_speed = positive(self.max_fall_speed, d.max_fall_speed);
        self.run_frame_interval = positive(self.run_frame_interval, d.run_frame_interval);
        self.hit_inset = self.hit_inset.sanitized();

        self.spawn = self.spawn.sanitized();
        self.thrower_frame_interval = positive(self.thrower_frame_interval, d.thrower_frame_interval);
        self.thrower_frame_count = self.thrower_frame_count.max(1);
        if self.release_frame >= self.thrower_frame_count {
            self.release_frame = self.thrower_frame_count - 1;
        }

        self.stone.size = positive(self.stone.size, d.stone.size);
        self.stone.speed = non_negative(self.stone.speed, d.stone.speed);
        self.stone.toss_chance = if self.stone.toss_chance.is_nan() {
            d.stone.toss_chance
        } else {
            self.stone.toss_chance.clamp(0.0, 1.0)
        };
        self.stone.toss_gravity = non_negative(self.stone.toss_gravity, d.stone.toss_gravity);
        self.stone_size_curve = self.stone_size_curve.sanitized();
        self.stone_speed_curve = self.stone_speed_curve.sanitized();
        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "stone_runner_tuning";

    /// Load tuning from the file named by `STONE_RUNNER_TUNING`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(TUNING_ENV) {
            Ok(path) => Self::load_from_path(path),
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Invalid stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
