//! Stones: projectiles that fly left toward the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Stone parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneTuning {
    /// Base edge length (pixels)
    pub size: f32,
    /// Base speed on top of world speed (pixels/s)
    pub speed: f32,
    /// Downward drift of flat stones (pixels/s)
    pub drop_rate: f32,
    /// Probability a released stone is tossed instead of flat
    pub toss_chance: f64,
    /// Initial upward speed of tossed stones (pixels/s)
    pub toss_velocity: f32,
    /// Gravity on tossed stones (pixels/s²)
    pub toss_gravity: f32,
    /// Release point relative to the thrower's left edge
    pub release_dx: f32,
    /// Release height above the ground line
    pub release_height: f32,
    /// Stones left of this x are dropped
    pub retire_x: f32,
    /// Stones this far below the field are dropped
    pub retire_margin: f32,
}

impl Default for StoneTuning {
    fn default() -> Self {
        Self {
            size: crate::consts::STONE_SIZE,
            speed: crate::consts::STONE_SPEED,
            drop_rate: 18.0,
            toss_chance: 0.1,
            toss_velocity: 620.0,
            toss_gravity: 1500.0,
            release_dx: 40.0,
            release_height: 60.0,
            retire_x: -120.0,
            retire_margin: 60.0,
        }
    }
}

/// Flight behaviour, fixed for the stone's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StoneFlight {
    /// Slow constant downward drift
    Flat,
    /// Parabolic arc; `vy` is the current vertical velocity
    Tossed { vy: f32 },
}

/// Flight kind without per-step state, for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoneKind {
    Flat,
    Tossed,
}

impl StoneFlight {
    pub fn kind(&self) -> StoneKind {
        match self {
            StoneFlight::Flat => StoneKind::Flat,
            StoneFlight::Tossed { .. } => StoneKind::Tossed,
        }
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stone {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length (stones are square)
    pub size: f32,
    /// Own speed on top of world speed
    pub speed: f32,
    pub flight: StoneFlight,
}

impl Stone {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32, flight: StoneFlight) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            flight,
        }
    }

    /// Move one step: always left, then drift or arc vertically
    pub fn advance(&mut self, dt: f32, world_speed: f32, tuning: &StoneTuning) {
        self.pos.x -= (world_speed + self.speed) * dt;
        match &mut self.flight {
            StoneFlight::Flat => {
                self.pos.y += tuning.drop_rate * dt;
            }
            StoneFlight::Tossed { vy } => {
                *vy += tuning.toss_gravity * dt;
                self.pos.y += *vy * dt;
            }
        }
    }

    /// Collision box
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Left of the cutoff or fallen below the field
    pub fn is_retired(&self, tuning: &StoneTuning, field_height: f32) -> bool {
        self.pos.x + self.size < tuning.retire_x
            || self.pos.y > field_height + tuning.retire_margin
    }
}
