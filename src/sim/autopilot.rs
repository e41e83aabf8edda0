//! Demo-mode player: decides when to jump
//!
//! Used by the headless binary and by hosts that want an attract mode. It
//! only reads the state; the caller feeds the decision back as a jump input.

use super::state::{RunPhase, SimulationState};
use super::stone::StoneFlight;
use crate::tuning::Tuning;

/// Warning time the autopilot wants before a stone reaches the player (s)
pub const JUMP_LEAD_SECS: f32 = 0.2;

/// True when a stone will reach the hit-region within `JUMP_LEAD_SECS`, at a
/// height overlapping it on arrival, and a jump is currently possible
pub fn should_jump(state: &SimulationState, tuning: &Tuning) -> bool {
    if state.phase != RunPhase::Running || !state.player.grounded {
        return false;
    }
    let region = state.player.hit_region;

    state.stones.iter().any(|stone| {
        let rect = stone.rect();
        if rect.right() <= region.left() {
            return false;
        }
        let closing = state.world_speed + stone.speed;
        if closing <= 0.0 {
            return false;
        }
        let t = (rect.left() - region.right()).max(0.0) / closing;
        if t > JUMP_LEAD_SECS {
            return false;
        }

        // Vertical position when it gets there
        let dy = match stone.flight {
            StoneFlight::Flat => tuning.stone.drop_rate * t,
            StoneFlight::Tossed { vy } => vy * t + 0.5 * tuning.stone.toss_gravity * t * t,
        };
        let top = rect.top() + dy;
        top < region.bottom() && top + stone.size > region.top()
    })
}
