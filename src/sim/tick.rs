//! Simulation step
//!
//! Advances a running world by one clamped delta-time, in a fixed order:
//! ramp, spawn, throwers, stones, player, collision.

use rand::Rng;

use super::clock::clamp_dt;
use super::collision::resolve;
use super::difficulty::{accumulate_score, ramp_world_speed};
use super::state::{GameEvent, RunPhase, SimulationState};
use crate::tuning::Tuning;

/// Advance the world by `dt` seconds.
///
/// A no-op unless the run is in `RunPhase::Running`. `dt` is clamped into
/// `[0, tuning.max_frame_dt]` first.
pub fn tick<R: Rng>(
    state: &mut SimulationState,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if state.phase != RunPhase::Running {
        return;
    }
    let dt = clamp_dt(dt, tuning.max_frame_dt);

    state.time_ticks += 1;
    state.elapsed += dt;

    // Difficulty ramp
    state.world_speed = ramp_world_speed(
        state.world_speed,
        tuning.world_ramp,
        tuning.world_speed_cap,
        dt,
    );
    (state.score, state.score_carry) =
        accumulate_score(state.score, state.score_carry, tuning.score_rate, dt);

    // Spawn
    state.next_spawn_in -= dt;
    if state.next_spawn_in <= 0.0 {
        state.spawn_thrower(tuning);
        state.next_spawn_in = tuning.spawn.sample_delay(rng);
    }

    // Throwers scroll, animate and release
    let world_speed = state.world_speed;
    let mut releases = Vec::new();
    for thrower in &mut state.throwers {
        let released = thrower.advance(
            dt,
            world_speed,
            tuning.thrower_frame_interval,
            tuning.thrower_frame_count,
            tuning.release_frame,
            tuning.thrower_retire_x,
        );
        if released {
            releases.push((thrower.id, thrower.x));
        }
    }
    for (thrower_id, x) in releases {
        let stone_id = state.release_stone(x, tuning, rng);
        events.push(GameEvent::StoneReleased {
            thrower_id,
            stone_id,
        });
    }
    state
        .throwers
        .retain(|t| !t.is_retired(tuning.thrower_retire_x));

    // Stones fly
    for stone in &mut state.stones {
        stone.advance(dt, world_speed, &tuning.stone);
    }
    state
        .stones
        .retain(|s| !s.is_retired(&tuning.stone, tuning.field_height));

    // Player physics (also refreshes the hit-region)
    state.player.step(dt, tuning);

    // Collision
    if let Some(index) = resolve(&state.player.hit_region, &state.stones) {
        let stone = state.stones.remove(index);
        log::debug!("Hit by stone {}", stone.id);
        state.die(events);
    }
}
