//! Read-only frame snapshot for renderers
//!
//! Built from the simulation state after each frame and copied out, so the
//! renderer never holds a reference into the live world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::PlayerFrame;
use super::rect::Rect;
use super::state::{RunPhase, SimulationState};
use super::stone::StoneKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub frame: PlayerFrame,
    pub frame_index: u8,
    pub grounded: bool,
    pub hit_region: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowerView {
    pub id: u32,
    pub x: f32,
    pub frame: u8,
    pub alpha: f32,
    pub has_thrown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub kind: StoneKind,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: RunPhase,
    pub score: u64,
    pub best_score: u64,
    pub world_speed: f32,
    pub player: PlayerView,
    pub throwers: Vec<ThrowerView>,
    pub stones: Vec<StoneView>,
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let player = &state.player;
        let frame = player.frame();
        Self {
            phase: state.phase,
            score: state.score,
            best_score: state.best_score,
            world_speed: state.world_speed,
            player: PlayerView {
                pos: player.pos,
                size: player.size,
                frame,
                frame_index: frame.index(),
                grounded: player.grounded,
                hit_region: player.hit_region,
            },
            throwers: state
                .throwers
                .iter()
                .map(|t| ThrowerView {
                    id: t.id,
                    x: t.x,
                    frame: t.frame,
                    alpha: t.alpha,
                    has_thrown: t.has_thrown,
                })
                .collect(),
            stones: state
                .stones
                .iter()
                .map(|s| StoneView {
                    id: s.id,
                    pos: s.pos,
                    size: s.size,
                    kind: s.flight.kind(),
                })
                .collect(),
        }
    }

    /// JSON for JS hosts
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_idle() {
        let tuning = Tuning::default();
        let state = SimulationState::new(&tuning, 42);
        let snap = FrameSnapshot::capture(&state);
        assert_eq!(snap.phase, RunPhase::Idle);
        assert_eq!(snap.best_score, 42);
        assert_eq!(snap.player.frame, PlayerFrame::RunA);
        assert_eq!(snap.player.hit_region, state.player.hit_region);
        assert!(snap.throwers.is_empty());
        assert!(snap.stones.is_empty());
    }

    #[test]
    fn test_capture_is_a_copy() {
        let tuning = Tuning::default();
        let mut state = SimulationState::new(&tuning, 0);
        state.spawn_thrower(&tuning);
        let snap = FrameSnapshot::capture(&state);
        state.throwers[0].x = -999.0;
        assert_eq!(snap.throwers.len(), 1);
        assert!(snap.throwers[0].x > 0.0);
    }

    #[test]
    fn test_json_has_phase_and_score() {
        let tuning = Tuning::default();
        let state = SimulationState::new(&tuning, 0);
        let json = FrameSnapshot::capture(&state).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Idle");
        assert_eq!(value["score"], 0);
        assert_eq!(value["player"]["frame_index"], 0);
    }
}
