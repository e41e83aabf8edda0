//! The runner: vertical physics, ground contact, run/jump animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Fractional inset of the sprite box used for collision.
///
/// The hit-region is narrower and shorter than the drawn sprite so that
/// grazing a stone with a hand or hair does not end the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitInset {
    /// Offset from the left edge, as a fraction of sprite width
    pub left: f32,
    /// Offset from the top edge, as a fraction of sprite height
    pub top: f32,
    /// Hit width as a fraction of sprite width
    pub width: f32,
    /// Hit height as a fraction of sprite height
    pub height: f32,
}

impl Default for HitInset {
    fn default() -> Self {
        Self {
            left: 0.33,
            top: 0.12,
            width: 0.40,
            height: 0.78,
        }
    }
}

impl HitInset {
    /// Sub-rectangle of `bounds`
    pub fn apply(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.pos.x + bounds.size.x * self.left,
            bounds.pos.y + bounds.size.y * self.top,
            bounds.size.x * self.width,
            bounds.size.y * self.height,
        )
    }

    /// Keep every fraction in [0, 1] and the region inside the sprite
    pub fn sanitized(self) -> Self {
        let frac = |v: f32, fallback: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback };
        let defaults = Self::default();
        let left = frac(self.left, defaults.left);
        let top = frac(self.top, defaults.top);
        Self {
            left,
            top,
            width: frac(self.width, defaults.width).min(1.0 - left),
            height: frac(self.height, defaults.height).min(1.0 - top),
        }
    }
}

/// Sprite frame the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerFrame {
    RunA,
    RunB,
    Jump,
}

impl PlayerFrame {
    /// Index into the player sprite sheet
    pub fn index(self) -> u8 {
        match self {
            PlayerFrame::RunA => 0,
            PlayerFrame::RunB => 1,
            PlayerFrame::Jump => 2,
        }
    }
}

/// The player body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the sprite box (x never changes)
    pub pos: Vec2,
    /// Sprite box size (run frame)
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub grounded: bool,
    /// Accumulated time toward the next run-frame flip
    pub anim_timer: f32,
    /// Which of the two run frames is showing
    pub run_frame: u8,
    /// Collision region, recomputed by `step`
    pub hit_region: Rect,
    ground_top: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let ground_top = tuning.ground_y - size.y;
        let mut player = Self {
            pos: Vec2::new(tuning.player_x, ground_top),
            size,
            vel_y: 0.0,
            grounded: true,
            anim_timer: 0.0,
            run_frame: 0,
            hit_region: Rect::default(),
            ground_top,
        };
        player.update_hit_region(&tuning.hit_inset);
        player
    }

    /// Highest allowed value of `pos.y` (feet on the ground line)
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.ground_top
    }

    /// Re-anchor to the ground in the initial pose
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Start a jump. Returns false (and does nothing) when airborne.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = -jump_velocity;
        self.grounded = false;
        true
    }

    /// Integrate gravity, land on the ground, advance animation
    pub fn step(&mut self, dt: f32, tuning: &Tuning) {
        self.vel_y = (self.vel_y + tuning.gravity * dt).min(tuning.max_fall_speed);
        self.pos.y += self.vel_y * dt;
        if self.pos.y >= self.ground_top {
            self.pos.y = self.ground_top;
            self.vel_y = 0.0;
            self.grounded = true;
        }

        self.anim_timer += dt;
        while self.anim_timer >= tuning.run_frame_interval {
            self.anim_timer -= tuning.run_frame_interval;
            self.run_frame ^= 1;
        }

        self.update_hit_region(&tuning.hit_inset);
    }

    /// Current animation frame
    pub fn frame(&self) -> PlayerFrame {
        if !self.grounded {
            PlayerFrame::Jump
        } else if self.run_frame == 0 {
            PlayerFrame::RunA
        } else {
            PlayerFrame::RunB
        }
    }

    /// Full sprite box
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    // Always inset from the run-frame box so the margin does not shift with
    // the jump frame's different proportions.
    fn update_hit_region(&mut self, inset: &HitInset) {
        self.hit_region = inset.apply(self.bounds());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_grounded() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        assert!(player.grounded);
        assert_eq!(player.pos.y, tuning.ground_y - tuning.player_height);
        assert_eq!(player.frame(), PlayerFrame::RunA);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(player.jump(tuning.jump_velocity));
        assert_eq!(player.vel_y, -tuning.jump_velocity);
        assert!(!player.grounded);

        player.step(1.0 / 60.0, &tuning);
        let vel = player.vel_y;
        assert!(!player.jump(tuning.jump_velocity));
        assert_eq!(player.vel_y, vel);
    }

    #[test]
    fn test_lands_exactly_on_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.jump(tuning.jump_velocity);

        let mut steps = 0;
        while !player.grounded {
            player.step(1.0 / 60.0, &tuning);
            assert!(player.pos.y <= player.ground_top());
            steps += 1;
            assert!(steps < 600, "player never landed");
        }
        assert_eq!(player.pos.y, player.ground_top());
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_fall_speed_is_clamped() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = -10_000.0;
        player.grounded = false;
        for _ in 0..200 {
            player.step(0.033, &tuning);
            assert!(player.vel_y <= tuning.max_fall_speed);
        }
    }

    #[test]
    fn test_run_frames_alternate_on_timer() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        // 0.05 s: still first frame
        player.step(0.05, &tuning);
        assert_eq!(player.frame(), PlayerFrame::RunA);
        // 0.11 s total: flipped once
        player.step(0.06, &tuning);
        assert_eq!(player.frame(), PlayerFrame::RunB);
        // Airborne always shows the jump frame
        player.jump(tuning.jump_velocity);
        player.step(0.01, &tuning);
        assert_eq!(player.frame(), PlayerFrame::Jump);
        assert_eq!(player.frame().index(), 2);
    }

    #[test]
    fn test_hit_region_is_inset() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let bounds = player.bounds();
        let hit = player.hit_region;
        assert!(hit.left() > bounds.left());
        assert!(hit.right() < bounds.right());
        assert!(hit.top() > bounds.top());
        assert!(hit.bottom() < bounds.bottom());
        assert!((hit.size.x - bounds.size.x * 0.40).abs() < 1e-4);
    }

    #[test]
    fn test_hit_region_follows_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let before = player.hit_region;
        player.jump(tuning.jump_velocity);
        player.step(0.033, &tuning);
        assert!(player.hit_region.top() < before.top());
        assert_eq!(player.hit_region.size, before.size);
    }

    #[test]
    fn test_inset_sanitized() {
        let inset = HitInset {
            left: 0.8,
            top: -1.0,
            width: 0.5,
            height: f32::NAN,
        }
        .sanitized();
        assert_eq!(inset.top, 0.0);
        assert!((inset.width - 0.2).abs() < 1e-6);
        assert_eq!(inset.height, HitInset::default().height);
    }
}
