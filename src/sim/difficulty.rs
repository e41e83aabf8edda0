//! Difficulty ramp: world speed, score growth and score-driven multipliers
//!
//! Everything here is a pure function of its inputs so the tick can call it
//! without caring about order or caching.

use serde::{Deserialize, Serialize};

/// Advance world speed by `ramp * dt`, never past `cap`
#[inline]
pub fn ramp_world_speed(speed: f32, ramp: f32, cap: f32, dt: f32) -> f32 {
    (speed + ramp * dt).min(cap)
}

/// Integer score growth at `rate` points per second.
///
/// Returns the new score and the fractional remainder to carry into the next
/// step, so the total stays exact regardless of frame rate.
pub fn accumulate_score(score: u64, carry: f32, rate: f32, dt: f32) -> (u64, f32) {
    let total = carry + rate * dt;
    let whole = total.floor();
    (score + whole as u64, total - whole)
}

/// Linear multiplier curve between two score thresholds.
///
/// Below `start_score` the multiplier is 1, above `end_score` it is
/// `max_multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampCurve {
    pub start_score: f32,
    pub end_score: f32,
    pub max_multiplier: f32,
}

impl RampCurve {
    pub fn new(start_score: f32, end_score: f32, max_multiplier: f32) -> Self {
        Self {
            start_score,
            end_score,
            max_multiplier,
        }
    }

    /// Progress through the ramp, clamped to [0, 1]
    pub fn progress(&self, score: u64) -> f32 {
        let score = score as f32;
        let span = self.end_score - self.start_score;
        if span <= 0.0 {
            return if score >= self.end_score { 1.0 } else { 0.0 };
        }
        ((score - self.start_score) / span).clamp(0.0, 1.0)
    }

    /// Multiplier in [1, max_multiplier]
    pub fn multiplier(&self, score: u64) -> f32 {
        1.0 + (self.max_multiplier - 1.0) * self.progress(score)
    }

    /// Fix reversed thresholds and sub-unity maxima
    pub fn sanitized(self) -> Self {
        let start_score = self.start_score.max(0.0);
        Self {
            start_score,
            end_score: self.end_score.max(start_score),
            max_multiplier: if self.max_multiplier.is_finite() {
                self.max_multiplier.max(1.0)
            } else {
                1.0
            },
        }
    }
}
