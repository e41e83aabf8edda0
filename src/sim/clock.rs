//! Frame clock: wall-clock timestamps to clamped simulation delta-time

use serde::{Deserialize, Serialize};

/// Clamp a raw delta-time into `[0, max_dt]`.
///
/// NaN and negative values become 0; anything above `max_dt` (including
/// infinity from a stalled or backgrounded frame) becomes `max_dt`.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

/// Converts monotonic frame timestamps (milliseconds) into step lengths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Delta-time (seconds) since the previous timestamp, clamped.
    ///
    /// The first timestamp only anchors the clock and yields 0. A timestamp
    /// that runs backwards re-anchors and yields 0.
    pub fn frame_dt(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        clamp_dt(dt, self.max_dt)
    }

    /// Forget the anchor so the next frame yields 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016, 0.033), 0.016);
        assert_eq!(clamp_dt(-1.0, 0.033), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 0.033), 0.0);
        assert_eq!(clamp_dt(5.0, 0.033), 0.033);
        assert_eq!(clamp_dt(f32::INFINITY, 0.033), 0.033);
    }

    #[test]
    fn test_first_frame_anchors() {
        let mut clock = FrameClock::new(0.033);
        assert_eq!(clock.frame_dt(1234.0), 0.0);
        let dt = clock.frame_dt(1250.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut clock = FrameClock::new(0.033);
        clock.frame_dt(0.0);
        // Tab backgrounded for 10 seconds
        assert_eq!(clock.frame_dt(10_000.0), 0.033);
    }

    #[test]
    fn test_backwards_and_invalid_timestamps() {
        let mut clock = FrameClock::new(0.033);
        clock.frame_dt(500.0);
        assert_eq!(clock.frame_dt(400.0), 0.0);
        assert_eq!(clock.frame_dt(f64::NAN), 0.0);
        // Anchor survived the NaN
        let dt = clock.frame_dt(420.0);
        assert!((dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(0.033);
        clock.frame_dt(0.0);
        clock.reset();
        assert_eq!(clock.frame_dt(30.0), 0.0);
    }
}
