//! Throwers: enemy actors that scroll in from the right and release one stone

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Spawn cadence policy.
///
/// Delays are drawn from a small pool of candidate intervals plus symmetric
/// jitter, so spawns never fall into a fixed rhythm but stay bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Candidate delays (seconds)
    pub pool: Vec<f32>,
    /// Uniform jitter added to the picked delay, in [-jitter, +jitter]
    pub jitter: f32,
    /// Minimum delay after jitter
    pub floor: f32,
    /// Distance beyond the right edge where throwers appear
    pub spawn_offset: f32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            pool: vec![0.8, 1.0, 1.4, 2.0, 2.6, 3.0],
            jitter: 0.15,
            floor: 0.7,
            spawn_offset: 80.0,
        }
    }
}

impl SpawnPolicy {
    /// Sample the delay until the next spawn
    pub fn sample_delay<R: Rng>(&self, rng: &mut R) -> f32 {
        let base = if self.pool.is_empty() {
            self.floor
        } else {
            self.pool[rng.random_range(0..self.pool.len())]
        };
        let jitter = if self.jitter > 0.0 {
            rng.random_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (base + jitter).max(self.floor)
    }

    /// Largest delay `sample_delay` can return
    pub fn max_delay(&self) -> f32 {
        let max_pool = self.pool.iter().copied().fold(self.floor, f32::max);
        (max_pool + self.jitter.max(0.0)).max(self.floor)
    }

    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.pool.retain(|d| d.is_finite() && *d > 0.0);
        if self.pool.is_empty() {
            self.pool = defaults.pool;
        }
        self.jitter = if self.jitter.is_finite() {
            self.jitter.abs()
        } else {
            defaults.jitter
        };
        // A zero floor would let jitter produce back-to-back spawns
        self.floor = if self.floor.is_finite() {
            self.floor.max(0.05)
        } else {
            defaults.floor
        };
        if !self.spawn_offset.is_finite() || self.spawn_offset < 0.0 {
            self.spawn_offset = defaults.spawn_offset;
        }
        self
    }
}

/// An enemy that walks in with the world and throws a single stone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thrower {
    pub id: u32,
    /// Left edge of the sprite
    pub x: f32,
    /// Animation frame index in [0, frame_count)
    pub frame: u8,
    pub anim_timer: f32,
    pub has_thrown: bool,
    /// Exit fade, 1 while on screen
    pub alpha: f32,
}

impl Thrower {
    pub fn new(id: u32, x: f32) -> Self {
        Self {
            id,
            x,
            frame: 0,
            anim_timer: 0.0,
            has_thrown: false,
            alpha: 1.0,
        }
    }

    /// Scroll and animate. Returns true on the step this thrower releases
    /// its stone, which happens at most once in its lifetime.
    pub fn advance(
        &mut self,
        dt: f32,
        world_speed: f32,
        frame_interval: f32,
        frame_count: u8,
        release_frame: u8,
        retire_x: f32,
    ) -> bool {
        self.x -= world_speed * dt;

        let mut released = false;
        self.anim_timer += dt;
        while self.anim_timer >= frame_interval {
            self.anim_timer -= frame_interval;
            self.frame = (self.frame + 1) % frame_count.max(1);
            if self.frame == release_frame && !self.has_thrown {
                self.has_thrown = true;
                released = true;
            }
        }

        self.alpha = exit_alpha(self.x, retire_x);
        released
    }

    /// Past the cutoff and safe to drop
    #[inline]
    pub fn is_retired(&self, retire_x: f32) -> bool {
        self.x < retire_x
    }
}

/// Fade from 1 at the left edge of the field to 0 at the retirement cutoff
fn exit_alpha(x: f32, retire_x: f32) -> f32 {
    if x >= 0.0 || retire_x >= 0.0 {
        1.0
    } else {
        (1.0 - x / retire_x).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const INTERVAL: f32 = 0.1;
    const FRAMES: u8 = 4;
    const RELEASE: u8 = 2;
    const RETIRE_X: f32 = -320.0;

    #[test]
    fn test_spawn_delay_bounds_and_coverage() {
        let policy = SpawnPolicy::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut hit_entries = [false; 6];

        for _ in 0..10_000 {
            let delay = policy.sample_delay(&mut rng);
            assert!(delay >= policy.floor, "{delay} below floor");
            assert!(delay <= policy.max_delay(), "{delay} above max");
            min = min.min(delay);
            max = max.max(delay);
            for (i, &entry) in policy.pool.iter().enumerate() {
                if (delay - entry).abs() <= policy.jitter {
                    hit_entries[i] = true;
                }
            }
        }

        assert!(hit_entries.iter().filter(|&&h| h).count() > 1);
        // Not a constant: spans from the short to the long end of the pool
        assert!(min < 1.0);
        assert!(max > 2.8);
    }

    #[test]
    fn test_spawn_delay_without_jitter_is_a_pool_entry() {
        let policy = SpawnPolicy {
            jitter: 0.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let delay = policy.sample_delay(&mut rng);
            assert!(policy.pool.contains(&delay));
        }
    }

    #[test]
    fn test_sanitized_policy() {
        let policy = SpawnPolicy {
            pool: vec![-1.0, f32::NAN],
            jitter: -0.2,
            floor: 0.0,
            spawn_offset: -5.0,
        }
        .sanitized();
        assert_eq!(policy.pool, SpawnPolicy::default().pool);
        assert_eq!(policy.jitter, 0.2);
        assert_eq!(policy.floor, 0.05);
        assert_eq!(policy.spawn_offset, 80.0);
    }

    #[test]
    fn test_releases_once_on_release_frame() {
        let mut thrower = Thrower::new(1, 1000.0);
        let mut releases = 0;
        let mut release_frames = Vec::new();
        // Several full animation cycles
        for _ in 0..200 {
            if thrower.advance(0.02, 460.0, INTERVAL, FRAMES, RELEASE, RETIRE_X) {
                releases += 1;
                release_frames.push(thrower.frame);
            }
        }
        assert_eq!(releases, 1);
        assert_eq!(release_frames, vec![RELEASE]);
        assert!(thrower.has_thrown);
    }

    #[test]
    fn test_scrolls_left_at_world_speed() {
        let mut thrower = Thrower::new(1, 1000.0);
        thrower.advance(0.5, 400.0, INTERVAL, FRAMES, RELEASE, RETIRE_X);
        assert!((thrower.x - 800.0).abs() < 1e-3);
    }

    #[test]
    fn test_exit_fade_and_retirement() {
        let mut thrower = Thrower::new(1, 10.0);
        thrower.advance(0.0, 0.0, INTERVAL, FRAMES, RELEASE, RETIRE_X);
        assert_eq!(thrower.alpha, 1.0);

        thrower.x = -160.0;
        thrower.advance(0.0, 0.0, INTERVAL, FRAMES, RELEASE, RETIRE_X);
        assert!((thrower.alpha - 0.5).abs() < 1e-6);
        assert!(!thrower.is_retired(RETIRE_X));

        thrower.x = -321.0;
        assert!(thrower.is_retired(RETIRE_X));
    }
}
