//! Collision resolution between the player's hit-region and live stones
//!
//! Purely positional: no sweeping. The clamped frame step keeps tunnelling
//! rare at the speeds the difficulty ramp allows.

use super::rect::Rect;
use super::stone::Stone;

/// Index of the first stone overlapping `hit_region`, if any.
///
/// Stops at the first hit; the remaining stones are not checked.
pub fn resolve(hit_region: &Rect, stones: &[Stone]) -> Option<usize> {
    stones
        .iter()
        .position(|stone| hit_region.intersects(&stone.rect()))
}
