//! Depth and pattern calculations.
//!
//! Depth (0–3) summarizes how long and how often the user has been pulling.
//! It shortens every timer and raises the odds of the broken-on-appear pattern.

use super::rng::RandomSource;

/// Highest reachable depth.
pub const MAX_DEPTH: u8 = 3;

/// Hesitation beyond this many ms bumps depth by one.
const HESITATION_BOOST_MS: u32 = 4500;

/// Derive depth from the cycle count and the latest hesitation.
pub fn calculate_depth(pull_count: u32, hesitation_ms: u32) -> u8 {
    let base = match pull_count {
        0..=4 => 0,
        5..=11 => 1,
        12..=19 => 2,
        _ => 3,
    };
    let boost = u8::from(hesitation_ms > HESITATION_BOOST_MS);
    (base + boost).min(MAX_DEPTH)
}

/// Chance that a cycle at `depth` shows the broken-on-appear pattern.
pub fn b_pattern_probability(depth: u8) -> f64 {
    match depth {
        0 | 1 => 0.0,
        2 => 0.25,
        _ => 0.6,
    }
}

/// Draw the pattern flag for one cycle.
/// Depths with zero probability never consume a draw.
pub fn should_trigger_b_pattern(depth: u8, source: &mut dyn RandomSource) -> bool {
    let probability = b_pattern_probability(depth);
    if probability <= 0.0 {
        return false;
    }
    source.next_f64() < probability
}

/// Hesitation: press time beyond `threshold_ms`, capped at `max_ms`.
pub fn hesitation_from_press(press_ms: u64, threshold_ms: u32, max_ms: u32) -> u32 {
    let excess = press_ms.saturating_sub(u64::from(threshold_ms));
    excess.min(u64::from(max_ms)) as u32
}
