//! Where a word appears and how it enters.

use glam::Vec2;
use serde::Serialize;

use crate::core::rng::Lcg;
use crate::core::time::Millis;

/// Slide distance in px for entering words.
const SLIDE: f32 = 200.0;

/// How the word enters the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reveal {
    /// Fade in place.
    Fade,
    /// Slide in from `from` (px offset from the final position).
    Slide { from: Vec2 },
}

/// Screen position of the word, in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub reveal: Reveal,
}

impl Placement {
    const fn fade(top: f32, left: f32) -> Self {
        Self {
            top,
            left,
            reveal: Reveal::Fade,
        }
    }

    const fn slide(top: f32, left: f32, dx: f32, dy: f32) -> Self {
        Self {
            top,
            left,
            reveal: Reveal::Slide {
                from: Vec2::new(dx, dy),
            },
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::fade(50.0, 50.0)
    }
}

/// Every position a word can take.
pub const CATALOG: [Placement; 21] = [
    // Fixed 3×3 grid
    Placement::fade(35.0, 30.0),
    Placement::fade(35.0, 50.0),
    Placement::fade(35.0, 70.0),
    Placement::fade(50.0, 25.0),
    Placement::fade(50.0, 50.0),
    Placement::fade(50.0, 75.0),
    Placement::fade(65.0, 30.0),
    Placement::fade(65.0, 50.0),
    Placement::fade(65.0, 70.0),
    // From the left
    Placement::slide(40.0, 50.0, -SLIDE, 0.0),
    Placement::slide(50.0, 30.0, -SLIDE, 0.0),
    Placement::slide(60.0, 50.0, -SLIDE, 0.0),
    // From the right
    Placement::slide(40.0, 50.0, SLIDE, 0.0),
    Placement::slide(50.0, 70.0, SLIDE, 0.0),
    Placement::slide(60.0, 50.0, SLIDE, 0.0),
    // Dropping from above
    Placement::slide(50.0, 50.0, 0.0, -SLIDE),
    Placement::slide(50.0, 30.0, 0.0, -SLIDE),
    Placement::slide(50.0, 70.0, 0.0, -SLIDE),
    // Rising from below
    Placement::slide(50.0, 50.0, 0.0, SLIDE),
    Placement::slide(50.0, 30.0, 0.0, SLIDE),
    Placement::slide(50.0, 70.0, 0.0, SLIDE),
];

/// Seed from the selection time plus the sum of the word's char codes.
pub fn placement_seed(now: Millis, word: &str) -> u64 {
    let checksum: u64 = word.chars().map(|c| u64::from(c as u32)).sum();
    now.wrapping_add(checksum)
}

/// Pick a catalog entry from one draw of a stream seeded with `seed`.
pub fn choose_placement(seed: u64) -> Placement {
    CATALOG[Lcg::new(seed).next_index(CATALOG.len())]
}
