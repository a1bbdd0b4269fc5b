//! Character transformations over a word.
//!
//! Both transforms are pure: the same inputs always give the same output, so
//! re-evaluating on every tick is safe. Re-evaluating with a lower progress
//! can turn a symbol back into its letter; that flicker is intended.

use serde::Serialize;

use crate::core::rng::Lcg;

/// Replacement symbols.
pub const SYMBOLS: [char; 9] = ['·', '-', '_', '/', '|', '#', '%', '@', '*'];

/// Tail characters stay legible until progress reaches this value.
pub const TAIL_RELEASE_PROGRESS: f64 = 0.95;

/// Progress after which the last tail glyphs fade to ghosts.
pub const GHOST_PROGRESS: f64 = 0.85;

/// Transform one character of a word of `len` characters.
///
/// Spaces always survive. Characters in the tail zone (the last `tail_len`)
/// survive while `progress < 0.95`. Everything else flips to a symbol when a
/// draw from the stream seeded at `seed + index` falls under
/// `progress * (0.7 + 0.3 * index / len)`; a second draw from the same
/// stream picks the symbol.
pub fn to_symbol(
    ch: char,
    progress: f64,
    index: usize,
    len: usize,
    tail_len: usize,
    seed: u64,
) -> char {
    if ch == ' ' {
        return ' ';
    }
    let in_tail = index + tail_len >= len;
    if in_tail && progress < TAIL_RELEASE_PROGRESS {
        return ch;
    }

    let mut rng = Lcg::new(seed.wrapping_add(index as u64));
    let position_factor = index as f64 / len as f64;
    let conversion_chance = progress * (0.7 + position_factor * 0.3);
    if rng.next_f64() < conversion_chance {
        SYMBOLS[rng.next_index(SYMBOLS.len())]
    } else {
        ch
    }
}

/// Apply [`to_symbol`] to every character.
pub fn symbolize(chars: &[char], progress: f64, tail_len: usize, seed: u64) -> Vec<char> {
    chars
        .iter()
        .enumerate()
        .map(|(i, &ch)| to_symbol(ch, progress, i, chars.len(), tail_len, seed))
        .collect()
}

/// Seed for symbolizing: word length and the current percent bucket.
pub fn symbolize_seed(len: usize, progress: f64) -> u64 {
    len as u64 * 1000 + (progress * 100.0).floor() as u64
}

/// Corrupt a word up front for the broken-on-appear pattern.
///
/// One stream drives the whole word; each non-space character is replaced
/// with probability 0.3 at depth 2 and 0.5 otherwise.
pub fn corrupt(chars: &[char], depth: u8, seed: u64) -> Vec<char> {
    let rate = if depth == 2 { 0.3 } else { 0.5 };
    let mut rng = Lcg::new(seed);
    chars
        .iter()
        .map(|&ch| {
            if ch == ' ' {
                ' '
            } else if rng.next_f64() < rate {
                SYMBOLS[rng.next_index(SYMBOLS.len())]
            } else {
                ch
            }
        })
        .collect()
}

/// Seed for corruption: word length and depth.
pub fn corruption_seed(len: usize, depth: u8) -> u64 {
    len as u64 * 1000 + u64::from(depth) * 100
}

/// One rendered character with its display hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Glyph {
    pub ch: char,
    pub opacity: f32,
    /// Drawn as a faint glow instead of solid text.
    pub ghost: bool,
}

impl Glyph {
    pub fn plain(ch: char) -> Self {
        Self {
            ch,
            opacity: 1.0,
            ghost: false,
        }
    }
}

/// Hints for a broken-on-appear word: opacity ripples along the word.
pub fn broken_glyphs(chars: &[char]) -> Vec<Glyph> {
    chars
        .iter()
        .enumerate()
        .map(|(i, &ch)| Glyph {
            ch,
            opacity: 0.7 + (i as f32 * 0.5).sin() * 0.15,
            ghost: false,
        })
        .collect()
}

/// Hints for a symbolizing word. Near the end, the last (up to three) tail
/// glyphs turn into ghosts.
pub fn symbolized_glyphs(chars: &[char], progress: f64, tail_len: usize) -> Vec<Glyph> {
    let ghost_from = chars.len().saturating_sub(tail_len.min(3));
    let ghosting = progress > GHOST_PROGRESS;
    chars
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            let ghost = ghosting && i >= ghost_from;
            Glyph {
                ch,
                opacity: if ghost { 0.7 } else { 0.9 },
                ghost,
            }
        })
        .collect()
}
