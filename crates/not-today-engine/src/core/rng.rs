//! Random sources.
//!
//! Two kinds that are never mixed: [`Lcg`] is a seeded stream that re-derives
//! the same values from the same seed (ring jitter, glyph corruption,
//! placement), while [`RandomSource`] is the unseeded source used for one-shot
//! draws such as the pattern flag and word choice.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Seedable linear-congruential stream.
/// `state' = (state * 9301 + 49297) mod 233280`, value = `state' / 233280`.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    /// Advance the stream and return a value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // Reducing first keeps the product in range for any u64 seed without
        // changing the result of the recurrence.
        self.state = ((self.state % MODULUS) * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Draw an index in [0, len).
    pub fn next_index(&mut self, len: usize) -> usize {
        scale_to_index(self.next_f64(), len)
    }
}

/// Non-reproducible uniform source in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Draw an index in [0, len).
    fn below(&mut self, len: usize) -> usize {
        scale_to_index(self.next_f64(), len)
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        Lcg::next_f64(self)
    }
}

fn scale_to_index(value: f64, len: usize) -> usize {
    ((value * len as f64) as usize).min(len.saturating_sub(1))
}

/// OS-seeded source backed by rand's thread-local generator.
#[cfg(feature = "thread-rng")]
pub struct ThreadEntropy {
    rng: rand::rngs::ThreadRng,
}

#[cfg(feature = "thread-rng")]
impl ThreadEntropy {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

#[cfg(feature = "thread-rng")]
impl Default for ThreadEntropy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "thread-rng")]
impl RandomSource for ThreadEntropy {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        self.rng.gen::<f64>()
    }
}
