//! Word lifecycle: choose a word on release, then run the per-phase timers
//! and transformations until the word has decayed.
//!
//! The engine never changes the phase itself. It reacts to the phase it is
//! told about via [`WordEngine::enter`] and reports completions as
//! [`WordSignal`]s.

use crate::api::config::ExperienceConfig;
use crate::api::types::{Phase, WordSignal};
use crate::assets::dictionary::Dictionary;
use crate::core::depth::MAX_DEPTH;
use crate::core::rng::RandomSource;
use crate::core::time::{progress, Epoch, Interval, Millis, Timer};
use crate::systems::glyphs::{
    broken_glyphs, corrupt, corruption_seed, symbolize, symbolize_seed, symbolized_glyphs, Glyph,
};
use crate::systems::placement::{choose_placement, placement_seed, Placement};

/// Transient state of one word, rebuilt every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCycle {
    pub word: String,
    pub chars: Vec<char>,
    /// Trailing characters kept legible until the very end.
    pub tail_len: usize,
    pub placement: Placement,
    /// Pre-corrupted form, only for broken-on-appear cycles.
    pub broken: Option<Vec<char>>,
    pub degrading_progress: f64,
    pub symbolizing_progress: f64,
}

impl WordCycle {
    fn new(word: &str, tail_len: usize, placement: Placement) -> Self {
        Self {
            word: word.to_string(),
            chars: word.chars().collect(),
            tail_len,
            placement,
            broken: None,
            degrading_progress: 0.0,
            symbolizing_progress: 0.0,
        }
    }

    /// The word as currently transformed by symbolizing progress.
    pub fn symbolized(&self) -> Vec<char> {
        if self.symbolizing_progress <= 0.0 {
            return self.chars.clone();
        }
        let seed = symbolize_seed(self.chars.len(), self.symbolizing_progress);
        symbolize(&self.chars, self.symbolizing_progress, self.tail_len, seed)
    }
}

/// Timers owned by the current phase. Swapped wholesale on every phase entry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Nothing scheduled.
    Waiting,
    Appearing { done: Timer },
    Broken { done: Timer },
    Reading { done: Timer },
    Degrading { started_at: Millis, duration: Millis, poll: Interval },
    Symbolizing { started_at: Millis, duration: Millis, poll: Interval },
    Lingering { done: Timer },
    Resetting { done: Timer },
}

pub struct WordEngine {
    config: ExperienceConfig,
    stage: Stage,
    epoch: Epoch,
    depth: u8,
    cycle: Option<WordCycle>,
}

impl WordEngine {
    pub fn new(config: ExperienceConfig) -> Self {
        Self {
            config,
            stage: Stage::Waiting,
            epoch: Epoch::default(),
            depth: 0,
            cycle: None,
        }
    }

    pub fn cycle(&self) -> Option<&WordCycle> {
        self.cycle.as_ref()
    }

    /// React to the controller entering `phase` at `at`.
    ///
    /// Returns a signal when the phase completes immediately.
    pub fn enter(
        &mut self,
        phase: Phase,
        at: Millis,
        depth: u8,
        dictionary: &Dictionary,
        entropy: &mut dyn RandomSource,
    ) -> Option<WordSignal> {
        self.epoch = self.epoch.next();
        self.stage = Stage::Waiting;
        self.depth = depth.min(MAX_DEPTH);

        match phase {
            Phase::Idle => {
                self.cycle = None;
                None
            }
            Phase::Pressing => None,
            Phase::Released => {
                self.select(at, dictionary, entropy);
                None
            }
            Phase::WordAppearing => {
                self.stage = Stage::Appearing {
                    done: Timer::after(self.epoch, at, self.config.appear_ms),
                };
                None
            }
            Phase::BrokenOnAppear => {
                let depth = self.depth;
                if let Some(cycle) = self.cycle.as_mut() {
                    let seed = corruption_seed(cycle.chars.len(), depth);
                    cycle.broken = Some(corrupt(&cycle.chars, depth, seed));
                }
                self.stage = Stage::Broken {
                    done: Timer::after(self.epoch, at, self.config.broken_on_appear_ms),
                };
                None
            }
            Phase::WordVisible => {
                self.stage = Stage::Reading {
                    done: Timer::after(self.epoch, at, self.config.reading_delay(self.depth)),
                };
                None
            }
            Phase::ReadingDetected => Some(WordSignal::DegradeNow),
            Phase::WordDegrading => {
                self.stage = Stage::Degrading {
                    started_at: at,
                    duration: self.config.degrading_duration(self.depth),
                    poll: Interval::every(self.epoch, at, self.config.poll_interval_ms),
                };
                None
            }
            Phase::Symbolized => {
                self.stage = Stage::Symbolizing {
                    started_at: at,
                    duration: self.config.symbolizing_duration(self.depth),
                    poll: Interval::every(self.epoch, at, self.config.poll_interval_ms),
                };
                None
            }
            Phase::ResetToCircle => {
                self.stage = Stage::Resetting {
                    done: Timer::after(self.epoch, at, self.config.reset_ms),
                };
                None
            }
        }
    }

    /// Choose the word, tail length and placement for a new cycle.
    fn select(&mut self, at: Millis, dictionary: &Dictionary, entropy: &mut dyn RandomSource) {
        let word = dictionary.pick(entropy);
        let tail_len = tail_length(self.depth, entropy);
        let placement = choose_placement(placement_seed(at, word));
        log::debug!("selected {:?} (tail {}) at depth {}", word, tail_len, self.depth);
        self.cycle = Some(WordCycle::new(word, tail_len, placement));
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        match &self.stage {
            Stage::Waiting => None,
            Stage::Appearing { done }
            | Stage::Broken { done }
            | Stage::Reading { done }
            | Stage::Lingering { done }
            | Stage::Resetting { done } => Some(done.deadline()),
            Stage::Degrading { poll, .. } | Stage::Symbolizing { poll, .. } => {
                Some(poll.deadline())
            }
        }
    }

    /// Run whatever is due at `now`. Returns at most one signal.
    pub fn fire(&mut self, now: Millis) -> Option<WordSignal> {
        let epoch = self.epoch;
        match self.stage {
            Stage::Waiting => None,
            Stage::Appearing { done } => self.finish(done, now, WordSignal::Visible),
            Stage::Broken { done } => self.finish(done, now, WordSignal::BrokenShown),
            Stage::Reading { done } => self.finish(done, now, WordSignal::ReadingDetected),
            Stage::Lingering { done } => self.finish(done, now, WordSignal::Reset),
            Stage::Resetting { done } => {
                let signal = self.finish(done, now, WordSignal::DecayComplete);
                if signal.is_some() {
                    self.cycle = None;
                }
                signal
            }
            Stage::Degrading {
                started_at,
                duration,
                mut poll,
            } => {
                let Some(at) = poll.tick(epoch, now) else {
                    return self.drop_if_stale(poll.deadline(), now);
                };
                let p = progress(started_at, at, duration);
                if let Some(cycle) = self.cycle.as_mut() {
                    cycle.degrading_progress = p;
                }
                if p >= 1.0 {
                    self.stage = Stage::Waiting;
                    return Some(WordSignal::Symbolized);
                }
                self.stage = Stage::Degrading {
                    started_at,
                    duration,
                    poll,
                };
                None
            }
            Stage::Symbolizing {
                started_at,
                duration,
                mut poll,
            } => {
                let Some(at) = poll.tick(epoch, now) else {
                    return self.drop_if_stale(poll.deadline(), now);
                };
                let p = progress(started_at, at, duration);
                if let Some(cycle) = self.cycle.as_mut() {
                    cycle.symbolizing_progress = p;
                }
                self.stage = if p >= 1.0 {
                    Stage::Lingering {
                        done: Timer::after(epoch, at, self.config.linger_ms),
                    }
                } else {
                    Stage::Symbolizing {
                        started_at,
                        duration,
                        poll,
                    }
                };
                None
            }
        }
    }

    fn finish(&mut self, done: Timer, now: Millis, signal: WordSignal) -> Option<WordSignal> {
        if !done.fires(self.epoch, now) {
            return self.drop_if_stale(done.deadline(), now);
        }
        self.stage = Stage::Waiting;
        Some(signal)
    }

    /// A due timer from another epoch must never fire; discard it.
    fn drop_if_stale(&mut self, deadline: Millis, now: Millis) -> Option<WordSignal> {
        if now >= deadline {
            log::trace!("discarding stale word timer due at {}", deadline);
            self.stage = Stage::Waiting;
        }
        None
    }

    /// Glyphs to draw for `phase`. Empty while no word is on screen.
    pub fn glyphs(&self, phase: Phase) -> Vec<Glyph> {
        let Some(cycle) = self.cycle.as_ref().filter(|_| phase.shows_word()) else {
            return Vec::new();
        };
        match phase {
            Phase::BrokenOnAppear => {
                broken_glyphs(cycle.broken.as_deref().unwrap_or(&cycle.chars[..]))
            }
            Phase::Symbolized | Phase::ResetToCircle => symbolized_glyphs(
                &cycle.symbolized(),
                cycle.symbolizing_progress,
                cycle.tail_len,
            ),
            _ => cycle.chars.iter().copied().map(Glyph::plain).collect(),
        }
    }
}

/// Trailing characters to protect: at depth 3, half the time exactly one,
/// otherwise 1–3; shallower depths protect 1–5.
pub fn tail_length(depth: u8, entropy: &mut dyn RandomSource) -> usize {
    if depth >= MAX_DEPTH {
        if entropy.next_f64() < 0.5 {
            1
        } else {
            entropy.below(3) + 1
        }
    } else {
        entropy.below(5) + 1
    }
}

/// Shake strength of the degrading word.
pub fn shake_intensity(depth: u8) -> f32 {
    match depth {
        0 => 1.0,
        1 => 1.5,
        2 => 2.0,
        _ => 2.5,
    }
}
