//! Top-level phase state machine.
//!
//! The controller is the only thing that changes the phase. Pointer input
//! drives `idle → pressing → released`; its own reveal timer drives
//! `released → wordAppearing | brokenOnAppear`; every later step waits for a
//! [`WordSignal`] that matches the current phase.

use crate::api::config::ExperienceConfig;
use crate::api::types::{Phase, Transition, WordSignal};
use crate::core::depth::{calculate_depth, hesitation_from_press, should_trigger_b_pattern};
use crate::core::rng::RandomSource;
use crate::core::store::{DepthState, DepthStore, KeyValueStore};
use crate::core::time::{Epoch, Interval, Millis, Timer};
use crate::systems::haptics::Haptics;

/// The active phase together with the data only that phase needs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PhaseState {
    Idle,
    Pressing { started_at: Millis, buzz: Interval },
    Released { reveal: Timer },
    WordAppearing,
    BrokenOnAppear,
    WordVisible,
    ReadingDetected,
    WordDegrading,
    Symbolized,
    ResetToCircle,
}

impl PhaseState {
    fn phase(&self) -> Phase {
        match self {
            PhaseState::Idle => Phase::Idle,
            PhaseState::Pressing { .. } => Phase::Pressing,
            PhaseState::Released { .. } => Phase::Released,
            PhaseState::WordAppearing => Phase::WordAppearing,
            PhaseState::BrokenOnAppear => Phase::BrokenOnAppear,
            PhaseState::WordVisible => Phase::WordVisible,
            PhaseState::ReadingDetected => Phase::ReadingDetected,
            PhaseState::WordDegrading => Phase::WordDegrading,
            PhaseState::Symbolized => Phase::Symbolized,
            PhaseState::ResetToCircle => Phase::ResetToCircle,
        }
    }
}

pub struct InteractionController<S: KeyValueStore> {
    config: ExperienceConfig,
    state: PhaseState,
    epoch: Epoch,
    store: DepthStore<S>,
    depth: DepthState,
    hesitation_ms: u32,
    pattern_b: bool,
    haptics: Option<Box<dyn Haptics>>,
}

impl<S: KeyValueStore> InteractionController<S> {
    /// Start idle with the depth state persisted in `store`.
    pub fn new(config: ExperienceConfig, store: S) -> Self {
        let store = DepthStore::new(store);
        let depth = store.load();
        log::info!(
            "depth state loaded: depth {}, {} pulls",
            depth.depth,
            depth.pull_count
        );
        Self {
            config,
            state: PhaseState::Idle,
            epoch: Epoch::default(),
            store,
            depth,
            hesitation_ms: 0,
            pattern_b: false,
            haptics: None,
        }
    }

    pub fn set_haptics(&mut self, haptics: Option<Box<dyn Haptics>>) {
        self.haptics = haptics;
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn depth_state(&self) -> DepthState {
        self.depth
    }

    pub fn hesitation_ms(&self) -> u32 {
        self.hesitation_ms
    }

    /// Pattern flag of the current cycle. Fixed from release until idle.
    pub fn is_pattern_b(&self) -> bool {
        self.pattern_b
    }

    pub fn store(&self) -> &S {
        self.store.store()
    }

    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Pointer went down. Only accepted while idle.
    pub fn press(&mut self, at: Millis) -> Option<Transition> {
        if self.state != PhaseState::Idle {
            log::trace!("pointer down ignored in {:?}", self.phase());
            return None;
        }
        if let Some(haptics) = self.haptics.as_mut() {
            haptics.vibrate(&self.config.haptic_press_pattern);
        }
        // Timers are armed with the epoch that `enter` is about to assign.
        let epoch = self.epoch.next();
        let next = PhaseState::Pressing {
            started_at: at,
            buzz: Interval::every(epoch, at, self.config.haptic_repeat_ms),
        };
        Some(self.enter(next, at))
    }

    /// Pointer went up, left, or was cancelled. Completes the cycle when a
    /// press is active; otherwise a no-op.
    pub fn release(&mut self, at: Millis, entropy: &mut dyn RandomSource) -> Option<Transition> {
        let PhaseState::Pressing { started_at, .. } = self.state else {
            log::trace!("release without press ignored in {:?}", self.phase());
            return None;
        };
        if let Some(haptics) = self.haptics.as_mut() {
            haptics.stop();
        }

        let hesitation = hesitation_from_press(
            at.saturating_sub(started_at),
            self.config.hesitation_threshold_ms,
            self.config.max_hesitation_ms,
        );
        let pull_count = self.depth.pull_count.saturating_add(1);
        self.depth = DepthState {
            depth: calculate_depth(pull_count, hesitation),
            pull_count,
        };
        self.store.save(self.depth);
        self.hesitation_ms = hesitation;
        self.pattern_b = should_trigger_b_pattern(self.depth.depth, entropy);
        log::info!(
            "pull #{}: hesitation {}ms, depth {}, pattern {}",
            pull_count,
            hesitation,
            self.depth.depth,
            if self.pattern_b { "B" } else { "A" }
        );

        let epoch = self.epoch.next();
        let next = PhaseState::Released {
            reveal: Timer::after(epoch, at, self.config.release_delay_ms),
        };
        Some(self.enter(next, at))
    }

    /// Earliest pending deadline of the controller's own timers.
    pub fn next_deadline(&self) -> Option<Millis> {
        match &self.state {
            PhaseState::Pressing { buzz, .. } => Some(buzz.deadline()),
            PhaseState::Released { reveal } => Some(reveal.deadline()),
            _ => None,
        }
    }

    /// Run the controller timer due at `now`.
    pub fn fire(&mut self, now: Millis) -> Option<Transition> {
        match self.state {
            PhaseState::Pressing { started_at, mut buzz } => {
                if buzz.tick(self.epoch, now).is_some() {
                    if let Some(haptics) = self.haptics.as_mut() {
                        haptics.vibrate(&self.config.haptic_repeat_pattern);
                    }
                    self.state = PhaseState::Pressing { started_at, buzz };
                }
                None
            }
            PhaseState::Released { reveal } if reveal.fires(self.epoch, now) => {
                let next = if self.pattern_b {
                    PhaseState::BrokenOnAppear
                } else {
                    PhaseState::WordAppearing
                };
                Some(self.enter(next, reveal.deadline()))
            }
            _ => None,
        }
    }

    /// Apply a completion signal from the word engine. Signals that do not
    /// match the current phase are stale and dropped.
    pub fn on_signal(&mut self, signal: WordSignal, at: Millis) -> Option<Transition> {
        let next = match (self.state, signal) {
            (PhaseState::WordAppearing, WordSignal::Visible) => PhaseState::WordVisible,
            (PhaseState::BrokenOnAppear, WordSignal::BrokenShown) => PhaseState::Symbolized,
            (PhaseState::WordVisible, WordSignal::ReadingDetected) => PhaseState::ReadingDetected,
            (PhaseState::ReadingDetected, WordSignal::DegradeNow) => PhaseState::WordDegrading,
            (PhaseState::WordDegrading, WordSignal::Symbolized) => PhaseState::Symbolized,
            (PhaseState::Symbolized, WordSignal::Reset) => PhaseState::ResetToCircle,
            (PhaseState::ResetToCircle, WordSignal::DecayComplete) => {
                self.hesitation_ms = 0;
                self.pattern_b = false;
                PhaseState::Idle
            }
            (state, signal) => {
                log::trace!("stale {:?} ignored in {:?}", signal, state.phase());
                return None;
            }
        };
        Some(self.enter(next, at))
    }

    fn enter(&mut self, next: PhaseState, at: Millis) -> Transition {
        let from = self.phase();
        self.epoch = self.epoch.next();
        self.state = next;
        let to = self.phase();
        log::debug!("{:?} -> {:?} at {}", from, to, at);
        Transition { from, to, at }
    }
}
