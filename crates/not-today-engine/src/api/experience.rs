use crate::api::config::ExperienceConfig;
use crate::api::types::{ExperienceEvent, Phase, Transition};
use crate::assets::dictionary::Dictionary;
use crate::bridge::snapshot::Snapshot;
use crate::core::rng::RandomSource;
use crate::core::store::{DepthState, KeyValueStore};
use crate::core::time::Millis;
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::controller::InteractionController;
use crate::systems::haptics::Haptics;
use crate::systems::word::{shake_intensity, WordEngine};

/// One press-and-decay experience: the controller, the word engine and
/// their collaborators, driven by pointer events and the host clock.
///
/// All entry points take an explicit timestamp. Timers fire in deadline
/// order and each transition is stamped with the deadline that caused it,
/// so the outcome does not depend on how often the host calls [`advance`].
///
/// [`advance`]: Experience::advance
pub struct Experience<S: KeyValueStore> {
    controller: InteractionController<S>,
    words: WordEngine,
    dictionary: Dictionary,
    entropy: Box<dyn RandomSource>,
    events: Vec<ExperienceEvent>,
    now: Millis,
}

impl<S: KeyValueStore> Experience<S> {
    pub fn new(
        config: ExperienceConfig,
        dictionary: Dictionary,
        store: S,
        entropy: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            controller: InteractionController::new(config.clone(), store),
            words: WordEngine::new(config),
            dictionary,
            entropy,
            events: Vec::with_capacity(16),
            now: 0,
        }
    }

    /// Install a vibration capability.
    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.controller.set_haptics(Some(haptics));
        self
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn depth_state(&self) -> DepthState {
        self.controller.depth_state()
    }

    pub fn hesitation_ms(&self) -> u32 {
        self.controller.hesitation_ms()
    }

    pub fn is_pattern_b(&self) -> bool {
        self.controller.is_pattern_b()
    }

    /// Latest time the experience has seen.
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn pointer_down(&mut self, at: Millis) {
        let at = self.catch_up(at);
        let transition = self.controller.press(at);
        self.apply(transition);
    }

    pub fn pointer_up(&mut self, at: Millis) {
        let at = self.catch_up(at);
        let transition = self.controller.release(at, self.entropy.as_mut());
        if transition.is_some() {
            let state = self.controller.depth_state();
            self.events.push(ExperienceEvent::DepthChanged {
                depth: state.depth,
                pull_count: state.pull_count,
            });
        }
        self.apply(transition);
    }

    pub fn pointer_leave(&mut self, at: Millis) {
        self.pointer_up(at);
    }

    pub fn pointer_cancel(&mut self, at: Millis) {
        self.pointer_up(at);
    }

    /// Drain queued input in order, then advance to `now`.
    pub fn process(&mut self, input: &mut InputQueue, now: Millis) {
        for event in input.drain() {
            match event {
                InputEvent::PointerDown { at } => self.pointer_down(at),
                InputEvent::PointerUp { at } => self.pointer_up(at),
                InputEvent::PointerLeave { at } => self.pointer_leave(at),
                InputEvent::PointerCancel { at } => self.pointer_cancel(at),
            }
        }
        self.advance(now);
    }

    /// Fire every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis) {
        while let Some(at) = self.next_deadline().filter(|at| *at <= now) {
            let transition = if self.controller.next_deadline() == Some(at) {
                self.controller.fire(at)
            } else {
                self.words
                    .fire(at)
                    .and_then(|signal| self.controller.on_signal(signal, at))
            };
            self.apply(transition);
        }
        self.now = self.now.max(now);
    }

    /// Events since the last drain.
    pub fn drain_events(&mut self) -> Vec<ExperienceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let phase = self.phase();
        let state = self.controller.depth_state();
        let cycle = self.words.cycle();
        Snapshot {
            phase,
            depth: state.depth,
            pull_count: state.pull_count,
            pattern_b: self.controller.is_pattern_b(),
            hesitation_ms: self.controller.hesitation_ms(),
            word: cycle.map(|c| c.word.clone()),
            glyphs: self.words.glyphs(phase),
            degrading_progress: cycle.map_or(0.0, |c| c.degrading_progress),
            symbolizing_progress: cycle.map_or(0.0, |c| c.symbolizing_progress),
            placement: cycle.map(|c| c.placement),
            tail_length: cycle.map_or(0, |c| c.tail_len),
            shake_intensity: shake_intensity(state.depth),
            circle_visible: phase.shows_circle(),
            circle_breathing_fast: phase == Phase::Pressing,
        }
    }

    /// Hand back the store, e.g. to simulate a reload.
    pub fn into_store(self) -> S {
        self.controller.into_store()
    }

    fn next_deadline(&self) -> Option<Millis> {
        match (self.controller.next_deadline(), self.words.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run timers up to `at`, returning the effective event time.
    /// Late timestamps are pulled forward so time never runs backwards.
    fn catch_up(&mut self, at: Millis) -> Millis {
        self.advance(at);
        self.now
    }

    /// Record a transition and let the word engine react. Immediate
    /// completions (the reading-detected hop) are applied in the same call.
    fn apply(&mut self, transition: Option<Transition>) {
        let mut next = transition;
        while let Some(t) = next.take() {
            self.events.push(t.into());
            let signal = self.words.enter(
                t.to,
                t.at,
                self.controller.depth_state().depth,
                &self.dictionary,
                self.entropy.as_mut(),
            );
            next = signal.and_then(|signal| self.controller.on_signal(signal, t.at));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{MemoryStore, DEPTH_KEY, PULL_COUNT_KEY};
    use crate::systems::glyphs::SYMBOLS;
    use crate::testing::{HapticCall, RecordingHaptics, Scripted};

    const WORDS: &str = r#"["not today", "maybe later", "soon"]"#;

    fn experience_with(store: MemoryStore, draws: &[f64]) -> Experience<MemoryStore> {
        Experience::new(
            ExperienceConfig::default(),
            Dictionary::from_json(WORDS).unwrap(),
            store,
            Box::new(Scripted::new(draws)),
        )
    }

    fn experience(draws: &[f64]) -> Experience<MemoryStore> {
        experience_with(MemoryStore::new(), draws)
    }

    fn deep_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(DEPTH_KEY, "3").unwrap();
        store.set(PULL_COUNT_KEY, "25").unwrap();
        store
    }

    fn phases(events: &[ExperienceEvent]) -> Vec<Phase> {
        events
            .iter()
            .filter_map(|e| match e {
                ExperienceEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    fn stamped(events: &[ExperienceEvent]) -> Vec<(Phase, Millis)> {
        events
            .iter()
            .filter_map(|e| match e {
                ExperienceEvent::PhaseChanged { to, at, .. } => Some((*to, *at)),
                _ => None,
            })
            .collect()
    }

    /// Press for `held` ms starting at `start`, then run the cycle to idle.
    fn pull(exp: &mut Experience<MemoryStore>, start: Millis, held: Millis) -> Millis {
        exp.pointer_down(start);
        exp.pointer_up(start + held);
        let end = start + held + 60_000;
        exp.advance(end);
        assert_eq!(exp.phase(), Phase::Idle);
        end
    }

    #[test]
    fn short_press_has_no_hesitation() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(0);
        exp.pointer_up(1500);
        assert_eq!(exp.hesitation_ms(), 0);
        assert_eq!(exp.phase(), Phase::Released);
    }

    #[test]
    fn very_long_press_is_clamped() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(100);
        exp.pointer_up(100 + 1500 + 6000);
        assert_eq!(exp.hesitation_ms(), 5000);
    }

    #[test]
    fn plain_cycle_phase_sequence() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(0);
        exp.pointer_up(200);
        exp.advance(60_000);
        assert!(!exp.is_pattern_b());
        assert_eq!(
            stamped(&exp.drain_events()),
            vec![
                (Phase::Pressing, 0),
                (Phase::Released, 200),
                (Phase::WordAppearing, 300),
                (Phase::WordVisible, 1700),
                (Phase::ReadingDetected, 2500),
                (Phase::WordDegrading, 2500),
                (Phase::Symbolized, 5700),
                (Phase::ResetToCircle, 8700),
                (Phase::Idle, 10_700),
            ]
        );
    }

    #[test]
    fn broken_cycle_skips_reading_and_degrading() {
        let mut exp = experience_with(deep_store(), &[0.0]);
        exp.pointer_down(0);
        exp.pointer_up(200);
        assert_eq!(exp.depth_state().depth, 3);
        assert!(exp.is_pattern_b());
        exp.advance(60_000);

        let seen = phases(&exp.drain_events());
        assert_eq!(
            seen,
            vec![
                Phase::Pressing,
                Phase::Released,
                Phase::BrokenOnAppear,
                Phase::Symbolized,
                Phase::ResetToCircle,
                Phase::Idle,
            ]
        );
        assert!(!seen.contains(&Phase::WordVisible));
        assert!(!seen.contains(&Phase::WordDegrading));
    }

    #[test]
    fn broken_cycle_timing() {
        let mut exp = experience_with(deep_store(), &[0.0]);
        exp.pointer_down(0);
        exp.pointer_up(200);
        exp.advance(60_000);
        let stamps = stamped(&exp.drain_events());
        assert_eq!(
            &stamps[2..],
            &[
                (Phase::BrokenOnAppear, 300),
                (Phase::Symbolized, 2300),
                (Phase::ResetToCircle, 4700),
                (Phase::Idle, 6700),
            ]
        );
    }

    #[test]
    fn depth_grows_on_fifth_pull_and_survives_reload() {
        let mut exp = experience(&[0.9]);
        let mut t = 0;
        for _ in 0..4 {
            t = pull(&mut exp, t, 100);
            assert_eq!(exp.depth_state().depth, 0);
        }
        pull(&mut exp, t, 100);
        assert_eq!(exp.depth_state(), DepthState { depth: 1, pull_count: 5 });

        let reloaded = experience_with(exp.into_store(), &[0.9]);
        assert_eq!(reloaded.depth_state(), DepthState { depth: 1, pull_count: 5 });
        assert_eq!(reloaded.phase(), Phase::Idle);
    }

    #[test]
    fn release_emits_depth_event() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(0);
        exp.pointer_up(100);
        let events = exp.drain_events();
        assert!(events.contains(&ExperienceEvent::DepthChanged { depth: 0, pull_count: 1 }));
    }

    #[test]
    fn leave_and_cancel_release_like_up() {
        for release in [
            Experience::pointer_up as fn(&mut Experience<MemoryStore>, Millis),
            Experience::pointer_leave,
            Experience::pointer_cancel,
        ] {
            let mut exp = experience(&[0.9]);
            exp.pointer_down(0);
            release(&mut exp, 300);
            assert_eq!(exp.phase(), Phase::Released);
            assert_eq!(exp.depth_state().pull_count, 1);
        }
    }

    #[test]
    fn stray_releases_are_ignored() {
        let mut exp = experience(&[0.9]);
        exp.pointer_up(10);
        exp.pointer_leave(20);
        exp.pointer_cancel(30);
        assert_eq!(exp.phase(), Phase::Idle);
        assert_eq!(exp.depth_state().pull_count, 0);
        assert!(exp.drain_events().is_empty());
    }

    #[test]
    fn leave_after_up_does_not_double_count() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(0);
        exp.pointer_up(100);
        exp.pointer_leave(101);
        assert_eq!(exp.depth_state().pull_count, 1);
    }

    #[test]
    fn pressing_mid_cycle_is_ignored() {
        let mut exp = experience(&[0.9]);
        exp.pointer_down(0);
        exp.pointer_up(200);
        exp.pointer_down(2000);
        exp.pointer_up(2100);
        assert_eq!(exp.depth_state().pull_count, 1);
        exp.advance(60_000);
        assert_eq!(phases(&exp.drain_events()).len(), 9);
    }

    #[test]
    fn rapid_re_press_runs_a_clean_cycle() {
        let mut exp = experience(&[0.9]);
        pull(&mut exp, 0, 100);
        exp.drain_events();

        // Press again the instant the previous cycle went idle.
        exp.pointer_down(60_100);
        exp.pointer_up(60_150);
        exp.advance(120_000);
        let stamps = stamped(&exp.drain_events());
        assert_eq!(stamps[2], (Phase::WordAppearing, 60_250));
        assert_eq!(stamps.last(), Some(&(Phase::Idle, 60_250 + 10_400)));
        assert_eq!(stamps.len(), 9);
    }

    #[test]
    fn coarse_and_fine_ticks_agree() {
        let mut coarse = experience(&[0.9]);
        coarse.pointer_down(0);
        coarse.pointer_up(700);
        coarse.advance(30_000);

        let mut fine = experience(&[0.9]);
        fine.pointer_down(0);
        fine.pointer_up(700);
        let mut t = 700;
        while t < 30_000 {
            t += 16;
            fine.advance(t);
        }
        assert_eq!(coarse.drain_events(), fine.drain_events());
    }

    #[test]
    fn late_timestamps_do_not_rewind() {
        let mut exp = experience(&[0.9]);
        exp.advance(5000);
        exp.pointer_down(4000);
        assert_eq!(exp.now(), 5000);
        exp.pointer_up(5100);
        assert_eq!(exp.hesitation_ms(), 0);
        assert_eq!(exp.phase(), Phase::Released);
    }

    #[test]
    fn pattern_flag_is_fixed_for_the_cycle() {
        // Flag draw 0.1 < 0.25 at depth 2; later draws are all high.
        let mut store = MemoryStore::new();
        store.set(DEPTH_KEY, "2").unwrap();
        store.set(PULL_COUNT_KEY, "13").unwrap();
        let mut exp = experience_with(store, &[0.1, 0.9, 0.9, 0.9]);
        exp.pointer_down(0);
        exp.pointer_up(100);
        for t in (100..=6000).step_by(100) {
            exp.advance(t);
            if exp.phase() != Phase::Idle {
                assert!(exp.is_pattern_b());
            }
        }
        exp.advance(60_000);
        assert!(!exp.is_pattern_b());
        assert_eq!(exp.hesitation_ms(), 0);
    }

    #[test]
    fn process_drains_queue_in_order() {
        let mut exp = experience(&[0.9]);
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { at: 0 });
        input.push(InputEvent::PointerCancel { at: 2000 });
        exp.process(&mut input, 2050);
        assert!(input.is_empty());
        assert_eq!(exp.phase(), Phase::Released);
        assert_eq!(exp.hesitation_ms(), 500);
        exp.process(&mut input, 2100);
        assert_eq!(exp.phase(), Phase::WordAppearing);
    }

    #[test]
    fn haptics_follow_the_press() {
        let (haptics, log) = RecordingHaptics::new();
        let mut exp = experience(&[0.9]).with_haptics(Box::new(haptics));
        exp.pointer_down(0);
        exp.advance(1000);
        exp.pointer_up(1000);
        exp.advance(60_000);
        let calls = log.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.last(), Some(&HapticCall::Stop));
    }

    #[test]
    fn snapshot_tracks_the_cycle() {
        let mut exp = experience(&[0.0]);
        let idle = exp.snapshot();
        assert!(idle.circle_visible);
        assert!(!idle.circle_breathing_fast);
        assert!(idle.glyphs.is_empty());
        assert_eq!(idle.word, None);

        exp.pointer_down(0);
        assert!(exp.snapshot().circle_breathing_fast);

        exp.pointer_up(100);
        let released = exp.snapshot();
        assert_eq!(released.word.as_deref(), Some("not today"));
        assert!(released.glyphs.is_empty());
        assert!(!released.circle_visible);

        exp.advance(200);
        assert_eq!(exp.snapshot().text(), "not today");

        // Degrading starts at 200 + 1400 + 800 = 2400 and lasts 3200 at depth 0.
        exp.advance(4000);
        let degrading = exp.snapshot();
        assert_eq!(degrading.phase, Phase::WordDegrading);
        assert_eq!(degrading.degrading_progress, 0.5);
        assert_eq!(degrading.text(), "not today");
        assert_eq!(degrading.shake_intensity, 1.0);

        // Symbolizing runs 5600..7600.
        exp.advance(7600);
        let symbolized = exp.snapshot();
        assert_eq!(symbolized.phase, Phase::Symbolized);
        assert_eq!(symbolized.symbolizing_progress, 1.0);
        for (g, ch) in symbolized.glyphs.iter().zip("not today".chars()) {
            assert!(g.ch == ch || SYMBOLS.contains(&g.ch));
        }

        exp.advance(60_000);
        let done = exp.snapshot();
        assert_eq!(done.phase, Phase::Idle);
        assert_eq!(done.word, None);
        assert_eq!(done.placement, None);
    }

    #[test]
    fn snapshot_serializes() {
        let mut exp = experience(&[0.0]);
        exp.pointer_down(0);
        exp.pointer_up(100);
        exp.advance(300);
        let json = exp.snapshot().to_json().unwrap();
        assert!(json.contains(r#""phase":"wordAppearing""#));
        assert!(json.contains(r#""pullCount":1"#));
        assert!(json.contains(r#""word":"not today""#));
    }
}
