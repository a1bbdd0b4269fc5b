use not_today_engine::{
    ring_lines, Dictionary, Experience, ExperienceConfig, InputEvent, InputQueue, Millis,
    RingLine,
};
use serde::Serialize;

use crate::entropy::MathRandom;
use crate::haptics::NavigatorHaptics;
use crate::storage::LocalStorage;

/// Owns the experience for the page's lifetime.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one of these
/// in a `thread_local!` and forwards every export to it.
pub struct ExperienceRunner {
    experience: Experience<LocalStorage>,
    input: InputQueue,
}

/// A ring descriptor plus its ready-to-draw SVG path.
#[derive(Serialize)]
struct RingPath<'a> {
    #[serde(flatten)]
    line: &'a RingLine,
    path: String,
}

impl ExperienceRunner {
    pub fn new(config: ExperienceConfig, dictionary: Dictionary) -> Self {
        let mut experience = Experience::new(
            config,
            dictionary,
            LocalStorage::open(),
            Box::new(MathRandom),
        );
        if let Some(haptics) = NavigatorHaptics::detect() {
            experience = experience.with_haptics(Box::new(haptics));
        }
        Self {
            experience,
            input: InputQueue::new(),
        }
    }

    /// Queue a pointer event and apply it right away. Vibration is only
    /// allowed from inside the browser's input handler.
    pub fn push_input(&mut self, event: InputEvent) {
        let now = event.at();
        self.input.push(event);
        self.tick(now);
    }

    pub fn tick(&mut self, now: Millis) {
        self.experience.process(&mut self.input, now);
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        self.experience.snapshot().to_json()
    }

    /// Transitions since the last call, as a JSON array.
    pub fn events_json(&mut self) -> serde_json::Result<String> {
        serde_json::to_string(&self.experience.drain_events())
    }
}

/// Ring descriptors for the idle circle, independent of any running experience.
pub fn ring_paths_json(seed: u64) -> serde_json::Result<String> {
    let lines = ring_lines(seed);
    let paths: Vec<RingPath<'_>> = lines
        .iter()
        .map(|line| RingPath {
            line,
            path: line.svg_path(),
        })
        .collect();
    serde_json::to_string(&paths)
}
