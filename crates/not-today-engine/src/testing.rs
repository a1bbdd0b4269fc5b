// Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::rng::RandomSource;
use crate::systems::haptics::Haptics;

/// Replays a fixed list of values, wrapping around.
pub struct Scripted {
    values: Vec<f64>,
    draws: usize,
}

impl Scripted {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            draws: 0,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for Scripted {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.draws % self.values.len()];
        self.draws += 1;
        value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticCall {
    Vibrate(Vec<u32>),
    Stop,
}

/// Records every haptic call into a shared log.
pub struct RecordingHaptics {
    log: Rc<RefCell<Vec<HapticCall>>>,
}

impl RecordingHaptics {
    pub fn new() -> (Self, Rc<RefCell<Vec<HapticCall>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&mut self, pattern: &[u32]) {
        self.log.borrow_mut().push(HapticCall::Vibrate(pattern.to_vec()));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(HapticCall::Stop);
    }
}
