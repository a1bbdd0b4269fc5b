use crate::core::time::Millis;

/// Pointer input the engine understands. Events carry no payload beyond
/// the moment they occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { at: Millis },
    /// A touch/click ended.
    PointerUp { at: Millis },
    /// The pointer left the circle.
    PointerLeave { at: Millis },
    /// The platform cancelled the pointer.
    PointerCancel { at: Millis },
}

impl InputEvent {
    pub fn at(&self) -> Millis {
        match *self {
            InputEvent::PointerDown { at }
            | InputEvent::PointerUp { at }
            | InputEvent::PointerLeave { at }
            | InputEvent::PointerCancel { at } => at,
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { at: 10 });
        q.push(InputEvent::PointerLeave { at: 20 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_keeps_order_and_timestamps() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { at: 5 });
        q.push(InputEvent::PointerCancel { at: 9 });
        let stamps: Vec<Millis> = q.iter().map(InputEvent::at).collect();
        assert_eq!(stamps, vec![5, 9]);
        assert_eq!(q.len(), 2);
    }
}
