/// Milliseconds on the host clock.
pub type Millis = u64;

/// Identifies one entry into a phase.
/// Timers remember the epoch that armed them and are ignored under any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Epoch(u32);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

/// One-shot deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    epoch: Epoch,
    deadline: Millis,
}

impl Timer {
    /// Arm a timer that fires `delay` ms after `start`.
    pub fn after(epoch: Epoch, start: Millis, delay: Millis) -> Self {
        Self {
            epoch,
            deadline: start.saturating_add(delay),
        }
    }

    pub fn deadline(&self) -> Millis {
        self.deadline
    }

    /// Whether this timer belongs to `epoch` and its deadline has passed.
    pub fn fires(&self, epoch: Epoch, now: Millis) -> bool {
        self.epoch == epoch && now >= self.deadline
    }
}

/// Periodic poll. The first tick lands one period after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    epoch: Epoch,
    period: Millis,
    next: Millis,
}

impl Interval {
    pub fn every(epoch: Epoch, start: Millis, period: Millis) -> Self {
        let period = period.max(1);
        Self {
            epoch,
            period,
            next: start.saturating_add(period),
        }
    }

    pub fn deadline(&self) -> Millis {
        self.next
    }

    /// Consume the pending tick if it is due under `epoch`.
    /// Returns the tick's scheduled time.
    pub fn tick(&mut self, epoch: Epoch, now: Millis) -> Option<Millis> {
        if self.epoch != epoch || now < self.next {
            return None;
        }
        let at = self.next;
        self.next = self.next.saturating_add(self.period);
        Some(at)
    }
}

/// `elapsed / duration`, clamped to [0, 1].
pub fn progress(start: Millis, now: Millis, duration: Millis) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    (now.saturating_sub(start) as f64 / duration as f64).clamp(0.0, 1.0)
}
