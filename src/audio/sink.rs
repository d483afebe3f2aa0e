use std::time::Duration;

/// One volume change on the output's timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainEvent {
    pub at: Duration,
    pub gain: f32,
}

/// Boundary to the tone output.
///
/// `now` is the output's own monotonic clock (time since the stream
/// started), and `set_gain_at` queues an envelope change at an absolute
/// instant on that clock, possibly well ahead of real time. The scheduler
/// assumes a running clock; callers wake a suspended output with `resume`
/// before scheduling. Outputs start suspended until the first user
/// interaction, so `resume` must be safe to call repeatedly.
pub trait ToneSink {
    fn now(&self) -> Duration;
    fn set_gain_at(&self, gain: f32, at: Duration);
    fn resume(&self);
}

/// Sink for unit tests: records every event and lets the test move the
/// clock by hand.
#[cfg(test)]
pub struct RecordingSink {
    now: std::cell::Cell<Duration>,
    events: std::cell::RefCell<Vec<GainEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self {
            now: std::cell::Cell::new(Duration::ZERO),
            events: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn events(&self) -> Vec<GainEvent> {
        self.events.borrow().clone()
    }

    /// Start times of scheduled tones (gain rising above zero).
    pub fn tone_ons(&self) -> Vec<Duration> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.gain > 0.0)
            .map(|e| e.at)
            .collect()
    }

    pub fn tone_offs(&self) -> Vec<Duration> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.gain == 0.0)
            .map(|e| e.at)
            .collect()
    }
}

#[cfg(test)]
impl ToneSink for RecordingSink {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn set_gain_at(&self, gain: f32, at: Duration) {
        self.events.borrow_mut().push(GainEvent { at, gain });
    }

    fn resume(&self) {}
}
