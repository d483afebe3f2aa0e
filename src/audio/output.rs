use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rodio::{OutputStream, Sink, Source};
use thiserror::Error;

use crate::audio::sink::{GainEvent, ToneSink};

pub const SAMPLE_RATE: u32 = 44_100;

/// Seconds for a full 0-to-1 gain ramp. Short enough to keep dit edges
/// crisp, long enough to avoid clicks.
const GAIN_RAMP_SECS: f32 = 0.002;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio stream error: {0}")]
    Stream(#[from] rodio::StreamError),

    #[error("audio sink error: {0}")]
    Sink(#[from] rodio::PlayError),
}

/// Shared between the UI thread (queues gain changes) and the audio thread
/// (consumes them sample by sample). The frame counter is the clock: each
/// queued change is pinned to a frame index, so tone edges land
/// sample-accurately no matter how the device buffers.
struct ToneSchedule {
    sample_rate: u32,
    frames: AtomicU64,
    events: Mutex<Vec<QueuedGain>>,
}

#[derive(Clone, Copy)]
struct QueuedGain {
    frame: u64,
    gain: f32,
}

impl ToneSchedule {
    fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frames: AtomicU64::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    fn elapsed(&self) -> Duration {
        let frames = self.frames.load(Ordering::Relaxed);
        Duration::from_secs_f64(frames as f64 / self.sample_rate as f64)
    }

    /// Insert in frame order; ties keep arrival order, so a change queued
    /// later for the same instant wins.
    fn push(&self, event: GainEvent) {
        let queued = QueuedGain {
            frame: (event.at.as_secs_f64() * self.sample_rate as f64).round() as u64,
            gain: event.gain,
        };
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        let idx = events.partition_point(|e| e.frame <= queued.frame);
        events.insert(idx, queued);
    }
}

/// Infinite mono sine source gated by the scheduled gain changes.
struct ToneSource {
    schedule: Arc<ToneSchedule>,
    phase: f32,
    phase_step: f32,
    gain: f32,
    target_gain: f32,
    gain_step: f32,
    volume: f32,
}

impl ToneSource {
    fn new(schedule: Arc<ToneSchedule>, tone_hz: f32, volume: f32) -> Self {
        let sample_rate = schedule.sample_rate;
        Self {
            schedule,
            phase: 0.0,
            phase_step: TAU * tone_hz / sample_rate as f32,
            gain: 0.0,
            target_gain: 0.0,
            gain_step: 1.0 / (GAIN_RAMP_SECS * sample_rate as f32),
            volume,
        }
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let frame = self.schedule.frames.fetch_add(1, Ordering::Relaxed);

        // try_lock: on contention the change lands a sample late, which is
        // inaudible; blocking the audio thread is not an option.
        if let Ok(mut events) = self.schedule.events.try_lock() {
            while events.first().is_some_and(|e| e.frame <= frame) {
                self.target_gain = events.remove(0).gain;
            }
        }

        // Short linear ramp between gain targets to avoid clicks at tone
        // edges.
        if self.gain < self.target_gain {
            self.gain = (self.gain + self.gain_step).min(self.target_gain);
        } else if self.gain > self.target_gain {
            self.gain = (self.gain - self.gain_step).max(self.target_gain);
        }

        let sample = self.phase.sin() * self.gain * self.volume;
        self.phase += self.phase_step;
        if self.phase >= TAU {
            self.phase -= TAU;
        }

        Some(sample)
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.schedule.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Lazily-opened audio output. Construction never touches the device; the
/// first presentation activates it, and a missing device degrades to a
/// silent session instead of a failed one.
pub struct AudioEngine {
    schedule: Arc<ToneSchedule>,
    active: Option<ActiveOutput>,
    tone_hz: f32,
    volume: f32,
    enabled: bool,
}

struct ActiveOutput {
    // Dropping the stream kills playback; it lives alongside the sink.
    _stream: OutputStream,
    sink: Sink,
}

impl AudioEngine {
    pub fn new(tone_hz: f32, volume: f32, enabled: bool) -> Self {
        Self {
            schedule: Arc::new(ToneSchedule::new(SAMPLE_RATE)),
            active: None,
            tone_hz,
            volume,
            enabled,
        }
    }

    pub fn activate(&mut self) -> Result<(), AudioError> {
        if !self.enabled || self.active.is_some() {
            return Ok(());
        }
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.append(ToneSource::new(
            Arc::clone(&self.schedule),
            self.tone_hz,
            self.volume,
        ));
        sink.play();
        self.active = Some(ActiveOutput {
            _stream: stream,
            sink,
        });
        Ok(())
    }
}

impl ToneSink for AudioEngine {
    fn now(&self) -> Duration {
        if self.active.is_some() {
            self.schedule.elapsed()
        } else {
            Duration::ZERO
        }
    }

    fn set_gain_at(&self, gain: f32, at: Duration) {
        if self.active.is_none() {
            return;
        }
        self.schedule.push(GainEvent { at, gain });
    }

    fn resume(&self) {
        if let Some(active) = &self.active {
            active.sink.play();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_at(schedule: &ToneSchedule, ms: u64, gain: f32) {
        schedule.push(GainEvent {
            at: Duration::from_millis(ms),
            gain,
        });
    }

    /// Largest absolute sample in the `[from_ms, to_ms)` window.
    fn peak(samples: &[f32], from_ms: usize, to_ms: usize) -> f32 {
        let lo = from_ms * SAMPLE_RATE as usize / 1000;
        let hi = to_ms * SAMPLE_RATE as usize / 1000;
        samples[lo..hi].iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_source_is_infinite_mono_at_fixed_rate() {
        let schedule = Arc::new(ToneSchedule::new(SAMPLE_RATE));
        let source = ToneSource::new(schedule, 600.0, 1.0);

        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), SAMPLE_RATE);
        assert!(source.total_duration().is_none());
        assert!(source.current_frame_len().is_none());
    }

    #[test]
    fn test_source_is_silent_with_nothing_scheduled() {
        let schedule = Arc::new(ToneSchedule::new(SAMPLE_RATE));
        let mut source = ToneSource::new(schedule, 600.0, 1.0);

        let samples: Vec<f32> = source.by_ref().take(4410).collect();
        assert!(samples.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_scheduled_tone_turns_on_and_off() {
        let schedule = Arc::new(ToneSchedule::new(SAMPLE_RATE));
        push_at(&schedule, 0, 1.0);
        push_at(&schedule, 100, 0.0);
        let mut source = ToneSource::new(schedule, 600.0, 1.0);

        let samples: Vec<f32> = source.by_ref().take(SAMPLE_RATE as usize / 5).collect();
        assert!(samples.iter().all(|s| s.is_finite()));
        // Full amplitude inside the tone, dead silence past the off ramp.
        assert!(peak(&samples, 10, 90) > 0.9);
        assert!(peak(&samples, 110, 200) < 1e-6);
    }

    #[test]
    fn test_events_apply_in_time_order_not_push_order() {
        let schedule = Arc::new(ToneSchedule::new(SAMPLE_RATE));
        push_at(&schedule, 100, 0.0);
        push_at(&schedule, 50, 1.0);
        let mut source = ToneSource::new(schedule, 600.0, 1.0);

        let samples: Vec<f32> = source.by_ref().take(SAMPLE_RATE as usize / 5).collect();
        assert!(peak(&samples, 0, 45) < 1e-6);
        assert!(peak(&samples, 55, 95) > 0.9);
        assert!(peak(&samples, 110, 200) < 1e-6);
    }

    #[test]
    fn test_volume_scales_amplitude() {
        let schedule = Arc::new(ToneSchedule::new(SAMPLE_RATE));
        push_at(&schedule, 0, 1.0);
        let mut source = ToneSource::new(schedule, 600.0, 0.25);

        let samples: Vec<f32> = source.by_ref().take(4410).collect();
        let loudest = peak(&samples, 10, 100);
        assert!(loudest <= 0.25 + 1e-6);
        assert!(loudest > 0.2);
    }

    #[test]
    fn test_inactive_engine_is_inert() {
        let engine = AudioEngine::new(600.0, 1.0, true);

        assert_eq!(engine.now(), Duration::ZERO);
        engine.set_gain_at(1.0, Duration::from_millis(50));
        engine.resume();

        let events = engine
            .schedule
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        assert!(events.is_empty(), "no device, nothing queued");
    }

    #[test]
    fn test_disabled_engine_never_activates() {
        let mut engine = AudioEngine::new(600.0, 1.0, false);

        engine.activate().unwrap();

        assert!(engine.active.is_none());
        assert_eq!(engine.now(), Duration::ZERO);
    }
}
