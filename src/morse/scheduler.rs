use std::time::Duration;

use crate::audio::sink::ToneSink;
use crate::morse::alphabet;
use crate::morse::timing::MorseTiming;

/// Turns symbol codes and free text into tone envelope events at absolute
/// times on a [`ToneSink`]'s clock.
///
/// Nothing here blocks or tracks playback: each call walks a cursor forward
/// from the caller's start time, emits gain on/off pairs, and returns where
/// the cursor ended. The silence after the last mark of a symbol is not
/// scheduled here — it is absorbed into the gap the caller puts before the
/// next symbol.
pub struct ToneScheduler {
    timing: MorseTiming,
}

impl ToneScheduler {
    pub fn new(timing: MorseTiming) -> Self {
        Self { timing }
    }

    #[allow(dead_code)]
    pub fn timing(&self) -> &MorseTiming {
        &self.timing
    }

    /// Audible length of a code: mark durations plus one intra-symbol gap
    /// per adjacent pair (n marks, n−1 gaps). Zero means "not playable" —
    /// empty and unknown codes are not errors.
    pub fn code_duration(&self, code: &str) -> Duration {
        let mut total = Duration::ZERO;
        let mut marks = 0u32;
        for element in alphabet::elements_of(code) {
            total += self.timing.element(element);
            marks += 1;
        }
        if marks > 1 {
            total += self.timing.intra_gap() * (marks - 1);
        }
        total
    }

    /// Schedule one code starting at `start`. Returns the instant the last
    /// tone ends (`start` itself when the code has no playable marks).
    pub fn schedule_code(&self, sink: &dyn ToneSink, code: &str, start: Duration) -> Duration {
        let mut cursor = start;
        for element in alphabet::elements_of(code) {
            let mark = self.timing.element(element);
            sink.set_gain_at(1.0, cursor);
            sink.set_gain_at(0.0, cursor + mark);
            cursor += mark + self.timing.intra_gap();
        }
        start + self.code_duration(code)
    }

    /// Schedule a single character; unsupported characters are skipped.
    pub fn schedule_char(&self, sink: &dyn ToneSink, ch: char, start: Duration) -> Duration {
        match alphabet::code_for(ch) {
            Some(code) => self.schedule_code(sink, code, start),
            None => start,
        }
    }

    /// Schedule free text, case-insensitively. A space widens the pause to
    /// a word gap: the letter gap was already appended after the previous
    /// letter, so the cursor only moves by the difference. Unsupported
    /// characters are skipped without advancing. Returns the final cursor
    /// (which includes a trailing letter gap after the last letter).
    pub fn schedule_text(&self, sink: &dyn ToneSink, text: &str, start: Duration) -> Duration {
        let mut cursor = start;
        for ch in text.chars() {
            if ch == ' ' {
                cursor += self.timing.word_gap() - self.timing.letter_gap();
            } else if let Some(code) = alphabet::code_for(ch) {
                self.schedule_code(sink, code, cursor);
                cursor += self.code_duration(code) + self.timing.letter_gap();
            }
        }
        cursor
    }
}
