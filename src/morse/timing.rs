use std::time::Duration;

use crate::morse::alphabet::Element;

/// Element and gap durations for a given speed.
///
/// The dit is the base unit: 60 / (wpm × 50) seconds, the PARIS convention
/// (the calibration word "PARIS" is 50 units long). Everything else is an
/// exact integer multiple of the dit, so the 3:1 dash ratio and the 3/7-unit
/// gaps hold to the nanosecond regardless of wpm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MorseTiming {
    dit: Duration,
}

impl MorseTiming {
    /// wpm must be positive; the config layer clamps it before we get here.
    pub fn from_wpm(wpm: u32) -> Self {
        Self {
            dit: Duration::from_secs_f64(60.0 / (wpm as f64 * 50.0)),
        }
    }

    #[allow(dead_code)]
    pub fn dit(&self) -> Duration {
        self.dit
    }

    #[allow(dead_code)]
    pub fn dash(&self) -> Duration {
        self.dit * 3
    }

    /// Silence between marks inside one symbol.
    pub fn intra_gap(&self) -> Duration {
        self.dit
    }

    /// Silence between letters.
    pub fn letter_gap(&self) -> Duration {
        self.dit * 3
    }

    /// Silence between words.
    pub fn word_gap(&self) -> Duration {
        self.dit * 7
    }

    pub fn element(&self, element: Element) -> Duration {
        self.dit * element.duration_units()
    }
}
