use std::collections::HashMap;

use crate::morse::alphabet;

/// A symbol is mastered once its score reaches this.
pub const MASTERY_THRESHOLD: f64 = 100.0;

/// Per-symbol mastery scores.
///
/// Scores start at 0, move by ±34 per single-symbol guess, and decay
/// globally on every level change. They are not clamped: a score can run
/// past 100 (3 × 34 = 102) or below 0. Consumers read 0 as "never attempted
/// since the last decay" and ≥ 100 as mastered; the display layer clamps
/// for its percentage bars.
pub struct ProficiencyTracker {
    scores: HashMap<char, f64>,
}

impl Default for ProficiencyTracker {
    fn default() -> Self {
        Self {
            scores: alphabet::symbols().map(|sym| (sym, 0.0)).collect(),
        }
    }
}

impl ProficiencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to a symbol's score and return the new score, which the
    /// presentation layer uses to move that symbol's bar. Unknown symbols
    /// are skipped, not an error.
    pub fn adjust(&mut self, symbol: char, delta: f64) -> Option<f64> {
        let score = self.scores.get_mut(&symbol.to_ascii_lowercase())?;
        *score += delta;
        Some(*score)
    }

    pub fn score(&self, symbol: char) -> f64 {
        self.scores
            .get(&symbol.to_ascii_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_mastered(&self, symbol: char) -> bool {
        self.score(symbol) >= MASTERY_THRESHOLD
    }

    /// Discount every symbol on a level change: new = score − (score/3 ×
    /// factor). The reference factor 2 leaves a third of each score, so an
    /// old level's mastery never carries a new level.
    pub fn decay_all_toward_zero(&mut self, factor: f64) {
        for score in self.scores.values_mut() {
            *score -= *score / 3.0 * factor;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.scores.iter().map(|(sym, score)| (*sym, *score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero_for_every_symbol() {
        let tracker = ProficiencyTracker::new();
        assert_eq!(tracker.iter().count(), 28);
        for sym in alphabet::symbols() {
            assert_eq!(tracker.score(sym), 0.0);
        }
    }

    #[test]
    fn test_three_correct_guesses_master_a_symbol() {
        let mut tracker = ProficiencyTracker::new();
        tracker.adjust('e', 34.0);
        assert!(!tracker.is_mastered('e'));
        tracker.adjust('e', 34.0);
        assert!(!tracker.is_mastered('e'));
        tracker.adjust('e', 34.0);
        assert!(tracker.score('e') >= MASTERY_THRESHOLD);
        assert!(tracker.is_mastered('e'));
    }

    #[test]
    fn test_adjust_returns_new_score() {
        let mut tracker = ProficiencyTracker::new();
        assert_eq!(tracker.adjust('t', 34.0), Some(34.0));
        assert_eq!(tracker.adjust('t', -34.0), Some(0.0));
    }

    #[test]
    fn test_adjust_unknown_symbol_is_skipped() {
        let mut tracker = ProficiencyTracker::new();
        assert_eq!(tracker.adjust('#', 34.0), None);
        assert_eq!(tracker.score('#'), 0.0);
    }

    #[test]
    fn test_adjust_is_case_insensitive() {
        let mut tracker = ProficiencyTracker::new();
        tracker.adjust('E', 34.0);
        assert_eq!(tracker.score('e'), 34.0);
    }

    #[test]
    fn test_decay_leaves_a_third_at_reference_factor() {
        let mut tracker = ProficiencyTracker::new();
        tracker.adjust('e', 102.0);
        tracker.adjust('t', 34.0);
        tracker.decay_all_toward_zero(2.0);
        assert!((tracker.score('e') - 34.0).abs() < 1e-9);
        assert!((tracker.score('t') - 34.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_decay_touches_every_symbol() {
        let mut tracker = ProficiencyTracker::new();
        for sym in alphabet::symbols() {
            tracker.adjust(sym, 90.0);
        }
        tracker.decay_all_toward_zero(2.0);
        for sym in alphabet::symbols() {
            assert!((tracker.score(sym) - 30.0).abs() < 1e-9, "symbol {sym}");
        }
    }

    #[test]
    fn test_decay_keeps_zero_at_zero() {
        let mut tracker = ProficiencyTracker::new();
        tracker.decay_all_toward_zero(2.0);
        assert_eq!(tracker.score('q'), 0.0);
    }
}
