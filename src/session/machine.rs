use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::audio::sink::ToneSink;
use crate::engine::curriculum::{self, LevelStep};
use crate::engine::proficiency::ProficiencyTracker;
use crate::morse::alphabet;
use crate::morse::scheduler::ToneScheduler;
use crate::morse::timing::MorseTiming;

const ITEM_POINTS: i64 = 100;
const WORD_MISS_PENALTY: i64 = 10;
const SYMBOL_MISS_PENALTY: i64 = 50;
const PROFICIENCY_STEP: f64 = 34.0;
const LEVEL_DECAY_FACTOR: f64 = 2.0;
const ADVANCE_DELAY: Duration = Duration::from_secs(1);
const INCORRECT_FLASH: Duration = Duration::from_millis(500);
const PLAYBACK_LEAD_IN: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrillPhase {
    /// Nothing started yet; the first key press starts the saved level.
    Idle,
    /// An item has been played and the learner is answering.
    AwaitingInput,
    /// A guess was scored; the next presentation is pending.
    Answered,
    LevelComplete,
    AllLevelsComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

/// State of one level run. Replaced wholesale on every level change, which
/// is also what cancels its pending advance: the single timer a session may
/// hold cannot outlive the session.
struct DrillSession {
    level: usize,
    queue: VecDeque<&'static str>,
    current_item: Option<&'static str>,
    /// Index of the next unmatched character in a multi-symbol item.
    progress: usize,
    /// Characters shown so far for a multi-symbol item. May run one ahead
    /// of `progress` when a hint revealed a letter the learner has not
    /// keyed yet.
    revealed: Vec<char>,
    pending_advance: Option<Instant>,
    incorrect_flash_until: Option<Instant>,
    last_outcome: Option<GuessOutcome>,
}

impl DrillSession {
    fn idle() -> Self {
        Self::new(1, Vec::new())
    }

    fn new(level: usize, items: Vec<&'static str>) -> Self {
        Self {
            level,
            queue: items.into(),
            current_item: None,
            progress: 0,
            revealed: Vec::new(),
            pending_advance: None,
            incorrect_flash_until: None,
            last_outcome: None,
        }
    }
}

/// The drill loop: presents items, scores guesses, drives repetition and
/// level progression.
///
/// Audio goes through a [`ToneSink`] passed into the operations that play
/// something; time comes in as explicit [`Instant`]s so the loop can be
/// driven deterministically. The caller's tick fires the pending advance —
/// nothing in here sleeps.
pub struct DrillMachine {
    phase: DrillPhase,
    session: DrillSession,
    proficiency: ProficiencyTracker,
    scheduler: ToneScheduler,
    points: i64,
    rng: SmallRng,
}

impl DrillMachine {
    pub fn new(timing: MorseTiming) -> Self {
        Self::with_rng(timing, SmallRng::from_entropy())
    }

    pub fn with_rng(timing: MorseTiming, rng: SmallRng) -> Self {
        Self {
            phase: DrillPhase::Idle,
            session: DrillSession::idle(),
            proficiency: ProficiencyTracker::new(),
            scheduler: ToneScheduler::new(timing),
            points: 0,
            rng,
        }
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn level(&self) -> usize {
        self.session.level
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn proficiency(&self) -> &ProficiencyTracker {
        &self.proficiency
    }

    pub fn remaining_items(&self) -> usize {
        self.session.queue.len()
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn current_item(&self) -> Option<&'static str> {
        self.session.current_item
    }

    pub fn level_message(&self) -> &'static str {
        curriculum::unlock_message(self.session.level)
    }

    pub fn hint_available(&self) -> bool {
        self.phase == DrillPhase::AwaitingInput
            && self
                .session
                .current_item
                .is_some_and(|item| item.chars().count() > 1)
    }

    pub fn incorrect_flash_active(&self, now: Instant) -> bool {
        self.session
            .incorrect_flash_until
            .is_some_and(|until| now < until)
    }

    pub fn last_outcome(&self) -> Option<GuessOutcome> {
        self.session.last_outcome
    }

    /// What the item display shows right now.
    pub fn display_text(&self) -> String {
        match self.phase {
            DrillPhase::Idle => String::new(),
            DrillPhase::AwaitingInput => self.item_placeholder(),
            DrillPhase::Answered => match self.session.last_outcome {
                Some(GuessOutcome::Incorrect) => "Incorrect".to_string(),
                _ => "Correct!".to_string(),
            },
            DrillPhase::LevelComplete => "Level complete!".to_string(),
            DrillPhase::AllLevelsComplete => "You win!".to_string(),
        }
    }

    /// Words show one slot per character, revealed as they are matched. A
    /// single symbol shows a lone underscore until first attempted, then
    /// nothing: the answer comes by ear.
    fn item_placeholder(&self) -> String {
        let Some(item) = self.session.current_item else {
            return String::new();
        };
        let len = item.chars().count();
        if len > 1 {
            let mut slots: Vec<String> = self
                .session
                .revealed
                .iter()
                .map(|ch| ch.to_string())
                .collect();
            slots.resize(len, "_".to_string());
            slots.join(" ")
        } else {
            match item.chars().next() {
                Some(sym) if self.proficiency.score(sym) == 0.0 => "_".to_string(),
                _ => String::new(),
            }
        }
    }

    /// Start a level from scratch: fresh session over a shuffled copy of
    /// the level's items, global proficiency decay, then the first
    /// presentation. Out-of-range levels are ignored. An empty level goes
    /// straight to `LevelComplete` without scheduling anything.
    pub fn start_level(&mut self, level: usize, sink: &dyn ToneSink) {
        let Some(items) = curriculum::items_for_level(level) else {
            return;
        };
        let mut pool: Vec<&'static str> = items.to_vec();
        pool.shuffle(&mut self.rng);
        self.session = DrillSession::new(level, pool);
        self.proficiency.decay_all_toward_zero(LEVEL_DECAY_FACTOR);
        self.present_current_item(sink);
    }

    /// Manual level choice from the picker. Every level is directly
    /// selectable; there is no sequential gating.
    pub fn select_level(&mut self, level: usize, sink: &dyn ToneSink) {
        self.start_level(level, sink);
    }

    /// Move on after `LevelComplete`; at the last level this is the only
    /// path into `AllLevelsComplete`.
    pub fn advance_level(&mut self, sink: &dyn ToneSink) {
        if self.phase != DrillPhase::LevelComplete {
            return;
        }
        match curriculum::next_level(self.session.level) {
            LevelStep::Next(level) => self.start_level(level, sink),
            LevelStep::AllComplete => self.phase = DrillPhase::AllLevelsComplete,
        }
    }

    /// Score a guessed symbol. Ignored outside `AwaitingInput` and for
    /// anything outside the supported alphabet.
    pub fn submit_guess(&mut self, guess: char, now: Instant) {
        if self.phase != DrillPhase::AwaitingInput {
            return;
        }
        let guess = guess.to_ascii_lowercase();
        if !alphabet::is_supported(guess) {
            return;
        }
        let Some(item) = self.session.current_item else {
            return;
        };
        if item.chars().count() > 1 {
            self.guess_word_letter(item, guess, now);
        } else {
            self.guess_symbol(item, guess, now);
        }
    }

    /// Reveal the next letter of a word without scoring and play it. The
    /// learner still has to key the revealed letter; match progress does
    /// not move.
    pub fn give_hint(&mut self, sink: &dyn ToneSink) {
        if self.phase != DrillPhase::AwaitingInput {
            return;
        }
        let Some(item) = self.session.current_item else {
            return;
        };
        if item.chars().count() <= 1 {
            return;
        }
        let Some(expected) = item.chars().nth(self.session.progress) else {
            return;
        };
        if self.session.revealed.len() == self.session.progress {
            self.session.revealed.push(expected);
        }
        sink.resume();
        let start = sink.now() + PLAYBACK_LEAD_IN;
        self.scheduler.schedule_char(sink, expected, start);
    }

    /// Drive time-based transitions: expire the incorrect flash and fire a
    /// due pending advance.
    pub fn tick(&mut self, now: Instant, sink: &dyn ToneSink) {
        if let Some(until) = self.session.incorrect_flash_until {
            if now >= until {
                self.session.incorrect_flash_until = None;
            }
        }
        if let Some(due) = self.session.pending_advance {
            if now >= due {
                self.session.pending_advance = None;
                self.present_current_item(sink);
            }
        }
    }

    fn present_current_item(&mut self, sink: &dyn ToneSink) {
        let Some(item) = self.session.queue.front().copied() else {
            self.complete_level();
            return;
        };
        self.session.current_item = Some(item);
        self.session.progress = 0;
        self.session.revealed.clear();
        self.session.last_outcome = None;
        sink.resume();
        let start = sink.now() + PLAYBACK_LEAD_IN;
        if item.chars().count() > 1 {
            self.scheduler.schedule_text(sink, item, start);
        } else if let Some(sym) = item.chars().next() {
            self.scheduler.schedule_char(sink, sym, start);
        }
        self.phase = DrillPhase::AwaitingInput;
    }

    fn complete_level(&mut self) {
        self.session.current_item = None;
        self.session.pending_advance = None;
        self.phase = DrillPhase::LevelComplete;
    }

    fn schedule_advance(&mut self, now: Instant) {
        self.session.pending_advance = Some(now + ADVANCE_DELAY);
        self.phase = DrillPhase::Answered;
    }

    fn guess_word_letter(&mut self, item: &'static str, guess: char, now: Instant) {
        let Some(expected) = item.chars().nth(self.session.progress) else {
            return;
        };
        if guess == expected {
            if self.session.revealed.len() > self.session.progress {
                self.session.revealed[self.session.progress] = guess;
            } else {
                self.session.revealed.push(guess);
            }
            self.session.progress += 1;
            if self.session.progress >= item.chars().count() {
                self.points += ITEM_POINTS;
                self.session.queue.pop_front();
                self.session.progress = 0;
                self.session.revealed.clear();
                self.session.last_outcome = Some(GuessOutcome::Correct);
                // Scheduled even when the queue just emptied: the advance
                // resolves to LevelComplete when it fires, so the
                // "Correct!" feedback gets its moment first.
                self.schedule_advance(now);
            }
        } else {
            self.points -= WORD_MISS_PENALTY;
            self.session.incorrect_flash_until = Some(now + INCORRECT_FLASH);
        }
    }

    fn guess_symbol(&mut self, item: &'static str, guess: char, now: Instant) {
        let Some(expected) = item.chars().next() else {
            return;
        };
        if guess == expected {
            self.points += ITEM_POINTS;
            self.proficiency.adjust(expected, PROFICIENCY_STEP);
            self.session.queue.pop_front();
            if !self.proficiency.is_mastered(expected) {
                self.session.queue.push_back(item);
            }
            self.session.last_outcome = Some(GuessOutcome::Correct);
        } else {
            self.points -= SYMBOL_MISS_PENALTY;
            self.proficiency.adjust(expected, -PROFICIENCY_STEP);
            // The missed item stays at the head of the queue: it replays
            // on the very next presentation.
            self.session.last_outcome = Some(GuessOutcome::Incorrect);
        }
        if self.session.queue.is_empty() {
            self.complete_level();
        } else {
            self.schedule_advance(now);
        }
    }
}
