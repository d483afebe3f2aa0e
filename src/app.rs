use std::time::Instant;

use crate::audio::output::AudioEngine;
use crate::config::Config;
use crate::engine::curriculum;
use crate::morse::timing::MorseTiming;
use crate::session::machine::DrillMachine;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProgressData;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Drill,
    LevelSelect,
}

pub struct App {
    pub screen: AppScreen,
    pub machine: DrillMachine,
    pub audio: AudioEngine,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub resume_level: usize,
    pub picker_selected: usize,
    pub audio_note: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = JsonStore::new().ok();

        let resume_level = if let Some(ref s) = store {
            match s.load_progress() {
                Some(progress) if !progress.needs_reset() => {
                    progress.level.clamp(1, curriculum::level_count())
                }
                // Schema mismatch or parse failure: start over
                _ => 1,
            }
        } else {
            1
        };

        let machine = DrillMachine::new(MorseTiming::from_wpm(config.wpm));
        let audio = AudioEngine::new(config.tone_hz, config.volume, !config.mute);

        Self {
            screen: AppScreen::Drill,
            machine,
            audio,
            theme,
            config,
            store,
            resume_level,
            picker_selected: 0,
            audio_note: None,
            should_quit: false,
        }
    }

    /// First gesture after launch: open the audio device and start the
    /// saved level. Deferred to a key press so the terminal never blocks on
    /// device setup before it can draw.
    pub fn begin(&mut self) {
        self.start_level(self.resume_level);
    }

    pub fn start_level(&mut self, level: usize) {
        self.activate_audio();
        self.machine.select_level(level, &self.audio);
        self.persist_level();
    }

    pub fn advance_level(&mut self) {
        self.machine.advance_level(&self.audio);
        self.persist_level();
    }

    pub fn give_hint(&mut self) {
        self.machine.give_hint(&self.audio);
    }

    pub fn submit_guess(&mut self, ch: char) {
        self.machine.submit_guess(ch, Instant::now());
    }

    pub fn on_tick(&mut self) {
        self.machine.tick(Instant::now(), &self.audio);
    }

    pub fn open_level_select(&mut self) {
        self.picker_selected = self.machine.level().saturating_sub(1);
        self.screen = AppScreen::LevelSelect;
    }

    pub fn close_level_select(&mut self) {
        self.screen = AppScreen::Drill;
    }

    pub fn pick_selected_level(&mut self) {
        self.start_level(self.picker_selected + 1);
        self.screen = AppScreen::Drill;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn activate_audio(&mut self) {
        if let Err(err) = self.audio.activate() {
            if self.audio_note.is_none() {
                self.audio_note = Some(format!("audio unavailable: {err}"));
            }
        }
    }

    fn persist_level(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_progress(&ProgressData::at_level(self.machine.level()));
        }
    }
}
