mod app;
mod audio;
mod config;
mod engine;
mod event;
mod morse;
mod session;
mod store;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use engine::curriculum;
use event::{AppEvent, EventHandler};
use session::machine::DrillPhase;
use ui::components::item_display::ItemDisplay;
use ui::components::level_picker::{self, LevelPicker};
use ui::components::proficiency_grid::ProficiencyGrid;
use ui::layout::DrillLayout;

#[derive(Parser)]
#[command(name = "cwdr", version, about = "Terminal Morse code trainer with adaptive drills")]
struct Cli {
    #[arg(short, long, help = "Character speed in words per minute")]
    wpm: Option<u32>,

    #[arg(short, long, help = "Sidetone frequency in Hz")]
    tone: Option<f32>,

    #[arg(long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Start at a specific level")]
    level: Option<usize>,

    #[arg(long, help = "Disable audio output")]
    mute: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(wpm) = cli.wpm {
        config.wpm = wpm;
    }
    if let Some(tone) = cli.tone {
        config.tone_hz = tone;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.mute {
        config.mute = true;
    }
    config.normalize();

    let mut app = App::new(config);
    if let Some(level) = cli.level {
        app.resume_level = level.clamp(1, curriculum::level_count());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.screen {
        AppScreen::Drill => handle_drill_key(app, key),
        AppScreen::LevelSelect => handle_picker_key(app, key),
    }
}

fn handle_drill_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.open_level_select(),
        _ => {
            // Audio devices want a user gesture behind them; the first
            // keypress doubles as "start".
            if app.machine.phase() == DrillPhase::Idle {
                app.begin();
                return;
            }
            match key.code {
                KeyCode::Char('?') => app.give_hint(),
                KeyCode::Enter => app.advance_level(),
                KeyCode::Char(ch) => app.submit_guess(ch),
                _ => {}
            }
        }
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.close_level_select(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.picker_selected = level_picker::prev_index(app.picker_selected);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.picker_selected = level_picker::next_index(app.picker_selected);
        }
        KeyCode::Enter => app.pick_selected_level(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    render_drill(frame, app);
    if app.screen == AppScreen::LevelSelect {
        render_level_select(frame, app);
    }
}

fn render_drill(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = DrillLayout::new(area);

    let header_info = match app.machine.phase() {
        DrillPhase::Idle => format!(" Level {} | {} wpm", app.resume_level, app.config.wpm),
        _ => format!(
            " Level {} | {} pts | {} wpm | {} left",
            app.machine.level(),
            app.machine.points(),
            app.config.wpm,
            app.machine.remaining_items(),
        ),
    };

    let mut spans = vec![
        Span::styled(
            " cwdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ];
    if let Some(ref note) = app.audio_note {
        spans.push(Span::styled(
            format!(" | {note}"),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let display = ItemDisplay::new(&app.machine, Instant::now(), app.theme);
    frame.render_widget(display, layout.main);

    if let Some(grid_area) = layout.grid {
        let grid = ProficiencyGrid::new(app.machine.proficiency(), app.theme);
        frame.render_widget(grid, grid_area);
    }

    let footer_text = match app.machine.phase() {
        DrillPhase::Idle => " [any key] Begin  [Tab] Levels  [Esc] Quit ",
        DrillPhase::LevelComplete => " [Enter] Next level  [Tab] Levels  [Esc] Quit ",
        DrillPhase::AllLevelsComplete => " [Tab] Levels  [Esc] Quit ",
        _ => {
            if app.machine.hint_available() {
                " [a-z . ,] Answer  [?] Hint  [Tab] Levels  [Esc] Quit "
            } else {
                " [a-z . ,] Answer  [Tab] Levels  [Esc] Quit "
            }
        }
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_level_select(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let popup = ui::layout::centered_rect(40, 70, area);
    let picker = LevelPicker::new(app.picker_selected, app.machine.level(), app.theme);
    frame.render_widget(picker, popup);
}
