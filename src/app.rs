//! App: terminal init, main loop, frame timing and key handling.

use crate::config::GameConfig;
use crate::input::{Action, key_to_action};
use crate::session::Session;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Target frame time (~60 fps). Input is polled for whatever is left of it.
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct App {
    config: GameConfig,
    theme: Theme,
    session: Session,
    /// Sweep count the current flash was started for.
    rows_seen: u64,
    /// TachyonFX flash after rows are swept.
    sweep_effect: Option<Effect>,
    /// Last time we processed the sweep effect (for delta).
    sweep_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Result<Self> {
        let session = Session::new(&config)?;
        Ok(Self {
            config,
            theme,
            session,
            rows_seen: 0,
            sweep_effect: None,
            sweep_effect_process_time: None,
        })
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.session.move_left(),
            Action::MoveRight => self.session.move_right(),
            Action::SoftDrop => self.session.soft_drop(),
            Action::Rotate => self.session.rotate(),
            Action::Quit | Action::None => {}
        }
    }

    /// Start a flash if rows were swept since the last frame.
    fn note_sweeps(&mut self) {
        let cleared = self.session.rows_cleared();
        if cleared != self.rows_seen {
            self.rows_seen = cleared;
            self.sweep_effect = Some(crate::ui::sweep_flash(&self.theme));
            self.sweep_effect_process_time = None;
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let result = DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        log::info!("exiting after {} cleared row(s)", self.session.rows_cleared());
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            self.session.tick(now.duration_since(last_frame));
            last_frame = now;
            self.note_sweeps();

            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    &self.session,
                    &self.theme,
                    self.config.cell_width,
                    &mut self.sweep_effect,
                    &mut self.sweep_effect_process_time,
                    now,
                );
            })?;

            if self.sweep_effect.as_ref().is_some_and(Effect::done) {
                self.sweep_effect = None;
                self.sweep_effect_process_time = None;
            }

            let timeout = FRAME_DURATION.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        // Only presses; terminals that report repeats/releases would double-move.
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key_to_action(key) {
                            Action::Quit => return Ok(()),
                            action => self.apply_action(action),
                        }
                    }
                }
            }
        }
    }
}
