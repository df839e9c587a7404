//! App: terminal init, fixed-rate loop, key edges into [`Input`], events into the overlay.

use crate::Args;
use crate::game::{Game, Input, Phase};
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui::{self, Overlay};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Without key release reporting, fast drop stays held this long after the last press/repeat.
const FAST_DROP_HOLD_MS: u64 = 300;
/// Cap on a single tick's delta so a stalled terminal does not teleport the pair.
const MAX_DELTA_MS: u32 = 100;

pub struct App {
    args: Args,
    game: Game,
    theme: Theme,
    overlay: Overlay,
    paused: bool,
    /// Edges collected since the last tick; `fast_drop` is filled from the held state.
    pending: Input,
    /// Last time fast drop was pressed (or auto-repeated); `None` once released.
    fast_drop_since: Option<Instant>,
    /// The terminal reports key releases, so fast drop needs no timeout.
    release_events: bool,
}

impl App {
    pub fn new(args: Args, game: Game, theme: Theme) -> Self {
        Self {
            args,
            game,
            theme,
            overlay: Overlay::default(),
            paused: false,
            pending: Input::default(),
            fast_drop_since: None,
            release_events: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
                supports_keyboard_enhancement,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        // Release events let fast drop follow the key exactly.
        self.release_events = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore
        if self.release_events {
            let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        }
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick = Duration::from_secs_f64(1.0 / self.args.tick_rate);
        let mut last_tick = Instant::now();
        loop {
            let now = Instant::now();
            let paused = self.paused;
            terminal.draw(|f| {
                ui::draw(
                    f,
                    &self.game.snapshot(),
                    &self.theme,
                    &mut self.overlay,
                    paused,
                    now,
                );
            })?;
            self.overlay.finish_fade();

            let timeout = tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if self.handle_key(key, Instant::now()) {
                            return Ok(());
                        }
                    }
                }
            }

            let elapsed = last_tick.elapsed();
            if elapsed >= tick {
                last_tick = Instant::now();
                let delta_ms = elapsed.as_millis().min(u128::from(MAX_DELTA_MS)) as u32;
                self.step(delta_ms, last_tick);
            }
        }
    }

    /// Advance the simulation by one tick. Paused means no `update` at all.
    fn step(&mut self, delta_ms: u32, now: Instant) {
        if self.paused {
            self.pending = Input::default();
            return;
        }
        self.overlay.tick(delta_ms);

        let mut input = std::mem::take(&mut self.pending);
        input.fast_drop = self.fast_drop_held(now);

        let was_over = self.game.phase() == Phase::GameOver;
        self.game.update(delta_ms, &input);
        if was_over && self.game.phase() != Phase::GameOver {
            self.overlay.reset();
            self.fast_drop_since = None;
        }

        let animate = !self.args.no_animation;
        for event in self.game.take_events() {
            self.overlay.push_event(&event, &self.theme, animate);
        }
    }

    fn fast_drop_held(&self, now: Instant) -> bool {
        self.fast_drop_since.is_some_and(|since| {
            self.release_events
                || now.saturating_duration_since(since) < Duration::from_millis(FAST_DROP_HOLD_MS)
        })
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let action = key_to_action(key);
        match key.kind {
            KeyEventKind::Release => {
                if action == Action::FastDrop {
                    self.fast_drop_since = None;
                }
                return false;
            }
            // Held keys: keep dropping, and let sideways moves auto-shift.
            KeyEventKind::Repeat => {
                if !matches!(
                    action,
                    Action::FastDrop | Action::MoveLeft | Action::MoveRight
                ) {
                    return false;
                }
            }
            KeyEventKind::Press => {}
        }

        if self.paused {
            match action {
                Action::Quit => return true,
                Action::Pause => self.paused = false,
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => return true,
            Action::Pause => {
                self.paused = !matches!(self.game.phase(), Phase::Title | Phase::GameOver);
            }
            Action::MoveLeft => self.pending.move_left = true,
            Action::MoveRight => self.pending.move_right = true,
            Action::RotateCw => self.pending.rotate_cw = true,
            Action::RotateCcw => self.pending.rotate_ccw = true,
            Action::FastDrop => self.fast_drop_since = Some(now),
            Action::Confirm => self.pending.confirm = true,
            Action::None => {}
        }
        false
    }
}
