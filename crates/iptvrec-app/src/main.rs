use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use iptvrec_config::{AppConfig, ClockConfig, ClockModeConfig, FieldsConfig};
use iptvrec_core::{
    actions::{self, ActionHandler, CLEARED_MESSAGE},
    bus::EventBus,
    clock::{ClockLabels, ClockUpdater, DisplayMode, TickOutcome},
    event::Event,
    form::{Form, Placeholders},
    keymap::{self, KeyCommand, SCROLL_STEP},
    logging::{self, LogBuffer},
    scheduler::IntervalScheduler,
    state::AppState,
    transcript::Transcript,
};
use iptvrec_ui::window::{render_window, WindowView};

/// Upper bound on how long the loop blocks waiting for input.
const MAX_POLL: Duration = Duration::from_millis(250);

fn display_mode(clock: &ClockConfig) -> DisplayMode {
    match clock.mode {
        ClockModeConfig::Clock => DisplayMode::Clock,
        ClockModeConfig::Countdown => DisplayMode::Countdown {
            threshold_seconds: clock.threshold_seconds,
        },
    }
}

fn placeholders(fields: &FieldsConfig) -> Placeholders {
    Placeholders {
        username: fields.username.clone(),
        password: fields.password.clone(),
        url: fields.url.clone(),
    }
}

fn hms(total: u64) -> String {
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// The window's owned context. Every handler reaches state through `&mut
/// self`; nothing is global.
struct App {
    config: AppConfig,
    state: AppState,
    bus: EventBus,
    scheduler: IntervalScheduler,
    clock: ClockUpdater,
    clock_label: String,
    form: Form,
    transcript: Transcript,
    log_buffer: LogBuffer,
    wall_clock: Box<dyn Fn() -> DateTime<Local>>,
    should_quit: bool,
}

impl App {
    /// Build the window and start its clock. A clock that cannot be scheduled
    /// is a startup failure.
    fn new(config: AppConfig, log_buffer: LogBuffer) -> Result<Self> {
        Self::with_clocks(config, log_buffer, IntervalScheduler::new(), Local::now)
    }

    /// Like [`App::new`], with the tick scheduler and wall-clock source
    /// supplied by the caller.
    fn with_clocks(
        config: AppConfig,
        log_buffer: LogBuffer,
        scheduler: IntervalScheduler,
        wall_clock: impl Fn() -> DateTime<Local> + 'static,
    ) -> Result<Self> {
        let clock = ClockUpdater::new(
            display_mode(&config.clock),
            ClockLabels {
                stopped: config.clock.stopped_label.clone(),
                finished: config.clock.finished_label.clone(),
            },
        );
        let mut app = Self {
            form: Form::new(placeholders(&config.fields)),
            config,
            state: AppState::new(),
            bus: EventBus::new(),
            scheduler,
            clock,
            clock_label: String::new(),
            transcript: Transcript::default(),
            log_buffer,
            wall_clock: Box::new(wall_clock),
            should_quit: false,
        };
        let now = (app.wall_clock)();
        app.clock.start(now, &mut app.scheduler, &mut app.clock_label)?;
        app.state.status_line = "Clock running".into();
        Ok(app)
    }

    /// Move pending log records into the output pane.
    fn sync_logs(&mut self) {
        for entry in logging::drain(&self.log_buffer) {
            self.transcript.push_log(entry);
        }
    }

    /// How long to wait for input before the next timer comes due.
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(MAX_POLL)
            .min(MAX_POLL)
    }

    fn status(&self) -> String {
        match self.clock.remaining_seconds(&(self.wall_clock)()) {
            Some(left) => format!("{} | {} left", self.state.status_line, hms(left)),
            None => self.state.status_line.clone(),
        }
    }

    fn render(&self, f: &mut Frame) {
        let status = self.status();
        render_window(
            f,
            WindowView {
                title: &self.config.window.title,
                subtitle: &self.config.window.header,
                clock_label: &self.clock_label,
                clock_running: self.clock.is_running(),
                status_line: &status,
                form: &self.form,
                transcript: &self.transcript,
            },
        );
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => {
                if let Some(cmd) = keymap::translate(&key, self.form.focus()) {
                    self.apply(cmd);
                }
            }
            Event::Resize { cols, rows } => {
                tracing::debug!(cols, rows, "terminal resized");
            }
            Event::TimerFired { id } => {
                if self.clock.timer_id() != Some(id) {
                    tracing::debug!(timer = %id, "ignoring tick for released timer");
                    return;
                }
                let now = (self.wall_clock)();
                match self.clock.tick(now, &mut self.scheduler, &mut self.clock_label) {
                    TickOutcome::Continue => {}
                    TickOutcome::Break => self.state.status_line = "Clock finished".into(),
                }
            }
            Event::Action(action) => actions::dispatch(self, action),
            Event::StartClock => {
                let now = (self.wall_clock)();
                match self.clock.start(now, &mut self.scheduler, &mut self.clock_label) {
                    Ok(()) => self.state.status_line = "Clock running".into(),
                    Err(err) => tracing::error!(error = %err, "failed to start clock"),
                }
            }
            Event::StopClock => {
                self.clock.stop(&mut self.scheduler, &mut self.clock_label);
                self.state.status_line = "Clock stopped".into();
            }
            Event::Quit => self.should_quit = true,
        }
    }

    fn apply(&mut self, cmd: KeyCommand) {
        match cmd {
            KeyCommand::Action(action) => self.bus.publish(Event::Action(action)),
            KeyCommand::StartClock => self.bus.publish(Event::StartClock),
            KeyCommand::StopClock => self.bus.publish(Event::StopClock),
            KeyCommand::FocusNext => self.form.focus_next(),
            KeyCommand::FocusPrev => self.form.focus_prev(),
            KeyCommand::ScrollUp => self.transcript.scroll_up(SCROLL_STEP),
            KeyCommand::ScrollDown => self.transcript.scroll_down(SCROLL_STEP),
            edit => {
                let Some(field) = self.form.focused_field_mut() else {
                    return;
                };
                match edit {
                    KeyCommand::Insert(c) => field.insert_char(c),
                    KeyCommand::Backspace => field.backspace(),
                    KeyCommand::Delete => field.delete(),
                    KeyCommand::CursorLeft => field.cursor_left(),
                    KeyCommand::CursorRight => field.cursor_right(),
                    KeyCommand::CursorHome => field.cursor_home(),
                    KeyCommand::CursorEnd => field.cursor_end(),
                    _ => {}
                }
            }
        }
    }

    /// Publish timer ticks for every registration that came due.
    fn publish_due_timers(&mut self, now: Instant) {
        for id in self.scheduler.due(now) {
            self.bus.publish(Event::TimerFired { id });
        }
    }

    /// Handle queued events in order. Events raised while handling (key
    /// presses turning into actions) are handled in the same pass.
    fn process_events(&mut self) {
        while let Some(ev) = self.bus.pop() {
            self.handle_event(ev);
        }
    }
}

impl ActionHandler for App {
    fn on_submit(&mut self) {
        let submission = self.form.submission();
        for line in actions::record_lines(&submission) {
            self.transcript.println(line);
        }
        tracing::info!(url = %submission.url, "form recorded");
        self.state.status_line = "Recorded".into();
    }

    fn on_clear(&mut self) {
        self.form.clear();
        self.transcript.println(CLEARED_MESSAGE);
        self.state.status_line = "Cleared".into();
    }

    fn on_exit(&mut self) {
        self.clock.shutdown(&mut self.scheduler);
        tracing::info!(uptime_secs = self.state.uptime().as_secs(), "window closed");
        self.bus.publish(Event::Quit);
    }
}

fn setup_terminal(title: &str) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let log_buffer = logging::init();
    tracing::info!("iptvrec starting up");

    let config = AppConfig::load()?;
    let mut app = App::new(config, log_buffer)?;

    let mut terminal = setup_terminal(&app.config.window.title)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(terminal)?;

    // Action output goes to the real console once the window is gone.
    for line in app.transcript.output() {
        println!("{}", line);
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.sync_logs();

        terminal.draw(|f| app.render(f))?;

        // ── Poll → Publish ──
        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                CEvent::Key(key) => app.bus.publish(Event::Key(key)),
                CEvent::Resize(cols, rows) => app.bus.publish(Event::Resize { cols, rows }),
                _ => {}
            }
        }
        app.publish_due_timers(Instant::now());

        // ── Drain → Handle ──
        app.process_events();
        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use iptvrec_core::actions::Action;
    use iptvrec_core::form::Focus;
    use iptvrec_core::logging::new_log_buffer;

    fn app() -> App {
        App::new(AppConfig::default(), new_log_buffer(16)).unwrap()
    }

    fn key(app: &mut App, code: KeyCode) {
        app.bus.publish(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        app.process_events();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn new_app_starts_clock_with_label() {
        let app = app();
        assert!(app.clock.is_running());
        assert_eq!(app.scheduler.len(), 1);
        assert_eq!(app.clock_label.len(), 8);
    }

    #[test]
    fn record_writes_field_text() {
        let mut app = app();
        type_text(&mut app, "alice");
        key(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        key(&mut app, KeyCode::Tab);
        type_text(&mut app, "http://example.test/a.ts");
        key(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus(), Focus::Record);
        key(&mut app, KeyCode::Enter);
        assert_eq!(
            *app.transcript.output(),
            [
                "Submit Clicked!",
                "  Username: alice",
                "  Password: pw",
                "  Other Info: http://example.test/a.ts",
            ]
        );
    }

    #[test]
    fn clear_empties_fields_and_confirms() {
        let mut app = app();
        type_text(&mut app, "bob");
        actions::dispatch(&mut app, Action::Clear);
        assert!(app.form.username.is_empty());
        assert_eq!(*app.transcript.output(), ["Input fields cleared."]);
    }

    #[test]
    fn exit_releases_clock_and_quits() {
        let mut app = app();
        let id = app.clock.timer_id().unwrap();
        key(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
        assert!(!app.clock.is_running());
        assert!(app.scheduler.is_empty());

        app.bus.publish(Event::TimerFired { id });
        let label = app.clock_label.clone();
        app.process_events();
        assert_eq!(app.clock_label, label);
    }

    #[test]
    fn countdown_finishes_through_event_loop() {
        use chrono::{TimeDelta, TimeZone};
        use std::cell::Cell;
        use std::rc::Rc;

        let mut config = AppConfig::default();
        config.clock.mode = ClockModeConfig::Countdown;
        config.clock.threshold_seconds = 1;

        let base = Instant::now();
        let start = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let wall = Rc::new(Cell::new(start));
        let source = wall.clone();
        let mut app = App::with_clocks(
            config,
            new_log_buffer(16),
            IntervalScheduler::with_clock(move || base),
            move || source.get(),
        )
        .unwrap();
        assert!(app.clock.is_running());

        app.publish_due_timers(base + Duration::from_millis(500));
        assert!(app.bus.is_empty());
        app.process_events();
        assert!(app.clock.is_running());

        wall.set(start + TimeDelta::seconds(1));
        app.publish_due_timers(base + Duration::from_secs(1));
        app.process_events();

        assert_eq!(app.clock_label, "Timer Finished");
        assert_eq!(app.state.status_line, "Clock finished");
        assert!(!app.clock.is_running());
        assert!(app.scheduler.is_empty());

        app.publish_due_timers(base + Duration::from_secs(5));
        assert!(app.bus.is_empty());
    }

    #[test]
    fn stop_and_restart_clock() {
        let mut app = app();
        key(&mut app, KeyCode::F(6));
        assert_eq!(app.clock_label, "Stopped");
        assert!(app.scheduler.is_empty());
        key(&mut app, KeyCode::F(6));
        assert_eq!(app.clock_label, "Stopped");
        key(&mut app, KeyCode::F(5));
        assert!(app.clock.is_running());
        assert_eq!(app.scheduler.len(), 1);
    }

    #[test]
    fn countdown_config_shows_remaining_in_status() {
        let mut config = AppConfig::default();
        config.clock.mode = ClockModeConfig::Countdown;
        config.clock.threshold_seconds = 3600;
        let app = App::new(config, new_log_buffer(16)).unwrap();
        assert!(app.status().contains("left"));
    }

    #[test]
    fn poll_timeout_is_capped() {
        let app = app();
        assert!(app.poll_timeout(Instant::now()) <= MAX_POLL);
    }

    #[test]
    fn hms_formats_durations() {
        assert_eq!(hms(0), "00:00:00");
        assert_eq!(hms(8100), "02:15:00");
    }
}
