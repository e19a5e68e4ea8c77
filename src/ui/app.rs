//! Main TUI application state and logic

use crate::interpreter::engine::{Engine, Step};
use crate::interpreter::errors::RuntimeError;
use crate::ui::panes::{
    self, program::ProgramRenderData, status::StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Delay between two iterations in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(150);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Feed,
    Program,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (feed -> program -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Feed => FocusedPane::Program,
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Feed,
        }
    }
}

/// The main application state
pub struct App<O: Write, T: Write> {
    /// The engine being inspected
    pub engine: Engine<O, T>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Fatal error raised by the engine; no further steps are taken
    pub error: Option<RuntimeError>,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<O: Write, T: Write> App<O, T> {
    pub fn new(engine: Engine<O, T>) -> Self {
        let earlier = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or(Instant::now());
        App {
            engine,
            focused_pane: FocusedPane::Feed,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            error: None,
            is_playing: false,
            last_play_time: earlier,
            last_space_press: earlier,
        }
    }

    /// Hand the engine back once the inspector is closed
    pub fn into_engine(self) -> Engine<O, T> {
        self.engine
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if !self.step_once() {
                    self.is_playing = false;
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        // Left column: Feed (top) | Program (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[0]);

        panes::render_feed_pane(
            frame,
            left_rows[0],
            self.engine.feed(),
            self.focused_pane == FocusedPane::Feed,
        );

        let (pattern, template) = self.engine.last_program();
        panes::render_program_pane(
            frame,
            left_rows[1],
            &ProgramRenderData {
                pattern,
                template,
                report: self.engine.last_report(),
            },
            self.focused_pane == FocusedPane::Program,
        );

        panes::render_output_pane(
            frame,
            columns[1],
            self.engine.output().recent(),
            self.engine.output().written(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                iteration: self.engine.stats().iterations,
                is_playing: self.is_playing,
                is_finished: self.engine.is_finished(),
                has_error: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_once() {
                        break;
                    }
                    stepped += 1;
                }
                if self.error.is_none() && !self.engine.is_finished() {
                    self.status_message = format!("Stepped forward {} iteration(s)", stepped);
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_once();
            }
            KeyCode::Up => {
                if self.focused_pane == FocusedPane::Output {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.focused_pane == FocusedPane::Output {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    self.status_message = if self.is_playing {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                if self.error.is_none() && !self.engine.is_finished() {
                    match self.engine.run() {
                        Ok(stats) => {
                            self.status_message =
                                format!("Ran to the end ({} iterations)", stats.iterations);
                        }
                        Err(e) => self.fail(e),
                    }
                    self.output_scroll = usize::MAX;
                }
            }
            _ => {}
        }
    }

    /// Run one iteration; false when nothing more can run
    fn step_once(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        match self.engine.step() {
            Ok(Step::Continue(report)) => {
                self.status_message = format!("Iteration {}: {}", report.iteration, report.outcome);
                self.output_scroll = usize::MAX;
                true
            }
            Ok(Step::Finished) => {
                self.status_message = "Feed exhausted, streams closed".to_string();
                false
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    fn fail(&mut self, error: RuntimeError) {
        self.status_message = format!("Error: {}", error);
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::EngineConfig;
    use crate::memory::symbol::parse_symbols;
    use crossterm::event::KeyModifiers;

    fn app(text: &str) -> App<Vec<u8>, Vec<u8>> {
        let engine = Engine::new(
            &parse_symbols(text).unwrap(),
            Vec::new(),
            Vec::new(),
            EngineConfig::default(),
        )
        .unwrap();
        App::new(engine)
    }

    fn press(app: &mut App<Vec<u8>, Vec<u8>>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_number_key_steps_n_iterations() {
        let mut app = app(&"IICIIC".repeat(4));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.engine.stats().iterations, 3);
        assert!(!app.engine.is_finished());
    }

    #[test]
    fn test_enter_runs_to_end() {
        let mut app = app(&"IICIIC".repeat(4));
        press(&mut app, KeyCode::Enter);
        assert!(app.engine.is_finished());
        assert_eq!(app.engine.stats().iterations, 4);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = app("");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Program);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Feed);
    }

    #[test]
    fn test_quit() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
