//! Main TUI application state and logic

use crate::trace::{ScanTrace, StepError};
use crate::ui::panes::{self, OutputLine, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between automatic steps in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(500);

/// How long the event loop waits for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Minimum gap between two space presses
const SPACE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Words,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> tokens -> words)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Words,
            FocusedPane::Words => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded scanning session
    pub trace: ScanTrace,

    /// The scanned input
    pub source_code: String,

    /// Parser output shown in the output pane
    pub output: Vec<OutputLine>,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tokens_scroll: usize,
    pub words_scroll: usize,
    pub output_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,
    pub last_play_time: Instant,
    pub last_space_press: Instant,
}

impl App {
    pub fn new(trace: ScanTrace, source_code: String, output: Vec<OutputLine>) -> Self {
        let status_message = match trace.error() {
            Some(e) => e.to_string(),
            None => String::from("Ready!"),
        };
        let now = Instant::now();
        App {
            trace,
            source_code,
            output,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tokens_scroll: 0,
            words_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(SPACE_DEBOUNCE).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.trace.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            if event::poll(POLL_INTERVAL)? {
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
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tokens (top) | Intern table (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let at_error = self.trace.error().is_some()
            && self.trace.position() + 1 >= self.trace.len();
        let highlighted_line = match self.trace.error() {
            Some(e) if at_error => e.line,
            _ => self.trace.current_line(),
        };

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            highlighted_line,
            at_error,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_output_pane(
            frame,
            left_rows[1],
            &self.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.trace,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        panes::render_words_pane(
            frame,
            right_rows[1],
            &self.trace,
            self.focused_pane == FocusedPane::Words,
            &mut self.words_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.trace.position(),
            self.trace.len(),
            self.trace.error().is_some(),
            self.is_playing,
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
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.trace.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} token(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.trace.step_backward();
                self.report_step(result, "Stepped backward");
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.trace.step_forward();
                self.report_step(result, "Stepped forward");
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_sub(1);
                }
                FocusedPane::Words => {
                    self.words_scroll = self.words_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tokens => {
                    self.tokens_scroll = self.tokens_scroll.saturating_add(1);
                }
                FocusedPane::Words => {
                    self.words_scroll = self.words_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                if self.last_space_press.elapsed() >= SPACE_DEBOUNCE {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.trace.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.trace.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn report_step(&mut self, result: Result<(), StepError>, done: &str) {
        self.status_message = match result {
            Ok(()) => done.to_string(),
            Err(e) => format!("Cannot step: {}", e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_move_trace_cursor() {
        let trace = ScanTrace::record("a b c d");
        let mut app = App::new(trace, "a b c d".to_string(), Vec::new());

        press(&mut app, KeyCode::Right);
        assert_eq!(app.trace.position(), 1);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.trace.position(), 3);
        assert_eq!(app.status_message, "Stepped forward 2 token(s)");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.trace.position(), 0);
        press(&mut app, KeyCode::Left);
        assert!(app.status_message.starts_with("Cannot step"));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(ScanTrace::record(""), String::new(), Vec::new());
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
