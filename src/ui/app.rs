//! Main TUI application state and logic

use crate::program::Listing;
use crate::snapshot::{Snapshot, Trace};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Stack,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Program,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded execution being viewed
    pub trace: Trace,

    /// Disassembly of the traced program
    pub listing: Listing,

    /// Operand stack capacity the trace was recorded with
    pub stack_capacity: usize,

    /// Index of the displayed snapshot
    pub history_position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub program_scroll: usize,
    pub stack_scroll: usize,

    /// Row of the program cursor (listing index)
    pub cursor: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Create a new app viewing `trace` from its first snapshot
    pub fn new(trace: Trace, stack_capacity: usize) -> Self {
        let listing = trace.program.disassemble();
        App {
            trace,
            listing,
            stack_capacity,
            history_position: 0,
            focused_pane: FocusedPane::Program,
            program_scroll: 0,
            stack_scroll: 0,
            cursor: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(500) {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Snapshot currently on display
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.trace.snapshots.get(self.history_position)
    }

    fn is_at_end(&self) -> bool {
        self.history_position + 1 >= self.trace.snapshots.len()
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

        let (current_pc, stack) = match self.current_snapshot() {
            Some(snapshot) => (snapshot.pc, snapshot.stack.clone()),
            None => (0, Vec::new()),
        };

        // The faulting pc is only marked once the last good state is on screen
        let error_pc = match &self.trace.outcome {
            Err(e) if self.is_at_end() => e.pc(),
            _ => None,
        };

        super::panes::render_program_pane(
            frame,
            columns[0],
            super::panes::ProgramRenderData {
                listing: &self.listing,
                current_pc,
                error_pc,
                cursor: self.cursor,
            },
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        super::panes::render_stack_pane(
            frame,
            columns[1],
            &stack,
            self.stack_capacity,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                message: &self.status_message,
                current_step: self.history_position,
                total_steps: self.trace.snapshots.len(),
                outcome: &self.trace.outcome,
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: already at the start".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: execution finished".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Program => self.cursor = self.cursor.saturating_sub(1),
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Program => {
                    if self.cursor + 1 < self.listing.instructions.len() {
                        self.cursor += 1;
                    }
                }
                FocusedPane::Stack => self.stack_scroll = self.stack_scroll.saturating_add(1),
            },
            KeyCode::Char('g') => {
                self.is_playing = false;
                self.jump_to_cursor();
            }
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now();
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history_position = self.trace.snapshots.len().saturating_sub(1);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history_position = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Move to the next snapshot, returns false at the end of history
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.history_position += 1;
        true
    }

    /// Move to the previous snapshot, returns false at the start of history
    pub fn step_backward(&mut self) -> bool {
        if self.history_position == 0 {
            return false;
        }
        self.history_position -= 1;
        true
    }

    /// Show the state right before the instruction under the cursor runs
    fn jump_to_cursor(&mut self) {
        let Some(&(pc, instruction)) = self.listing.instructions.get(self.cursor) else {
            return;
        };

        match self.trace.snapshots.index_of_pc(pc) {
            Some(index) => {
                self.history_position = index;
                self.status_message = format!("Jumped to {:04} {}", pc, instruction);
            }
            None => {
                self.status_message = format!("{:04} {} was never reached", pc, instruction);
            }
        }
    }
}
