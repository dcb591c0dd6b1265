// ABOUTME: Terminal setup and event stream handling.
// ABOUTME: Manages crossterm and ratatui terminal lifecycle.

pub mod event;

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::error::{AppError, Result};
use event::EventStream;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Redraw cadence while idle; drives the circle animation.
const TICK_RATE: Duration = Duration::from_millis(80);

pub struct Tui {
    terminal: Terminal,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()
            .map_err(|e| AppError::Terminal(format!("Failed to set up terminal: {}", e)))?;
        Ok(Self { terminal })
    }

    fn setup_terminal() -> io::Result<Terminal> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn event_stream(&self) -> EventStream {
        EventStream::new(TICK_RATE)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
