use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, prelude::Backend};
use tracing::debug;

use crate::error::AppResult;
use crate::storage::Store;

use super::render::draw_dashboard;
use super::state::{DashboardState, KeyOutcome};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        cleanup();
    }
}

fn setup_terminal() -> AppResult<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(err.into());
    }

    let backend = CrosstermBackend::new(io::stdout());
    match Terminal::new(backend) {
        Ok(mut terminal) => {
            if let Err(err) = terminal.clear() {
                cleanup();
                return Err(err.into());
            }
            Ok(terminal)
        }
        Err(err) => {
            cleanup();
            Err(err.into())
        }
    }
}

fn cleanup() {
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();
}

/// Draws the current state once.
///
/// # Errors
///
/// Returns an error when the backend fails to draw.
pub fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &DashboardState,
    no_color: bool,
) -> AppResult<()> {
    terminal.draw(|f| draw_dashboard(f, state, no_color))?;
    Ok(())
}

/// Opens the full-screen history browser and blocks until the user quits.
///
/// # Errors
///
/// Returns an error when the history cannot be read or the terminal cannot
/// be driven.
pub fn run_dashboard(store: &Store, no_color: bool) -> AppResult<()> {
    let runs = store.list_history()?;
    debug!("Dashboard loaded {} runs", runs.len());
    let mut state = DashboardState::new(runs);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    loop {
        draw(&mut terminal, &state, no_color)?;
        if !event::poll(EVENT_POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
            && state.handle_key(key) == KeyOutcome::Quit
        {
            return Ok(());
        }
    }
}
