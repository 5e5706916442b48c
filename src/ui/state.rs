use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::storage::RunRecord;

/// Which pane the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Details,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Selection and view state for the history browser.
#[derive(Debug, Clone)]
pub struct DashboardState {
    runs: Vec<(String, RunRecord)>,
    selected: usize,
    view: View,
}

impl DashboardState {
    #[must_use]
    pub const fn new(runs: Vec<(String, RunRecord)>) -> Self {
        Self {
            runs,
            selected: 0,
            view: View::List,
        }
    }

    #[must_use]
    pub fn runs(&self) -> &[(String, RunRecord)] {
        &self.runs
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn selected_run(&self) -> Option<&(String, RunRecord)> {
        self.runs.get(self.selected)
    }

    pub const fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let last = self.runs.len().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(last);
    }

    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.runs.len().saturating_sub(1);
    }

    /// Applies one key press. `q` and Ctrl-C always quit; Esc leaves the
    /// detail pane first and quits from the list.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyOutcome::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyOutcome::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => match self.view {
                View::Details => self.view = View::List,
                View::List => {
                    if key.code == KeyCode::Esc {
                        return KeyOutcome::Quit;
                    }
                }
            },
            KeyCode::Enter | KeyCode::Right => {
                if self.selected_run().is_some() {
                    self.view = match self.view {
                        View::List => View::Details,
                        View::Details => View::List,
                    };
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Delete
            | KeyCode::Insert
            | KeyCode::F(_)
            | KeyCode::Char(_)
            | KeyCode::Null
            | KeyCode::CapsLock
            | KeyCode::ScrollLock
            | KeyCode::NumLock
            | KeyCode::PrintScreen
            | KeyCode::Pause
            | KeyCode::Menu
            | KeyCode::KeypadBegin
            | KeyCode::Media(_)
            | KeyCode::Modifier(_) => {}
        }
        KeyOutcome::Continue
    }
}

/// Success percentage of a saved run, 0 when it recorded nothing.
#[must_use]
pub fn success_rate(record: &RunRecord) -> f64 {
    if record.total_requests == 0 {
        return 0.0;
    }
    record.success as f64 / record.total_requests as f64 * 100.0
}
