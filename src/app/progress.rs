use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::Color,
    terminal::{Clear, ClearType},
};

use crate::http::ProgressUpdate;

use super::console::{Line, Segment, write_segments};

/// Minimum time between redraws.
const REDRAW_INTERVAL: Duration = Duration::from_millis(100);
const BAR_WIDTH: usize = 30;

/// Redraws a single stderr line from orchestrator progress samples.
pub(crate) struct ProgressLine {
    enabled: bool,
    no_color: bool,
    drawn: bool,
    last_draw: Option<Duration>,
}

impl ProgressLine {
    /// Disabled when `quiet` is set or stderr is not a terminal.
    pub(crate) fn new(quiet: bool, no_color: bool) -> Self {
        Self {
            enabled: !quiet && std::io::stderr().is_terminal(),
            no_color,
            drawn: false,
            last_draw: None,
        }
    }

    pub(crate) fn update(&mut self, update: &ProgressUpdate) {
        if !self.enabled {
            return;
        }
        let due = self
            .last_draw
            .is_none_or(|last| update.elapsed.saturating_sub(last) >= REDRAW_INTERVAL);
        if !due {
            return;
        }
        self.last_draw = Some(update.elapsed);
        let line = build_progress_line(update);
        if self.draw(&line).is_err() {
            self.enabled = false;
        }
    }

    /// Ends the line so later output starts on a fresh row.
    pub(crate) fn finish(&mut self) {
        if !self.drawn {
            return;
        }
        self.drawn = false;
        let mut out = std::io::stderr();
        if out.write_all(b"\n").and_then(|()| out.flush()).is_err() {
            self.enabled = false;
        }
    }

    fn draw(&mut self, line: &[Segment]) -> std::io::Result<()> {
        let mut out = std::io::stderr().lock();
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write_segments(&mut out, line, self.no_color)?;
        out.flush()?;
        self.drawn = true;
        Ok(())
    }
}

/// `[####----] 40/100 (40.00%) | 1.2s` for fixed-count runs and
/// `1.2s | 40 requests | 33.3 req/s` for duration runs.
pub(crate) fn build_progress_line(update: &ProgressUpdate) -> Line {
    let elapsed_text = format_elapsed(update.elapsed);
    match update.total {
        Some(total) => {
            let goal = total.max(1);
            let current = update.current.min(goal);
            let filled = scale(current, goal, BAR_WIDTH as u64);
            let filled = usize::try_from(filled).unwrap_or(BAR_WIDTH).min(BAR_WIDTH);
            let bar = format!(
                "[{}{}]",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH.saturating_sub(filled))
            );
            let percent_x100 = scale(current, goal, 10_000);
            vec![
                Segment::plain(bar),
                Segment::colored(
                    format!(
                        " {}/{} ({}.{:02}%)",
                        update.current,
                        total,
                        percent_x100.checked_div(100).unwrap_or(0),
                        percent_x100.checked_rem(100).unwrap_or(0)
                    ),
                    Color::Cyan,
                ),
                Segment::colored(format!(" | {}", elapsed_text), Color::Yellow),
            ]
        }
        None => {
            let secs = update.elapsed.as_secs_f64();
            let rate = if secs > 0.0 {
                update.current as f64 / secs
            } else {
                0.0
            };
            vec![
                Segment::colored(elapsed_text, Color::Yellow),
                Segment::plain(" | "),
                Segment::colored(format!("{} requests", update.current), Color::Cyan),
                Segment::plain(" | "),
                Segment::colored(format!("{:.1} req/s", rate), Color::Green),
            ]
        }
    }
}

fn scale(current: u64, goal: u64, factor: u64) -> u64 {
    let scaled = u128::from(current)
        .saturating_mul(u128::from(factor))
        .checked_div(u128::from(goal))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn format_elapsed(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis().checked_div(100).unwrap_or(0);
    format!(
        "{}.{}s",
        tenths.checked_div(10).unwrap_or(0),
        tenths.checked_rem(10).unwrap_or(0)
    )
}
