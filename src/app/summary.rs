use crossterm::style::Color;

use crate::metrics::{ComparisonRow, Stats, Trend, comparison_rows};
use crate::storage::RunRecord;

use super::console::{Line, Segment};

const RULE_WIDTH: usize = 56;
const LABEL_WIDTH: usize = 15;
/// Status codes printed per line in the histogram block.
const STATUS_PER_LINE: usize = 6;

fn heading(text: &str) -> Line {
    vec![Segment::heading(text, Color::Magenta)]
}

fn rule() -> Line {
    vec![Segment::colored("-".repeat(RULE_WIDTH), Color::DarkGrey)]
}

fn row(label: &str, value: Segment) -> Line {
    vec![
        Segment::plain(format!("  {:<width$} ", label, width = LABEL_WIDTH)),
        value,
    ]
}

/// Lines printed after a run: counts, throughput, latency and the status
/// histogram.
pub(crate) fn summary_lines(stats: &Stats) -> Vec<Line> {
    let mut lines = vec![Vec::new(), heading("SUMMARY"), rule()];
    lines.push(row("Requests", Segment::plain(stats.total_requests.to_string())));
    lines.push(row(
        "Successful",
        Segment::colored(stats.success.to_string(), Color::Green),
    ));
    let failed_color = if stats.failed > 0 {
        Color::Red
    } else {
        Color::DarkGrey
    };
    lines.push(row(
        "Failed",
        Segment::colored(stats.failed.to_string(), failed_color),
    ));
    if stats.total_requests > 0 {
        lines.push(row(
            "Success Rate",
            Segment::plain(format!("{:.2}%", stats.success_rate())),
        ));
    }
    lines.push(row(
        "Duration",
        Segment::plain(format!("{:.2}s", stats.total_duration_s)),
    ));
    lines.push(row(
        "Requests/sec",
        Segment::plain(format!("{:.2}/s", stats.rps)),
    ));

    if stats.max_latency > 0.0 {
        lines.push(Vec::new());
        lines.push(heading("LATENCY"));
        lines.push(row(
            "Avg",
            Segment::colored(format!("{:.2}ms", stats.avg_latency), Color::Cyan),
        ));
        lines.push(row(
            "Min / Max",
            Segment::plain(format!(
                "{:.2}ms / {:.2}ms",
                stats.min_latency, stats.max_latency
            )),
        ));
        lines.push(row(
            "P50 / P95 / P99",
            Segment::plain(format!(
                "{:.2}ms / {:.2}ms / {:.2}ms",
                stats.p50_latency, stats.p95_latency, stats.p99_latency
            )),
        ));
    }

    if !stats.status_codes.is_empty() {
        lines.push(Vec::new());
        lines.push(heading("STATUS"));
        let codes: Vec<(u16, u64)> = stats.status_codes.iter().collect();
        for chunk in codes.chunks(STATUS_PER_LINE) {
            let mut line: Line = vec![Segment::plain(" ")];
            for (code, count) in chunk {
                line.push(Segment::plain(" "));
                line.push(Segment::colored(code.to_string(), status_color(*code)));
                line.push(Segment::plain(format!(": {} ", count)));
            }
            lines.push(line);
        }
    }
    lines.push(Vec::new());
    lines
}

const fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Before/after table for a tag.
pub(crate) fn comparison_lines(tag: &str, before: &Stats, after: &Stats) -> Vec<Line> {
    let mut lines = vec![
        Vec::new(),
        heading(&format!("COMPARISON: {}", tag)),
        rule(),
        vec![Segment::plain(format!(
            "  {:<15} {:<12} {:<12} {:<10}",
            "Metric", "Before", "After", "Delta"
        ))],
        rule(),
    ];
    for comparison in comparison_rows(before, after) {
        lines.push(comparison_line(&comparison));
    }
    lines.push(rule());
    lines
}

fn comparison_line(comparison: &ComparisonRow) -> Line {
    let values = Segment::plain(format!(
        "  {:<15} {:<12.2} {:<12.2} ",
        comparison.label, comparison.before, comparison.after
    ));
    let delta = match comparison.trend() {
        Trend::Unchanged => Segment::plain("= 0.0%"),
        Trend::Improved | Trend::Regressed => {
            let arrow = if comparison.after > comparison.before {
                "^"
            } else {
                "v"
            };
            let color = if comparison.trend() == Trend::Improved {
                Color::Green
            } else {
                Color::Red
            };
            Segment::colored(format!("{} {:+.1}%", arrow, comparison.delta_pct()), color)
        }
    };
    vec![values, delta]
}

/// One line per saved run, newest first.
pub(crate) fn history_lines(runs: &[(String, RunRecord)]) -> Vec<Line> {
    let mut lines = vec![heading("HISTORY"), rule()];
    for (name, record) in runs {
        lines.push(vec![
            Segment::colored(format!("  {} ", name), Color::Cyan),
            Segment::plain(format!(
                "{}  {} req  {:.2}ms avg  {:.2}/s",
                record.url, record.total_requests, record.avg_latency, record.rps
            )),
        ]);
    }
    lines
}

pub(crate) fn examples_lines() -> Vec<Line> {
    let examples = [
        ("Quick test", "mach http://localhost:8080"),
        ("Custom load", "mach -n 1000 -c 50 http://example.com"),
        ("Duration based", "mach -d 5m -c 20 http://api.example.com"),
        ("Profile", "mach --profile stress http://example.com"),
        (
            "POST with JSON body",
            "mach -m POST -H 'Content-Type: application/json' -b '{\"id\":1}' http://api.example.com",
        ),
        ("Rate limited ramp", "mach -c 20 -r 5 --ramp-up 10s -d 1m http://example.com"),
        ("Save a baseline", "mach --tag v1 --before http://example.com"),
        (
            "Gate a change",
            "mach --tag v1 --after --threshold 10 http://example.com",
        ),
        ("Show a comparison", "mach --tag v1 --result"),
    ];
    let mut lines = vec![heading("USAGE EXAMPLES")];
    for (index, (title, command)) in examples.iter().enumerate() {
        lines.push(Vec::new());
        lines.push(vec![Segment::plain(format!(
            "  {}. {}:",
            index.saturating_add(1),
            title
        ))]);
        lines.push(vec![Segment::colored(format!("     {}", command), Color::Cyan)]);
    }
    lines
}
