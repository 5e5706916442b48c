use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::{Backend, Frame},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::storage::RunRecord;

use super::state::{DashboardState, View, success_rate};
use super::theme::{
    ACCENT_RGB, FOOTER_HEIGHT, HEADER_HEIGHT, UI_MARGIN, background_style, border_style,
    highlight_style, muted_style, rgb, style_color, success_style,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(super) fn draw_dashboard<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    no_color: bool,
) {
    let size = f.size();
    f.render_widget(Block::default().style(background_style(no_color)), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(UI_MARGIN)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    let (header, body, footer) = match chunks.as_ref() {
        [a, b, c] => (*a, *b, *c),
        _ => return,
    };

    render_header(f, state, no_color, header);
    if state.runs().is_empty() {
        render_empty(f, no_color, body);
    } else {
        match state.view() {
            View::List => render_list(f, state, no_color, body),
            View::Details => render_details(f, state, no_color, body),
        }
    }
    render_footer(f, state, no_color, footer);
}

fn panel(title: &str, no_color: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(no_color))
        .title(Span::styled(
            format!(" {} ", title),
            style_color(no_color, rgb(ACCENT_RGB)),
        ))
}

fn render_header<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    no_color: bool,
    area: Rect,
) {
    let title = Line::from(vec![
        Span::styled(
            format!("mach v{}", env!("CARGO_PKG_VERSION")),
            style_color(no_color, rgb(ACCENT_RGB)),
        ),
        Span::raw(" | "),
        Span::raw(format!("{} saved runs", state.runs().len())),
    ]);
    let header = Paragraph::new(title).block(panel("History", no_color));
    f.render_widget(header, area);
}

fn render_empty<B: Backend>(f: &mut Frame<'_, B>, no_color: bool, area: Rect) {
    let message = Paragraph::new(vec![
        Line::from("No saved runs yet."),
        Line::from(Span::styled(
            "Run `mach <URL>` to record one.",
            muted_style(no_color),
        )),
    ])
    .block(panel("Runs", no_color))
    .wrap(Wrap { trim: false });
    f.render_widget(message, area);
}

fn render_list<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    no_color: bool,
    area: Rect,
) {
    let items: Vec<ListItem<'_>> = state
        .runs()
        .iter()
        .map(|(_, record)| ListItem::new(run_row(record, no_color)))
        .collect();
    let list = List::new(items)
        .block(panel("Runs", no_color))
        .highlight_style(highlight_style(no_color))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(state.selected()));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn run_row(record: &RunRecord, no_color: bool) -> Line<'static> {
    let rate = success_rate(record);
    Line::from(vec![
        Span::styled(
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            muted_style(no_color),
        ),
        Span::raw("  "),
        Span::raw(record.url.clone()),
        Span::raw(format!(
            "  {} req  {:.2}ms avg  {:.2}/s  ",
            record.total_requests, record.avg_latency, record.rps
        )),
        Span::styled(format!("{:.1}%", rate), success_style(no_color, rate)),
    ])
}

fn render_details<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    no_color: bool,
    area: Rect,
) {
    let Some((name, record)) = state.selected_run() else {
        render_empty(f, no_color, area);
        return;
    };
    let rate = success_rate(record);
    let duration = record
        .duration_s
        .map_or_else(|| "-".to_owned(), |secs| format!("{:.2}s", secs));
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), muted_style(no_color)),
            Span::raw(value),
        ])
    };
    let lines = vec![
        field("Run", name.clone()),
        field(
            "Timestamp",
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ),
        field("URL", record.url.clone()),
        Line::from(""),
        field("Total Requests", record.total_requests.to_string()),
        field("Successful", record.success.to_string()),
        field("Failed", record.failed.to_string()),
        Line::from(vec![
            Span::styled(format!("{:<16}", "Success Rate"), muted_style(no_color)),
            Span::styled(format!("{:.2}%", rate), success_style(no_color, rate)),
        ]),
        field("Avg Latency", format!("{:.2}ms", record.avg_latency)),
        field("Requests/sec", format!("{:.2}", record.rps)),
        field("Duration", duration),
    ];
    let details = Paragraph::new(lines)
        .block(panel("Run Details", no_color))
        .wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn render_footer<B: Backend>(
    f: &mut Frame<'_, B>,
    state: &DashboardState,
    no_color: bool,
    area: Rect,
) {
    let hint = match state.view() {
        View::List => "Up/Down move | Enter details | q/Esc quit",
        View::Details => "Up/Down move | Esc back | q quit",
    };
    let footer = Paragraph::new(Line::from(Span::styled(hint, muted_style(no_color))));
    f.render_widget(footer, area);
}
