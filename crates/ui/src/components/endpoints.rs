use super::{focused_panel, heading, hint, panel};
use crate::tui::AppState;
use domain::{EndpointStatus, MonitoredEndpoint};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn status_color(status: EndpointStatus) -> Color {
    match status {
        EndpointStatus::Up => Color::Green,
        EndpointStatus::Warning => Color::Yellow,
        EndpointStatus::Down => Color::Red,
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_summary(f, chunks[0], state);
    render_filters(f, chunks[1], state);
    render_cards(f, chunks[2], state);
    render_pager(f, chunks[3], state);

    if state.show_details {
        if let Some(endpoint) = state.selected_endpoint() {
            render_details(f, area, endpoint);
        }
    }
}

fn render_summary(f: &mut Frame, area: Rect, state: &AppState) {
    let summary = state.monitor.summary();
    let line = Line::from(vec![
        Span::styled(format!("● Healthy {}", summary.healthy), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(format!("● Warning {}", summary.warning), Style::default().fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(format!("● Down {}", summary.down), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled(
            if state.endpoints_loading { "refreshing..." } else { "" },
            hint(),
        ),
    ]);
    f.render_widget(Paragraph::new(line).block(panel("Status")), area);
}

fn render_filters(f: &mut Frame, area: Rect, state: &AppState) {
    let filter = state.monitor.filter();
    let search = if filter.search.is_empty() {
        Span::styled("Search endpoints...", hint())
    } else {
        Span::raw(filter.search.clone())
    };
    let line = Line::from(vec![
        Span::styled("/ ", heading()),
        search,
        Span::raw("  │  "),
        Span::styled("t ", heading()),
        Span::raw(filter.team.to_string()),
        Span::raw("  │  "),
        Span::styled("s ", heading()),
        Span::raw(filter.status.to_string()),
    ]);
    f.render_widget(Paragraph::new(line).block(panel("Filters")), area);
}

fn render_cards(f: &mut Frame, area: Rect, state: &AppState) {
    let items = state.monitor.page_items();
    if items.is_empty() {
        let text = if state.monitor.endpoints().is_empty() {
            "No endpoints loaded. Press r to refresh."
        } else {
            "No endpoints match the current filters."
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, hint())).block(panel("Endpoints")),
            area,
        );
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, endpoint)| {
            let marker = if i == state.selected_card { "▶ " } else { "  " };
            let name_style = if i == state.selected_card {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{:<8}", endpoint.status.as_str().to_uppercase()),
                    Style::default().fg(status_color(endpoint.status)),
                ),
                Span::styled(format!("{:<28}", endpoint.name), name_style),
                Span::styled(format!("{:<14}", endpoint.team), hint()),
                Span::raw(format!("{:>6}ms  ", endpoint.response_time_ms)),
                Span::styled(endpoint.last_check.clone(), hint()),
            ]))
        })
        .collect();

    f.render_widget(List::new(rows).block(focused_panel("Endpoints")), area);
}

fn render_pager(f: &mut Frame, area: Rect, state: &AppState) {
    let total = state.monitor.total_pages().max(1);
    let text = format!(
        "Page {} of {}  ({} endpoints)  ←/→ page  ↑/↓ select  Enter details  x clear filters",
        state.monitor.current_page(),
        total,
        state.monitor.filtered().len()
    );
    f.render_widget(Paragraph::new(Span::styled(text, hint())), area);
}

fn render_details(f: &mut Frame, area: Rect, endpoint: &MonitoredEndpoint) {
    let popup = centered(area, 60, 50);
    let lines = vec![
        Line::from(Span::styled(endpoint.name.clone(), heading())),
        Line::from(""),
        Line::from(vec![
            Span::raw("Status:        "),
            Span::styled(
                endpoint.status.label(),
                Style::default().fg(status_color(endpoint.status)),
            ),
        ]),
        Line::from(format!("URL:           {}", endpoint.url)),
        Line::from(format!("Team:          {}", endpoint.team)),
        Line::from(format!("Response time: {}ms", endpoint.response_time_ms)),
        Line::from(format!("Last check:    {}", endpoint.last_check)),
        Line::from(""),
        Line::from(Span::styled("Esc to close", hint())),
    ];
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(focused_panel("Endpoint Details")),
        popup,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
