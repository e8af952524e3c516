use super::{focused_panel, heading, hint, panel};
use crate::tui::AppState;
use domain::{BuildApp, BuildEnv, BuildStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

fn build_color(status: &BuildStatus) -> Color {
    match status {
        BuildStatus::Success => Color::Green,
        BuildStatus::Failed => Color::Red,
        BuildStatus::Running => Color::Blue,
        BuildStatus::Other => Color::Gray,
    }
}

fn option_span(label: &'static str, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(
            format!("[{label}]"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), hint())
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let pipelines = &state.pipelines;
    let trigger = vec![
        Line::from(vec![
            Span::styled("App (a): ", heading()),
            option_span("TSDM", pipelines.app == BuildApp::Tsdm),
            option_span("Navigator", pipelines.app == BuildApp::Navigator),
            Span::raw("   "),
            Span::styled("Env (e): ", heading()),
            option_span("QA", pipelines.env == BuildEnv::Qa),
            option_span("PROD", pipelines.env == BuildEnv::Prod),
        ]),
        Line::from(Span::styled(
            format!(
                "b to trigger {} build for {}, r to refresh",
                pipelines.env.as_str().to_uppercase(),
                pipelines.app.display_name()
            ),
            hint(),
        )),
    ];
    f.render_widget(Paragraph::new(trigger).block(panel("Trigger Build")), chunks[0]);

    let Some(snapshot) = &pipelines.snapshot else {
        let text = if pipelines.loading {
            "Loading builds..."
        } else {
            "No build data. Press r to load."
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, hint())).block(focused_panel("Recent Builds")),
            chunks[1].union(chunks[2]),
        );
        return;
    };

    let stats = snapshot.effective_stats();
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let stats_line = Line::from(vec![
        Span::styled("Successful ", hint()),
        Span::styled(
            show(stats.successful_builds.map(|n| n.to_string())),
            Style::default().fg(Color::Green),
        ),
        Span::styled("   Failed ", hint()),
        Span::styled(
            show(stats.failed_builds.map(|n| n.to_string())),
            Style::default().fg(Color::Red),
        ),
        Span::styled("   Avg time ", hint()),
        Span::raw(show(stats.avg_build_time.clone())),
        Span::styled("   Success rate ", hint()),
        Span::raw(show(stats.success_rate.map(|r| format!("{r:.0}%")))),
    ]);
    f.render_widget(Paragraph::new(stats_line).block(panel("Build Statistics")), chunks[1]);

    let rows = snapshot.builds.iter().map(|build| {
        Row::new(vec![
            Span::raw(build.app.clone()),
            Span::raw(build.env.clone()),
            Span::styled(build.status.as_str().to_string(), Style::default().fg(build_color(&build.status))),
            Span::raw(build.time.clone()),
            Span::raw(build.duration.clone()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
        ],
    )
    .header(Row::new(vec!["App", "Env", "Status", "Started", "Duration"]).style(heading()))
    .block(focused_panel("Recent Builds"));
    f.render_widget(table, chunks[2]);
}
