use super::{focused_panel, heading, hint, panel};
use crate::tui::{AppState, InputMode, InputTarget};
use domain::ConfigField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(ConfigField::ALL.len() as u16 + 2),
            Constraint::Length(5),
        ])
        .split(area);

    let settings = &state.settings;
    let editing = match &state.input_mode {
        InputMode::Editing {
            target: InputTarget::SettingValue,
            buffer,
            ..
        } => Some(buffer.as_str()),
        _ => None,
    };

    let items: Vec<ListItem> = settings
        .draft
        .entries()
        .enumerate()
        .map(|(i, (field, value))| {
            let selected = i == settings.selected;
            let value = match editing {
                Some(buffer) if selected => format!("{buffer}_"),
                _ => value.to_string(),
            };
            let label_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                heading()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<26}", field.label()), label_style),
                Span::raw(value),
            ]))
        })
        .collect();

    let title = if settings.dirty {
        "Endpoint Configuration (unsaved)"
    } else {
        "Endpoint Configuration"
    };
    f.render_widget(List::new(items).block(focused_panel(title)), chunks[0]);

    let connection = match settings.connection {
        Some(true) => Span::styled("Connected", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("Unreachable", Style::default().fg(Color::Red)),
        None => Span::styled("Not tested", hint()),
    };
    let mut lines = vec![
        Line::from(vec![Span::styled("Backend: ", heading()), connection]),
        Line::from(Span::styled(
            "Enter edit  s save  R reset to defaults  t test connection",
            hint(),
        )),
    ];
    for warning in &settings.warnings {
        lines.push(Line::from(Span::styled(
            format!("⚠ {warning}"),
            Style::default().fg(Color::Yellow),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel("Connection")),
        chunks[1],
    );
}
