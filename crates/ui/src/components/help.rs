use super::{focused_panel, heading, hint, panel};
use crate::tui::AppState;
use domain::catalog::{CONTACTS, FAQ, QUICK_TIPS, RESOURCES};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut faq = Vec::new();
    for (i, item) in FAQ.iter().enumerate() {
        let selected = i == state.help.selected;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if selected && state.help.expanded { "▼ " } else { "▶ " };
        faq.push(Line::from(Span::styled(format!("{marker}{}", item.question), style)));
        if selected && state.help.expanded {
            faq.push(Line::from(format!("   {}", item.answer)));
        }
        faq.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(faq)
            .wrap(Wrap { trim: false })
            .block(focused_panel("Frequently Asked Questions")),
        columns[0],
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RESOURCES.len() as u16 * 2 + 2),
            Constraint::Length(CONTACTS.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(columns[1]);

    let resources: Vec<Line> = RESOURCES
        .iter()
        .flat_map(|r| {
            [
                Line::from(Span::styled(r.title, heading())),
                Line::from(Span::styled(r.description, hint())),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(resources).block(panel("Help Resources")), side[0]);

    let contacts: Vec<Line> = CONTACTS
        .iter()
        .map(|c| Line::from(vec![Span::styled(format!("{}: ", c.name), heading()), Span::raw(c.detail)]))
        .collect();
    f.render_widget(Paragraph::new(contacts).block(panel("Contact Support")), side[1]);

    let tips: Vec<Line> = QUICK_TIPS.iter().map(|t| Line::from(format!("• {t}"))).collect();
    f.render_widget(
        Paragraph::new(tips).wrap(Wrap { trim: false }).block(panel("Quick Tips")),
        side[2],
    );
}
