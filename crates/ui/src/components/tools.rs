use super::{focused_panel, heading, hint, panel};
use crate::tui::{AppState, InputMode, InputTarget};
use domain::{ToolIntegration, TOOLS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(area);

    render_catalog(f, columns[0], state);

    let tool = state.tools.current();
    if tool.id == "chatbot" {
        render_chat(f, columns[1], state);
    } else {
        render_workspace(f, columns[1], state);
    }
}

fn render_catalog(f: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = TOOLS
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let style = if i == state.tools.selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(tool.name, style)))
        })
        .collect();
    f.render_widget(List::new(items).block(panel("Tools")), area);
}

/// Value of a field, showing the edit buffer while it is being typed
fn field_text<'a>(state: &'a AppState, target: InputTarget, value: &'a str) -> (&'a str, bool) {
    match &state.input_mode {
        InputMode::Editing {
            target: editing,
            buffer,
            ..
        } if *editing == target => (buffer.as_str(), true),
        _ => (value, false),
    }
}

fn input_block(title: String, active: bool) -> Block<'static> {
    if active {
        focused_panel(title)
    } else {
        panel(title)
    }
}

fn render_workspace(f: &mut Frame, area: Rect, state: &AppState) {
    let tool = state.tools.current();
    let is_json = tool.id == "json-analyzer";

    let mut constraints = vec![Constraint::Length(3), Constraint::Length(4)];
    if is_json {
        constraints.push(Constraint::Length(6));
        constraints.push(Constraint::Length(6));
    } else {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Min(4));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let header = Line::from(vec![
        Span::styled(tool.name, heading()),
        Span::raw("  "),
        Span::styled(tool.description, hint()),
    ]);
    f.render_widget(Paragraph::new(header).block(panel("Tool")), chunks[0]);

    render_context(f, chunks[1], state, tool.integration);

    let (input, active) = field_text(state, InputTarget::ToolInput, &state.tools.input);
    let first_title = if is_json {
        "JSON 1 (i)".to_string()
    } else {
        format!("{} (i)", input_label(tool.id))
    };
    f.render_widget(
        Paragraph::new(input.to_string())
            .wrap(Wrap { trim: false })
            .block(input_block(first_title, active)),
        chunks[2],
    );

    let output_area = if is_json {
        let (second, active) =
            field_text(state, InputTarget::SecondInput, &state.tools.second_input);
        f.render_widget(
            Paragraph::new(second.to_string())
                .wrap(Wrap { trim: false })
                .block(input_block("JSON 2 (o)".to_string(), active)),
            chunks[3],
        );
        chunks[4]
    } else {
        chunks[3]
    };

    if is_json && !state.tools.comparison.is_empty() {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(output_area);
        render_comparison(f, halves[0], state);
        render_output(f, halves[1], state);
    } else {
        render_output(f, output_area, state);
    }
}

fn input_label(tool_id: &str) -> &'static str {
    match tool_id {
        "test-generator" => "Requirements",
        "xpath-generator" => "HTML Content",
        "defect-analyzer" => "Defect Description",
        _ => "Input",
    }
}

fn render_context(f: &mut Frame, area: Rect, state: &AppState, integration: ToolIntegration) {
    let (story_id, editing_story) =
        field_text(state, InputTarget::StoryId, &state.tools.story_id);
    let (page_url, editing_url) = field_text(state, InputTarget::PageUrl, &state.tools.page_url);
    let (file_path, editing_file) = field_text(state, InputTarget::FilePath, "");

    let jira = match &state.tools.jira {
        Some(story) => format!("{}: {}", story.id, story.title),
        None if editing_story => format!("{story_id}_"),
        None => "none (J to load)".to_string(),
    };
    let url = match &state.tools.url_insight {
        Some(insight) if !editing_url => format!("{} {}", insight.url, insight.title),
        _ if editing_url => format!("{page_url}_"),
        _ => "none (u to process)".to_string(),
    };
    let files = if editing_file {
        format!("{file_path}_")
    } else if state.tools.files.is_empty() {
        "none (f to add, F to upload)".to_string()
    } else {
        state.tools.files.join(", ")
    };

    let primary = match integration {
        ToolIntegration::Jira => 0,
        ToolIntegration::Url => 1,
        ToolIntegration::Chat => 2,
    };
    let label = |index: usize, text: &'static str| {
        if index == primary {
            Span::styled(text, heading())
        } else {
            Span::styled(text, hint())
        }
    };

    let lines = vec![
        Line::from(vec![label(0, "Jira  "), Span::raw(jira)]),
        Line::from(vec![label(1, "URL   "), Span::raw(url)]),
        Line::from(vec![label(2, "Files "), Span::raw(files)]),
    ];
    f.render_widget(Paragraph::new(lines).block(panel("Context")), area);
}

fn render_output(f: &mut Frame, area: Rect, state: &AppState) {
    let tool = state.tools.current();
    let text = match (&state.tools.output, state.tools.busy) {
        (_, true) => "Working...".to_string(),
        (Some(output), false) => output.clone(),
        (None, false) => {
            let mut hints = "Enter run  x clear".to_string();
            if tool.id == "test-generator" {
                hints.push_str("  e export to Jira  E export to QTest");
            }
            hints
        }
    };
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(focused_panel("Result")),
        area,
    );
}

fn render_comparison(f: &mut Frame, area: Rect, state: &AppState) {
    let rows = state.tools.comparison.iter().map(|row| {
        let color = if row.is_same() { Color::Green } else { Color::Red };
        Row::new(vec![
            row.field.clone(),
            row.json1_value.clone(),
            row.json2_value.clone(),
            row.comparison.clone(),
            row.issues.clone(),
        ])
        .style(Style::default().fg(color))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Field", "JSON 1", "JSON 2", "Comparison", "Issues"]).style(heading()),
    )
    .block(panel("Comparison"));
    f.render_widget(table, area);
}

fn render_chat(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let mut lines = Vec::new();
    if state.tools.chat.is_empty() {
        lines.push(Line::from(Span::styled(
            "Hello! I'm your QA assistant. Ask me anything about testing.",
            hint(),
        )));
    }
    for turn in state.tools.chat.turns() {
        let speaker_style = if turn.is_user {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", turn.speaker()), speaker_style),
            Span::styled(turn.timestamp.format("%H:%M").to_string(), hint()),
        ]));
        for text in turn.content.lines() {
            lines.push(Line::from(format!("  {text}")));
        }
    }
    if state.tools.busy {
        lines.push(Line::from(Span::styled("QA Bot is typing...", hint())));
    }

    let height = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(focused_panel("QA Chatbot")),
        chunks[0],
    );

    let (message, active) = field_text(state, InputTarget::ToolInput, &state.tools.input);
    let shown = if active {
        format!("{message}_")
    } else if message.is_empty() {
        "Press i to type a message".to_string()
    } else {
        message.to_string()
    };
    f.render_widget(
        Paragraph::new(shown).block(input_block("Message".to_string(), active)),
        chunks[1],
    );
}
