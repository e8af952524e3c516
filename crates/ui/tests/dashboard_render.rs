use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::{EndpointConfig, EndpointStatus, MonitoredEndpoint, PipelineSnapshot};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use ui::{render_ui, AppState, Section, TUIEvent};

fn screen_text(buffer: &Buffer) -> String {
    let width = buffer.area.width as usize;
    let mut text = String::new();
    for row in buffer.content.chunks(width) {
        for cell in row {
            text.push_str(cell.symbol());
        }
        text.push('\n');
    }
    text
}

fn draw(state: &AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
    terminal.draw(|f| render_ui(f, state)).unwrap();
    screen_text(terminal.backend().buffer())
}

fn endpoints() -> Vec<MonitoredEndpoint> {
    vec![
        MonitoredEndpoint {
            id: "1".into(),
            name: "TSDM API".into(),
            url: "https://api.tsdm.example.com".into(),
            status: EndpointStatus::Up,
            response_time_ms: 245,
            last_check: "2 minutes ago".into(),
            team: "Core".into(),
        },
        MonitoredEndpoint {
            id: "2".into(),
            name: "Database Connector".into(),
            url: "https://db.example.com".into(),
            status: EndpointStatus::Down,
            response_time_ms: 0,
            last_check: "5 minutes ago".into(),
            team: "Data".into(),
        },
    ]
}

fn state() -> AppState {
    AppState::new(EndpointConfig::default(), 8, Duration::from_secs(30))
}

#[test]
fn test_endpoints_panel_shows_cards_and_summary() {
    let mut state = state();
    state.apply(TUIEvent::EndpointsLoaded(Ok(endpoints())));

    let screen = draw(&state);
    assert!(screen.contains("Endpoints Monitor"));
    assert!(screen.contains("TSDM API"));
    assert!(screen.contains("Database Connector"));
    assert!(screen.contains("Healthy 1"));
    assert!(screen.contains("Down 1"));
    assert!(screen.contains("Page 1 of 1"));
}

#[test]
fn test_status_filter_updates_view() {
    let mut state = state();
    state.apply(TUIEvent::EndpointsLoaded(Ok(endpoints())));
    // All -> Healthy -> Warning -> Down
    for _ in 0..3 {
        state.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
    }

    let screen = draw(&state);
    assert!(!screen.contains("TSDM API"));
    assert!(screen.contains("Database Connector"));
    assert!(screen.contains("Healthy 0"));
}

#[test]
fn test_error_goes_to_status_line() {
    let mut state = state();
    state.apply(TUIEvent::EndpointsLoaded(Err(
        "Backend responded with status: 502".into(),
    )));

    let screen = draw(&state);
    assert!(screen.contains("ERROR: Backend responded with status: 502"));
    assert!(screen.contains("No endpoints loaded"));
}

#[test]
fn test_every_section_renders() {
    let mut state = state();
    state.pipelines.snapshot = Some(PipelineSnapshot::default());
    for section in Section::ALL {
        state.section = section;
        let screen = draw(&state);
        assert!(screen.contains(section.title()), "missing {section:?}");
    }
}

#[test]
fn test_settings_lists_every_field() {
    let mut state = state();
    state.section = Section::Settings;
    let screen = draw(&state);
    assert!(screen.contains("Base URL"));
    assert!(screen.contains("/file-processing"));
    assert!(screen.contains("Not tested"));
}

#[test]
fn test_help_expands_answer() {
    let mut state = state();
    state.section = Section::Help;
    state.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    state.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    let screen = draw(&state);
    assert!(screen.contains("How often are endpoints monitored?"));
    assert!(screen.contains("every 30 seconds"));
}
