use super::{
    events::{EventHandler, TUIEvent},
    state::{Action, AppState, InputMode, Section},
};
use crate::components;
use client::{ClientError, ClientResult, FileUpload, HubClient, RequestSlot, ToolRequest};
use common::HubError;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::ConfigRepository;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::future::Future;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{info, warn};

type Backend = CrosstermBackend<Stdout>;

/// Status line text for a failed request
fn describe(err: ClientError) -> String {
    warn!(code = err.error_code(), "Request failed: {}", err);
    HubError::from(err).user_message()
}

pub struct TUIApp {
    terminal: Terminal<Backend>,
    event_handler: EventHandler,
    state: AppState,
    client: HubClient,
    store: Arc<dyn ConfigRepository>,
    runtime: Handle,
    refresh_slot: RequestSlot,
}

impl TUIApp {
    /// Must be called from inside a tokio runtime; background requests are
    /// spawned on it.
    pub fn new(
        client: HubClient,
        store: Arc<dyn ConfigRepository>,
        page_size: usize,
        refresh_interval: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = Handle::try_current()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let event_handler = EventHandler::new(Duration::from_millis(250));
        let state = AppState::new(store.get(), page_size, refresh_interval);

        Ok(TUIApp {
            terminal,
            event_handler,
            state,
            client,
            store,
            runtime,
            refresh_slot: RequestSlot::new(),
        })
    }

    /// Blocks until the user quits. Run it off the async worker threads,
    /// e.g. inside `tokio::task::block_in_place`.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        info!("Dashboard started against {}", self.client.config().base_url);
        let initial = self.state.request_endpoints();
        self.dispatch(initial);

        while !self.state.should_quit {
            let state = &self.state;
            self.terminal.draw(|f| render_ui(f, state))?;

            let event = self.event_handler.next()?;
            if let TUIEvent::Resize(width, height) = event {
                self.terminal.resize(Rect::new(0, 0, width, height))?;
            }
            if let Some(action) = self.state.apply(event) {
                self.dispatch(action);
            }
        }

        self.refresh_slot.cancel();
        self.restore()?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn spawn<F, T>(&self, request: F, into_event: fn(Result<T, String>) -> TUIEvent)
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.event_handler.sender();
        self.runtime.spawn(async move {
            let result = request.await.map_err(describe);
            let _ = sender.send(into_event(result));
        });
    }

    fn dispatch(&mut self, action: Action) {
        let client = self.client.clone();
        match action {
            Action::Quit => self.state.quit(),
            Action::RefreshEndpoints => {
                let slot = self.refresh_slot.clone();
                let sender = self.event_handler.sender();
                self.runtime.spawn(async move {
                    let result = slot.run(async move { client.fetch_endpoints().await }).await;
                    let event = match result {
                        Ok(endpoints) => TUIEvent::EndpointsLoaded(Ok(endpoints)),
                        Err(e) if e.is_superseded() => return,
                        Err(e) => TUIEvent::EndpointsLoaded(Err(describe(e))),
                    };
                    let _ = sender.send(event);
                });
            }
            Action::RefreshPipelines => {
                self.spawn(
                    async move { client.fetch_pipelines().await },
                    TUIEvent::PipelinesLoaded,
                );
            }
            Action::TriggerBuild(app, env) => {
                self.spawn(
                    async move {
                        let reply = client.trigger_build(app, env).await?;
                        Ok::<_, ClientError>(reply.message.unwrap_or_else(|| {
                            format!(
                                "{} build triggered for {}",
                                env.as_str().to_uppercase(),
                                app.display_name()
                            )
                        }))
                    },
                    TUIEvent::BuildTriggered,
                );
            }
            Action::RunTool {
                tool_id,
                prompt,
                input,
            } => {
                let request = ToolRequest::new(tool_id, prompt).with_input(&input);
                self.spawn(
                    async move { Ok::<_, ClientError>(client.invoke_tool(&request).await?.text) },
                    TUIEvent::ToolReplied,
                );
            }
            Action::AnalyzeJson {
                prompt,
                json1,
                json2,
            } => {
                self.spawn(
                    async move { client.analyze_json(&prompt, &json1, &json2).await },
                    TUIEvent::JsonAnalyzed,
                );
            }
            Action::SendChat {
                prompt,
                message,
                history,
            } => {
                self.spawn(
                    async move { client.send_chat(&prompt, &message, &history).await },
                    TUIEvent::ChatReplied,
                );
            }
            Action::FetchJira(story_id) => {
                self.spawn(
                    async move { client.fetch_jira_story(&story_id).await },
                    TUIEvent::JiraLoaded,
                );
            }
            Action::ProcessUrl(url) => {
                self.spawn(
                    async move { client.process_url(&url).await },
                    TUIEvent::UrlLoaded,
                );
            }
            Action::UploadFiles {
                tool_id,
                tool_name,
                prompt,
                paths,
            } => {
                self.spawn(
                    async move {
                        let mut files = Vec::with_capacity(paths.len());
                        for path in &paths {
                            files.push(FileUpload::read(path).await?);
                        }
                        let reply = client
                            .upload_files(&tool_id, &tool_name, &prompt, files)
                            .await?;
                        Ok::<_, ClientError>(reply.text().to_string())
                    },
                    TUIEvent::FilesProcessed,
                );
            }
            Action::Export(target, export) => {
                self.spawn(
                    async move {
                        let ids = client.export_test_cases(target, &export).await?;
                        let created = if ids.is_empty() {
                            "Created successfully".to_string()
                        } else {
                            ids.join(", ")
                        };
                        Ok::<_, ClientError>(format!("Test cases created in {target}: {created}"))
                    },
                    TUIEvent::Exported,
                );
            }
            Action::SaveConfig(config) => match self.store.set(&config) {
                Ok(()) => {
                    self.client.set_config(config);
                    self.refresh_slot.cancel();
                    let next = self.state.config_saved();
                    self.dispatch(next);
                }
                Err(e) => self.state.set_error(format!("Failed to save configuration: {e}")),
            },
            Action::ResetConfig => match self.store.reset() {
                Ok(()) => {
                    let config = self.store.get();
                    self.client.set_config(config.clone());
                    self.refresh_slot.cancel();
                    let next = self.state.config_reset(config);
                    self.dispatch(next);
                }
                Err(e) => self.state.set_error(format!("Failed to reset configuration: {e}")),
            },
            Action::TestConnection(config) => {
                match HubClient::with_timeout(config, self.client.timeout()) {
                    Ok(probe) => self.spawn(
                        async move { probe.test_connection().await },
                        TUIEvent::ConnectionChecked,
                    ),
                    Err(e) => self.state.set_error(describe(e)),
                }
            }
        }
    }
}

impl Drop for TUIApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Draws the whole dashboard for `state`
pub fn render_ui(f: &mut Frame, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(40)])
        .split(f.area());

    render_sidebar(f, columns[0], state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    render_header(f, rows[0], state);
    match state.section {
        Section::Endpoints => components::endpoints::render(f, rows[1], state),
        Section::QaTools => components::tools::render(f, rows[1], state),
        Section::Pipelines => components::pipelines::render(f, rows[1], state),
        Section::Help => components::help::render(f, rows[1], state),
        Section::Settings => components::settings::render(f, rows[1], state),
    }
    render_status_bar(f, rows[2], state);
}

fn render_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let text = format!("{} {}", i + 1, section.title());
            if *section == state.section {
                ListItem::new(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                ListItem::new(Span::raw(text))
            }
        })
        .collect();

    items.push(ListItem::new(""));
    let (label, color) = match state.settings.connection {
        Some(true) => ("● Online", Color::Green),
        Some(false) => ("● Offline", Color::Red),
        None => ("● Unknown", Color::DarkGray),
    };
    items.push(ListItem::new(Span::styled(label, Style::default().fg(color))));

    let sidebar = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "QA Hub",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(sidebar, area);
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            state.section.title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            state.settings.draft.base_url.clone(),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let header = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White));
    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let InputMode::Editing { target, .. } = &state.input_mode {
        Line::from(vec![
            Span::styled(
                format!("Editing {}: ", target.label()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Enter to confirm, Esc to cancel, Alt+Enter for a new line",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else if let Some(ref error) = state.error_message {
        Line::from(vec![
            Span::styled(
                "ERROR: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::raw(state.status_message.clone()),
            Span::raw(" | "),
            Span::styled(
                "Tab/1-5 switch section, q to quit",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::White));
    f.render_widget(status, area);
}
