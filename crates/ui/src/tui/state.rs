use super::events::{should_quit, TUIEvent};
use client::{ExportTarget, TestCaseExport};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use domain::catalog::FAQ;
use domain::{
    compose_prompt, json_analyzer_input, BuildApp, BuildEnv, ChatTranscript, ChatTurn,
    ComparisonRow, ConfigField, DomainError, EndpointConfig, JiraStory, MonitorView,
    PipelineSnapshot, PromptContext, StatusFilter, TeamFilter, ToolDescriptor, UrlInsight, TOOLS,
};
use infrastructure::EndpointConfigValidator;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Endpoints,
    QaTools,
    Pipelines,
    Help,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Endpoints,
        Section::QaTools,
        Section::Pipelines,
        Section::Help,
        Section::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Endpoints => "Endpoints Monitor",
            Section::QaTools => "QA AI Tools",
            Section::Pipelines => "QA Build Pipelines",
            Section::Help => "Help",
            Section::Settings => "Settings",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Section {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Section {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text field currently receiving keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Search,
    ToolInput,
    SecondInput,
    StoryId,
    PageUrl,
    FilePath,
    SettingValue,
}

impl InputTarget {
    pub fn label(&self) -> &'static str {
        match self {
            InputTarget::Search => "Search",
            InputTarget::ToolInput => "Input",
            InputTarget::SecondInput => "JSON 2",
            InputTarget::StoryId => "Jira Story ID",
            InputTarget::PageUrl => "URL",
            InputTarget::FilePath => "File path",
            InputTarget::SettingValue => "Value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing {
        target: InputTarget,
        buffer: String,
        original: String,
    },
}

/// Work the app performs outside of the state: network calls and storage
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    RefreshEndpoints,
    RefreshPipelines,
    TriggerBuild(BuildApp, BuildEnv),
    RunTool {
        tool_id: String,
        prompt: String,
        input: String,
    },
    AnalyzeJson {
        prompt: String,
        json1: String,
        json2: String,
    },
    SendChat {
        prompt: String,
        message: String,
        history: Vec<ChatTurn>,
    },
    FetchJira(String),
    ProcessUrl(String),
    UploadFiles {
        tool_id: String,
        tool_name: String,
        prompt: String,
        paths: Vec<String>,
    },
    Export(ExportTarget, TestCaseExport),
    SaveConfig(EndpointConfig),
    ResetConfig,
    TestConnection(EndpointConfig),
}

#[derive(Debug, Default)]
pub struct ToolsState {
    pub selected: usize,
    pub input: String,
    /// Second document for the JSON Analyzer
    pub second_input: String,
    pub story_id: String,
    pub jira: Option<JiraStory>,
    pub page_url: String,
    pub url_insight: Option<UrlInsight>,
    pub files: Vec<String>,
    pub output: Option<String>,
    pub comparison: Vec<ComparisonRow>,
    pub chat: ChatTranscript,
    pub busy: bool,
}

impl ToolsState {
    pub fn current(&self) -> &'static ToolDescriptor {
        &TOOLS[self.selected.min(TOOLS.len() - 1)]
    }

    fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        let chat = std::mem::take(&mut self.chat);
        *self = ToolsState {
            selected: index,
            chat,
            ..ToolsState::default()
        };
    }

    fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.clone())
            })
            .collect()
    }

    fn prompt_for(&self, input: &str) -> String {
        let mut context = PromptContext::with_input(input).files(self.file_names());
        context.jira = self.jira.clone();
        context.url = self.url_insight.clone();
        compose_prompt(self.current().id, &context).unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct PipelinesState {
    pub snapshot: Option<PipelineSnapshot>,
    pub app: BuildApp,
    pub env: BuildEnv,
    pub loading: bool,
    pub last_message: Option<String>,
}

impl Default for PipelinesState {
    fn default() -> Self {
        Self {
            snapshot: None,
            app: BuildApp::Tsdm,
            env: BuildEnv::Qa,
            loading: false,
            last_message: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct HelpState {
    pub selected: usize,
    pub expanded: bool,
}

#[derive(Debug)]
pub struct SettingsState {
    /// Unsaved edits; saved with `s`
    pub draft: EndpointConfig,
    pub selected: usize,
    pub dirty: bool,
    pub warnings: Vec<String>,
    /// Result of the last connection test
    pub connection: Option<bool>,
}

impl SettingsState {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            draft: config,
            selected: 0,
            dirty: false,
            warnings: Vec::new(),
            connection: None,
        }
    }

    pub fn selected_field(&self) -> ConfigField {
        ConfigField::ALL[self.selected.min(ConfigField::ALL.len() - 1)]
    }
}

pub struct AppState {
    pub section: Section,
    pub input_mode: InputMode,
    pub monitor: MonitorView,
    /// Index into the current page
    pub selected_card: usize,
    pub show_details: bool,
    pub endpoints_loading: bool,
    pub last_refresh: Option<Instant>,
    pub refresh_interval: Duration,
    pub tools: ToolsState,
    pub pipelines: PipelinesState,
    pub help: HelpState,
    pub settings: SettingsState,
    pub status_message: String,
    pub error_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: EndpointConfig, page_size: usize, refresh_interval: Duration) -> Self {
        AppState {
            section: Section::Endpoints,
            input_mode: InputMode::Normal,
            monitor: MonitorView::new(page_size),
            selected_card: 0,
            show_details: false,
            endpoints_loading: false,
            last_refresh: None,
            refresh_interval,
            tools: ToolsState::default(),
            pipelines: PipelinesState::default(),
            help: HelpState::default(),
            settings: SettingsState::new(config),
            status_message: "Welcome to QA Hub. Tab switches sections, q quits.".to_string(),
            error_message: None,
            should_quit: false,
        }
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.error_message = None;
        self.status_message = message.into();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.input_mode, InputMode::Editing { .. })
    }

    pub fn select_section(&mut self, section: Section) -> Option<Action> {
        self.section = section;
        self.clear_error();
        match section {
            Section::Pipelines if self.pipelines.snapshot.is_none() && !self.pipelines.loading => {
                self.pipelines.loading = true;
                Some(Action::RefreshPipelines)
            }
            _ => None,
        }
    }

    /// Marks the list as loading and returns the refresh request
    pub fn request_endpoints(&mut self) -> Action {
        self.endpoints_loading = true;
        Action::RefreshEndpoints
    }

    /// Auto-refresh of the monitor once the interval has passed
    pub fn on_tick(&mut self, now: Instant) -> Option<Action> {
        if self.endpoints_loading || self.refresh_interval.is_zero() {
            return None;
        }
        let due = self
            .last_refresh
            .map_or(true, |at| now.duration_since(at) >= self.refresh_interval);
        due.then(|| self.request_endpoints())
    }

    pub fn apply(&mut self, event: TUIEvent) -> Option<Action> {
        match event {
            TUIEvent::Key(key) => self.handle_key(key),
            TUIEvent::Tick => self.on_tick(Instant::now()),
            TUIEvent::Resize(..) => None,
            TUIEvent::EndpointsLoaded(result) => {
                self.endpoints_loading = false;
                self.last_refresh = Some(Instant::now());
                match result {
                    Ok(endpoints) => {
                        let count = endpoints.len();
                        self.monitor.replace_endpoints(endpoints);
                        self.clamp_card();
                        self.set_status(format!("Loaded {count} endpoints"));
                    }
                    Err(message) => {
                        self.monitor.replace_endpoints(Vec::new());
                        self.clamp_card();
                        self.set_error(message);
                    }
                }
                None
            }
            TUIEvent::PipelinesLoaded(result) => {
                self.pipelines.loading = false;
                match result {
                    Ok(snapshot) => {
                        self.set_status(format!("Loaded {} builds", snapshot.builds.len()));
                        self.pipelines.snapshot = Some(snapshot);
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::BuildTriggered(result) => match result {
                Ok(message) => {
                    self.pipelines.last_message = Some(message.clone());
                    self.set_status(message);
                    self.pipelines.loading = true;
                    Some(Action::RefreshPipelines)
                }
                Err(message) => {
                    self.set_error(message);
                    None
                }
            },
            TUIEvent::ToolReplied(result) => {
                self.tools.busy = false;
                match result {
                    Ok(text) => {
                        self.tools.output = Some(text);
                        self.set_status(format!("{} finished", self.tools.current().name));
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::JsonAnalyzed(result) => {
                self.tools.busy = false;
                match result {
                    Ok(analysis) => {
                        let differences = analysis.rows.iter().filter(|r| !r.is_same()).count();
                        self.tools.output = Some(analysis.text);
                        self.tools.comparison = analysis.rows;
                        self.set_status(format!("Analysis complete: {differences} differing fields"));
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::ChatReplied(result) => {
                self.tools.busy = false;
                match result {
                    Ok(text) => {
                        self.tools.chat.push_bot(text);
                        self.set_status("QA Bot replied");
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::JiraLoaded(result) => {
                match result {
                    Ok(story) => {
                        self.set_status(format!("Loaded Jira story {}", story.id));
                        self.tools.jira = Some(story);
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::UrlLoaded(result) => {
                match result {
                    Ok(insight) => {
                        self.set_status(format!("Processed {}", insight.url));
                        self.tools.url_insight = Some(insight);
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::FilesProcessed(result) => {
                self.tools.busy = false;
                match result {
                    Ok(message) => {
                        self.tools.files.clear();
                        self.set_status(message);
                    }
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::Exported(result) => {
                match result {
                    Ok(message) => self.set_status(message),
                    Err(message) => self.set_error(message),
                }
                None
            }
            TUIEvent::ConnectionChecked(result) => {
                match result {
                    Ok(()) => {
                        self.settings.connection = Some(true);
                        self.set_status("Successfully connected to backend");
                    }
                    Err(message) => {
                        self.settings.connection = Some(false);
                        self.set_error(message);
                    }
                }
                None
            }
            TUIEvent::Error(message) => {
                self.set_error(message);
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if should_quit(&key, self.is_editing()) {
            return Some(Action::Quit);
        }
        if self.is_editing() {
            return self.handle_editing_key(key);
        }

        match key.code {
            KeyCode::Tab => return self.select_section(self.section.next()),
            KeyCode::BackTab => return self.select_section(self.section.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                return self.select_section(Section::ALL[index]);
            }
            _ => {}
        }

        match self.section {
            Section::Endpoints => self.handle_endpoints_key(key),
            Section::QaTools => self.handle_tools_key(key),
            Section::Pipelines => self.handle_pipelines_key(key),
            Section::Help => self.handle_help_key(key),
            Section::Settings => self.handle_settings_key(key),
        }
    }

    fn begin_edit(&mut self, target: InputTarget) {
        let current = match target {
            InputTarget::Search => self.monitor.filter().search.clone(),
            InputTarget::ToolInput => self.tools.input.clone(),
            InputTarget::SecondInput => self.tools.second_input.clone(),
            InputTarget::StoryId => self.tools.story_id.clone(),
            InputTarget::PageUrl => self.tools.page_url.clone(),
            InputTarget::FilePath => String::new(),
            InputTarget::SettingValue => self
                .settings
                .draft
                .get(self.settings.selected_field())
                .to_string(),
        };
        self.input_mode = InputMode::Editing {
            target,
            buffer: current.clone(),
            original: current,
        };
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        let InputMode::Editing {
            target,
            mut buffer,
            original,
        } = std::mem::replace(&mut self.input_mode, InputMode::Normal)
        else {
            return None;
        };

        match key.code {
            KeyCode::Esc => {
                if target == InputTarget::Search {
                    self.set_search(original);
                }
                return None;
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => buffer.push('\n'),
            KeyCode::Enter => return self.commit_edit(target, buffer),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }

        if target == InputTarget::Search {
            self.set_search(buffer.clone());
        }
        self.input_mode = InputMode::Editing {
            target,
            buffer,
            original,
        };
        None
    }

    fn commit_edit(&mut self, target: InputTarget, value: String) -> Option<Action> {
        match target {
            InputTarget::Search => {
                self.set_search(value);
                None
            }
            InputTarget::ToolInput => {
                self.tools.input = value;
                if self.tools.current().id == "chatbot" {
                    self.run_current_tool()
                } else {
                    None
                }
            }
            InputTarget::SecondInput => {
                self.tools.second_input = value;
                None
            }
            InputTarget::StoryId => {
                self.tools.story_id = value.trim().to_string();
                if self.tools.story_id.is_empty() {
                    self.set_error(DomainError::EmptyInput("Story ID".into()).to_string());
                    return None;
                }
                self.set_status(format!("Fetching Jira story {}...", self.tools.story_id));
                Some(Action::FetchJira(self.tools.story_id.clone()))
            }
            InputTarget::PageUrl => {
                self.tools.page_url = value.trim().to_string();
                if self.tools.page_url.is_empty() {
                    self.set_error(DomainError::EmptyInput("URL".into()).to_string());
                    return None;
                }
                self.set_status(format!("Processing {}...", self.tools.page_url));
                Some(Action::ProcessUrl(self.tools.page_url.clone()))
            }
            InputTarget::FilePath => {
                let path = value.trim();
                if !path.is_empty() {
                    self.tools.files.push(path.to_string());
                    self.set_status(format!("{} file(s) selected", self.tools.files.len()));
                }
                None
            }
            InputTarget::SettingValue => {
                let field = self.settings.selected_field();
                self.settings.draft.set(field, value);
                self.settings.dirty = true;
                self.set_status(format!("{} changed; press s to save", field.label()));
                None
            }
        }
    }

    fn set_search(&mut self, search: String) {
        self.monitor.set_search(search);
        self.selected_card = 0;
    }

    fn clamp_card(&mut self) {
        let len = self.monitor.page_items().len();
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
    }

    pub fn selected_endpoint(&self) -> Option<&domain::MonitoredEndpoint> {
        self.monitor.page_items().get(self.selected_card).copied()
    }

    fn handle_endpoints_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('/') => self.begin_edit(InputTarget::Search),
            KeyCode::Char('t') => {
                self.monitor.cycle_team();
                self.selected_card = 0;
            }
            KeyCode::Char('s') => {
                self.monitor.cycle_status();
                self.selected_card = 0;
            }
            KeyCode::Char('x') => {
                self.monitor.set_search("");
                self.monitor.set_team(TeamFilter::All);
                self.monitor.set_status(StatusFilter::All);
                self.selected_card = 0;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.monitor.prev_page();
                self.selected_card = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.monitor.next_page();
                self.selected_card = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_card += 1;
                self.clamp_card();
            }
            KeyCode::Enter => {
                self.show_details = !self.show_details && self.selected_endpoint().is_some();
            }
            KeyCode::Esc => self.show_details = false,
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.set_status("Refreshing endpoints...");
                return Some(self.request_endpoints());
            }
            _ => {}
        }
        None
    }

    fn handle_tools_key(&mut self, key: KeyEvent) -> Option<Action> {
        let tool_id = self.tools.current().id;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let index = self.tools.selected.saturating_sub(1);
                self.tools.select(index);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let index = (self.tools.selected + 1).min(TOOLS.len() - 1);
                self.tools.select(index);
            }
            KeyCode::Char('i') => self.begin_edit(InputTarget::ToolInput),
            KeyCode::Char('o') if tool_id == "json-analyzer" => {
                self.begin_edit(InputTarget::SecondInput)
            }
            KeyCode::Char('J') => self.begin_edit(InputTarget::StoryId),
            KeyCode::Char('u') => self.begin_edit(InputTarget::PageUrl),
            KeyCode::Char('f') => self.begin_edit(InputTarget::FilePath),
            KeyCode::Char('F') => return self.upload_files(),
            KeyCode::Char('x') => {
                let selected = self.tools.selected;
                let chat = std::mem::take(&mut self.tools.chat);
                self.tools = ToolsState {
                    selected,
                    chat,
                    ..ToolsState::default()
                };
                self.set_status("Cleared");
            }
            KeyCode::Char('e') if tool_id == "test-generator" => {
                return self.export(ExportTarget::Jira)
            }
            KeyCode::Char('E') if tool_id == "test-generator" => {
                return self.export(ExportTarget::QTest)
            }
            KeyCode::Enter => return self.run_current_tool(),
            _ => {}
        }
        None
    }

    /// Validates the input for the selected tool and builds its request
    pub fn run_current_tool(&mut self) -> Option<Action> {
        if self.tools.busy {
            self.set_error("A request is already running");
            return None;
        }
        let tool = self.tools.current();

        let action = match tool.id {
            "json-analyzer" => {
                let input = match json_analyzer_input(&self.tools.input, &self.tools.second_input) {
                    Ok(input) => input,
                    Err(e) => {
                        self.set_error(e.to_string());
                        return None;
                    }
                };
                Action::AnalyzeJson {
                    prompt: self.tools.prompt_for(&input),
                    json1: self.tools.input.clone(),
                    json2: self.tools.second_input.clone(),
                }
            }
            "chatbot" => {
                let message = self.tools.input.trim().to_string();
                if message.is_empty() {
                    self.set_error(DomainError::EmptyInput("Message".into()).to_string());
                    return None;
                }
                let history = self.tools.chat.recent().to_vec();
                self.tools.chat.push_user(message.clone());
                self.tools.input.clear();
                Action::SendChat {
                    prompt: self.tools.prompt_for(&message),
                    message,
                    history,
                }
            }
            _ => {
                let has_context = self.tools.jira.is_some() || self.tools.url_insight.is_some();
                if self.tools.input.trim().is_empty() && !has_context {
                    self.set_error(DomainError::EmptyInput("Input".into()).to_string());
                    return None;
                }
                Action::RunTool {
                    tool_id: tool.id.to_string(),
                    prompt: self.tools.prompt_for(&self.tools.input),
                    input: self.tools.input.clone(),
                }
            }
        };

        self.tools.busy = true;
        self.set_status(format!("Running {}...", tool.name));
        Some(action)
    }

    fn upload_files(&mut self) -> Option<Action> {
        if self.tools.files.is_empty() {
            self.set_error("Select at least one file with f");
            return None;
        }
        let tool = self.tools.current();
        self.tools.busy = true;
        self.set_status(format!("Uploading {} file(s)...", self.tools.files.len()));
        Some(Action::UploadFiles {
            tool_id: tool.id.to_string(),
            tool_name: tool.name.to_string(),
            prompt: self.tools.prompt_for(&self.tools.input),
            paths: self.tools.files.clone(),
        })
    }

    fn export(&mut self, target: ExportTarget) -> Option<Action> {
        let Some(test_cases) = self.tools.output.clone() else {
            self.set_error("Please generate test cases first.");
            return None;
        };
        self.set_status(format!("Creating test cases in {target}..."));
        Some(Action::Export(
            target,
            TestCaseExport {
                test_cases,
                jira_data: self.tools.jira.clone(),
                requirements: self.tools.input.clone(),
            },
        ))
    }

    fn handle_pipelines_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('a') => {
                self.pipelines.app = match self.pipelines.app {
                    BuildApp::Tsdm => BuildApp::Navigator,
                    BuildApp::Navigator => BuildApp::Tsdm,
                };
            }
            KeyCode::Char('e') => {
                self.pipelines.env = match self.pipelines.env {
                    BuildEnv::Qa => BuildEnv::Prod,
                    BuildEnv::Prod => BuildEnv::Qa,
                };
            }
            KeyCode::Char('b') | KeyCode::Enter => {
                let (app, env) = (self.pipelines.app, self.pipelines.env);
                self.set_status(format!(
                    "Triggering {} build for {}...",
                    env.as_str().to_uppercase(),
                    app.display_name()
                ));
                return Some(Action::TriggerBuild(app, env));
            }
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.pipelines.loading = true;
                return Some(Action::RefreshPipelines);
            }
            _ => {}
        }
        None
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.help.selected = self.help.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.help.selected = (self.help.selected + 1).min(FAQ.len() - 1);
            }
            KeyCode::Enter => self.help.expanded = !self.help.expanded,
            _ => {}
        }
        None
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.selected = self.settings.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings.selected =
                    (self.settings.selected + 1).min(ConfigField::ALL.len() - 1);
            }
            KeyCode::Enter => self.begin_edit(InputTarget::SettingValue),
            KeyCode::Char('s') => {
                self.settings.warnings = EndpointConfigValidator::new()
                    .validate(&self.settings.draft)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                return Some(Action::SaveConfig(self.settings.draft.clone()));
            }
            KeyCode::Char('R') => return Some(Action::ResetConfig),
            KeyCode::Char('t') => {
                self.set_status(format!("Testing connection to {}...", self.settings.draft.base_url));
                return Some(Action::TestConnection(self.settings.draft.clone()));
            }
            _ => {}
        }
        None
    }

    /// The draft was persisted. The monitor reloads from the new backend.
    pub fn config_saved(&mut self) -> Action {
        self.settings.dirty = false;
        if self.settings.warnings.is_empty() {
            self.set_status("Endpoint configuration saved successfully");
        } else {
            self.set_status(format!(
                "Configuration saved with {} warning(s)",
                self.settings.warnings.len()
            ));
        }
        self.request_endpoints()
    }

    /// Storage was cleared; `config` is the resolved default
    pub fn config_reset(&mut self, config: EndpointConfig) -> Action {
        self.settings.draft = config;
        self.settings.dirty = false;
        self.settings.warnings.clear();
        self.set_status("Endpoint configuration reset to defaults");
        self.request_endpoints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use domain::{EndpointStatus, MonitoredEndpoint};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn endpoint(id: usize, status: EndpointStatus) -> MonitoredEndpoint {
        MonitoredEndpoint {
            id: id.to_string(),
            name: format!("Service {id}"),
            url: format!("https://svc{id}.test"),
            status,
            response_time_ms: 100,
            last_check: "now".to_string(),
            team: if id % 2 == 0 { "Payments" } else { "Identity" }.to_string(),
        }
    }

    fn state() -> AppState {
        AppState::new(EndpointConfig::default(), 8, Duration::from_secs(30))
    }

    fn loaded_state(count: usize) -> AppState {
        let mut state = state();
        let endpoints = (1..=count).map(|i| endpoint(i, EndpointStatus::Up)).collect();
        state.apply(TUIEvent::EndpointsLoaded(Ok(endpoints)));
        state
    }

    #[test]
    fn test_section_navigation() {
        let mut state = state();
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.section, Section::QaTools);
        state.handle_key(key(KeyCode::BackTab));
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.section, Section::Settings);

        let action = state.handle_key(key(KeyCode::Char('3')));
        assert_eq!(state.section, Section::Pipelines);
        assert_eq!(action, Some(Action::RefreshPipelines));
    }

    #[test]
    fn test_live_search_resets_page() {
        let mut state = loaded_state(20);
        state.handle_key(key(KeyCode::Right));
        assert_eq!(state.monitor.current_page(), 2);

        state.handle_key(key(KeyCode::Char('/')));
        type_text(&mut state, "service 1");
        assert_eq!(state.monitor.current_page(), 1);
        assert_eq!(state.monitor.filtered().len(), 11);

        state.handle_key(key(KeyCode::Esc));
        assert!(!state.is_editing());
        assert_eq!(state.monitor.filter().search, "");
    }

    #[test]
    fn test_q_types_while_editing() {
        let mut state = loaded_state(3);
        state.handle_key(key(KeyCode::Char('/')));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), None);
        assert_eq!(state.monitor.filter().search, "q");
        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_failed_refresh_empties_list() {
        let mut state = loaded_state(5);
        state.apply(TUIEvent::EndpointsLoaded(Err(
            "Backend responded with status: 500".into(),
        )));
        assert!(state.monitor.endpoints().is_empty());
        assert_eq!(
            state.error_message.as_deref(),
            Some("Backend responded with status: 500")
        );
        assert!(!state.endpoints_loading);
    }

    #[test]
    fn test_auto_refresh_waits_for_interval() {
        let mut state = state();
        let start = Instant::now();
        assert_eq!(state.on_tick(start), Some(Action::RefreshEndpoints));
        assert_eq!(state.on_tick(start), None);

        state.apply(TUIEvent::EndpointsLoaded(Ok(Vec::new())));
        let loaded_at = state.last_refresh.unwrap();
        assert_eq!(state.on_tick(loaded_at + Duration::from_secs(5)), None);
        assert_eq!(
            state.on_tick(loaded_at + Duration::from_secs(31)),
            Some(Action::RefreshEndpoints)
        );
    }

    #[test]
    fn test_chat_history_excludes_current_message() {
        let mut state = state();
        state.section = Section::QaTools;
        state.tools.selected = TOOLS.iter().position(|t| t.id == "chatbot").unwrap();
        for i in 0..12 {
            state.tools.chat.push_user(format!("q{i}"));
        }

        state.handle_key(key(KeyCode::Char('i')));
        type_text(&mut state, "next?");
        let action = state.handle_key(key(KeyCode::Enter));

        match action {
            Some(Action::SendChat { message, history, .. }) => {
                assert_eq!(message, "next?");
                assert_eq!(history.len(), 10);
                assert_eq!(history[0].content, "q2");
                assert_eq!(history[9].content, "q11");
            }
            other => panic!("expected chat request, got {other:?}"),
        }
        assert_eq!(state.tools.chat.len(), 13);
        assert!(state.tools.busy);
    }

    #[test]
    fn test_json_analyzer_rejects_invalid_json() {
        let mut state = state();
        state.section = Section::QaTools;
        state.tools.selected = TOOLS.iter().position(|t| t.id == "json-analyzer").unwrap();
        state.tools.input = r#"{"a":1}"#.into();
        state.tools.second_input = "{broken".into();

        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert!(state.error_message.unwrap().contains("JSON 2"));
        assert!(!state.tools.busy);
    }

    #[test]
    fn test_tool_run_uses_jira_context() {
        let mut state = state();
        state.section = Section::QaTools;
        state.apply(TUIEvent::JiraLoaded(Ok(JiraStory {
            id: "QA-7".into(),
            title: "Checkout".into(),
            description: "Pay by card".into(),
            acceptance_criteria: vec!["Card accepted".into()],
            ..JiraStory::default()
        })));

        match state.handle_key(key(KeyCode::Enter)) {
            Some(Action::RunTool { tool_id, prompt, .. }) => {
                assert_eq!(tool_id, "test-generator");
                assert!(prompt.contains("Jira story: Checkout"));
            }
            other => panic!("expected tool request, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_tool_input_is_rejected() {
        let mut state = state();
        state.section = Section::QaTools;
        assert_eq!(state.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(state.error_message.as_deref(), Some("Input is required"));
    }

    #[test]
    fn test_switching_tools_keeps_chat() {
        let mut state = state();
        state.section = Section::QaTools;
        state.tools.input = "requirements".into();
        state.tools.chat.push_user("hello");

        state.handle_key(key(KeyCode::Down));
        assert_eq!(state.tools.current().id, "ac-validator");
        assert!(state.tools.input.is_empty());
        assert_eq!(state.tools.chat.len(), 1);
    }

    #[test]
    fn test_settings_edit_and_save() {
        let mut state = state();
        state.section = Section::Settings;
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Enter));
        for _ in 0.."/test-generator".len() {
            state.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut state, "tests");
        state.handle_key(key(KeyCode::Enter));

        assert!(state.settings.dirty);
        assert_eq!(state.settings.draft.test_generator_endpoint, "tests");

        match state.handle_key(key(KeyCode::Char('s'))) {
            Some(Action::SaveConfig(config)) => {
                assert_eq!(config.test_generator_endpoint, "tests")
            }
            other => panic!("expected save, got {other:?}"),
        }
        assert_eq!(state.settings.warnings.len(), 1);
        assert_eq!(state.config_saved(), Action::RefreshEndpoints);
        assert!(!state.settings.dirty);
        assert!(state.endpoints_loading);
    }

    #[test]
    fn test_config_reset_reloads_monitor() {
        let mut state = loaded_state(3);
        state.section = Section::Settings;
        state.settings.draft.base_url = "https://old.test".into();
        state.settings.dirty = true;

        assert_eq!(state.handle_key(key(KeyCode::Char('R'))), Some(Action::ResetConfig));
        let next = state.config_reset(EndpointConfig::default());

        assert_eq!(next, Action::RefreshEndpoints);
        assert!(state.endpoints_loading);
        assert_eq!(state.settings.draft, EndpointConfig::default());
        assert!(!state.settings.dirty);
    }

    #[test]
    fn test_build_trigger_refreshes_pipelines() {
        let mut state = state();
        state.section = Section::Pipelines;
        state.handle_key(key(KeyCode::Char('a')));
        state.handle_key(key(KeyCode::Char('e')));
        assert_eq!(
            state.handle_key(key(KeyCode::Char('b'))),
            Some(Action::TriggerBuild(BuildApp::Navigator, BuildEnv::Prod))
        );

        let next = state.apply(TUIEvent::BuildTriggered(Ok("Build queued".into())));
        assert_eq!(next, Some(Action::RefreshPipelines));
        assert_eq!(state.status_message, "Build queued");
    }
}
