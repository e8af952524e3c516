pub mod app;
pub mod events;
pub mod state;

pub use app::{render_ui, TUIApp};
pub use events::{should_quit, EventHandler, TUIEvent};
pub use state::{
    Action, AppState, HelpState, InputMode, InputTarget, PipelinesState, Section, SettingsState,
    ToolsState,
};
