//! Terminal dashboard for QA Hub.
//!
//! A sidebar with the five sections of the hub and a status line in place
//! of notifications. All backend work runs on tokio tasks and reports back
//! through the event channel.

pub mod components;
pub mod tui;

pub use tui::{render_ui, Action, AppState, EventHandler, Section, TUIApp, TUIEvent};
