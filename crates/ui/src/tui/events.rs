use client::JsonAnalysis;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use domain::{JiraStory, MonitoredEndpoint, PipelineSnapshot, UrlInsight};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Everything the UI loop reacts to: terminal input, ticks and the results
/// of background requests. Failures carry the message for the status line.
#[derive(Debug, Clone)]
pub enum TUIEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    EndpointsLoaded(Result<Vec<MonitoredEndpoint>, String>),
    PipelinesLoaded(Result<PipelineSnapshot, String>),
    BuildTriggered(Result<String, String>),
    ToolReplied(Result<String, String>),
    JsonAnalyzed(Result<JsonAnalysis, String>),
    ChatReplied(Result<String, String>),
    JiraLoaded(Result<JiraStory, String>),
    UrlLoaded(Result<UrlInsight, String>),
    FilesProcessed(Result<String, String>),
    Exported(Result<String, String>),
    ConnectionChecked(Result<(), String>),
    Error(String),
}

pub struct EventHandler {
    sender: mpsc::Sender<TUIEvent>,
    receiver: mpsc::Receiver<TUIEvent>,
}

impl EventHandler {
    /// Starts the input thread; a `Tick` is sent every `tick_rate`
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let event_sender = sender.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or_else(|| Duration::from_secs(0));

                match crossterm::event::poll(timeout) {
                    Ok(true) => {
                        let event = match crossterm::event::read() {
                            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                Some(TUIEvent::Key(key))
                            }
                            Ok(Event::Resize(width, height)) => {
                                Some(TUIEvent::Resize(width, height))
                            }
                            Ok(_) => None,
                            Err(e) => Some(TUIEvent::Error(format!("Terminal input failed: {e}"))),
                        };
                        if let Some(event) = event {
                            if event_sender.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => break,
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_sender.send(TUIEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        EventHandler { sender, receiver }
    }

    pub fn next(&self) -> Result<TUIEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Handle for background tasks to report results
    pub fn sender(&self) -> mpsc::Sender<TUIEvent> {
        self.sender.clone()
    }

    pub fn send_error(&self, error: String) {
        let _ = self.sender.send(TUIEvent::Error(error));
    }
}

/// `q` and `Esc` quit only outside of text entry; `Ctrl+C` always quits.
pub fn should_quit(key: &KeyEvent, editing: bool) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => true,
        (KeyCode::Char('q'), KeyModifiers::NONE) => !editing,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        assert!(should_quit(&ctrl_c, true));
        assert!(should_quit(&q, false));
        assert!(!should_quit(&q, true));
    }
}
