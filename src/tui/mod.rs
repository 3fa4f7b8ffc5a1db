//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! Backend calls run on tokio tasks. Each task reports back by sending one
//! `Action` over an `std::sync::mpsc` channel, which the loop drains between
//! frames. Nothing outside `update()` mutates `App`.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms and only redraws on events or finished tasks.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::JoinHandle;

use crate::backend::{Backend, BackendError, Document, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, UploadToken};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    FilePromptEvent, FilePromptState, InputBox, InputEvent, MessageListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// File path overlay (None = hidden)
    pub file_prompt: Option<FilePromptState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            file_prompt: None,
        }
    }

    /// Copies the props the input box derives from core state.
    pub fn sync_props(&mut self, app: &App) {
        self.input_box.disabled = !app.input_enabled();
        self.input_box.placeholder = app.placeholder();
        self.input_box.submit_label = app.submit_label();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: draw() resets the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Build the HTTP backend from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Result<Arc<dyn Backend>, BackendError> {
    let backend = HttpBackend::new(config.backend_url.clone(), config.request_timeout)?;
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig, initial_file: Option<PathBuf>) -> std::io::Result<()> {
    let backend = build_backend(&config).map_err(std::io::Error::other)?;
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    spawn_health_check(app.backend.clone(), tx.clone());
    if let Some(path) = initial_file {
        dispatch(&mut app, Action::SelectFile(path), &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync_props(&app);

        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                break 'main;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => dispatch(app, Action::Quit, tx),
        _ if tui.file_prompt.is_some() => {
            let prompt_event = tui
                .file_prompt
                .as_mut()
                .and_then(|prompt| prompt.handle_event(&event));
            match prompt_event {
                Some(FilePromptEvent::Confirm(path)) => {
                    tui.file_prompt = None;
                    dispatch(app, Action::SelectFile(path), tx)
                }
                Some(FilePromptEvent::Cancel) => {
                    tui.file_prompt = None;
                    false
                }
                None => false,
            }
        }
        TuiEvent::OpenFilePrompt => {
            tui.file_prompt = Some(FilePromptState::new());
            false
        }
        TuiEvent::Escape => dispatch(app, Action::Quit, tx),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => {
                let quit = dispatch(app, Action::Submit(text), tx);
                tui.sync_props(app);
                quit
            }
            Some(InputEvent::ContentChanged) | None => false,
        },
    }
}

/// Applies an action and performs the effect it asks for.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::SpawnChat(message) => {
            spawn_chat(app.backend.clone(), message, tx.clone());
            false
        }
        Effect::SpawnUpload { token, path } => {
            spawn_upload(app.backend.clone(), token, path, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

fn send_action(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to send action: receiver dropped");
    }
}

pub fn spawn_chat(
    backend: Arc<dyn Backend>,
    message: String,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning chat request ({} bytes)", message.len());
    tokio::spawn(async move {
        let started = Instant::now();
        let action = match backend.chat(&message).await {
            Ok(reply) => {
                info!(
                    "Chat answered in {}ms ({} bytes)",
                    started.elapsed().as_millis(),
                    reply.len()
                );
                Action::ChatCompleted(reply)
            }
            Err(e) => Action::ChatFailed(e.to_string()),
        };
        send_action(&tx, action);
    })
}

pub fn spawn_upload(
    backend: Arc<dyn Backend>,
    token: UploadToken,
    path: PathBuf,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = match Document::read(&path).await {
            Ok(document) => {
                info!(
                    "Uploading {} ({} bytes)",
                    document.file_name,
                    document.bytes.len()
                );
                backend.upload(document).await
            }
            Err(e) => Err(e),
        };
        let action = match result {
            Ok(message) => Action::UploadCompleted { token, message },
            Err(e) => Action::UploadFailed {
                token,
                reason: e.to_string(),
            },
        };
        send_action(&tx, action);
    })
}

/// The only `/healthz` status that counts as online.
const HEALTHY_STATUS: &str = "ok";

pub fn spawn_health_check(backend: Arc<dyn Backend>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let online = match backend.health().await {
            Ok(status) if status == HEALTHY_STATUS => {
                info!("Backend at {} is up", backend.base_url());
                true
            }
            Ok(status) => {
                warn!("Backend at {} reports status {status:?}", backend.base_url());
                false
            }
            Err(e) => {
                warn!("Backend at {} is unreachable: {e}", backend.base_url());
                false
            }
        };
        send_action(&tx, Action::HealthChecked { online });
    })
}
