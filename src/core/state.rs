//! # Application State
//!
//! Core session state for FarmCopilot. Presentation state (scroll offsets,
//! the composition buffer, the file prompt) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn Backend>     // HTTP collaborator
//! ├── conversation: Conversation    // append-only history
//! ├── upload_status: String         // last upload attempt, free text
//! ├── status_message: String        // title bar text
//! ├── is_loading: bool              // chat request in flight
//! ├── health: BackendHealth         // result of the /healthz probe
//! └── latest_upload: Option<UploadToken>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::backend::Backend;
use crate::core::config::ResolvedConfig;
use crate::core::conversation::Conversation;

pub const NO_UPLOAD_STATUS: &str = "No document uploaded.";
pub const UPLOADING_STATUS: &str = "Uploading...";
pub const UPLOAD_COMPLETE_STATUS: &str = "Upload complete!";
pub const UPLOAD_FAILED_STATUS: &str = "Upload failed. Is the backend running?";

pub const IDLE_PLACEHOLDER: &str = "Ask a question about your document...";
pub const LOADING_PLACEHOLDER: &str = "Generating answer...";
pub const SEND_LABEL: &str = "Send";
pub const BUSY_LABEL: &str = "...";

/// Sequence number of an upload attempt. Only the most recently issued
/// token is allowed to write the upload status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl BackendHealth {
    pub fn label(self) -> &'static str {
        match self {
            BackendHealth::Unknown => "checking",
            BackendHealth::Online => "online",
            BackendHealth::Offline => "offline",
        }
    }
}

pub struct App {
    pub backend: Arc<dyn Backend>,
    pub conversation: Conversation,
    pub upload_status: String,
    pub status_message: String,
    pub is_loading: bool,
    pub health: BackendHealth,
    pub latest_upload: Option<UploadToken>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, greeting: Option<&str>) -> Self {
        Self {
            backend,
            conversation: Conversation::with_greeting(greeting),
            upload_status: NO_UPLOAD_STATUS.to_string(),
            status_message: String::new(),
            is_loading: false,
            health: BackendHealth::default(),
            latest_upload: None,
        }
    }

    pub fn from_config(backend: Arc<dyn Backend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, Some(&config.greeting))
    }

    /// Issues the next upload token and marks it as the one that counts.
    pub fn issue_upload_token(&mut self) -> UploadToken {
        let next = self.latest_upload.map_or(1, |UploadToken(n)| n + 1);
        let token = UploadToken(next);
        self.latest_upload = Some(token);
        token
    }

    pub fn is_latest_upload(&self, token: UploadToken) -> bool {
        self.latest_upload == Some(token)
    }

    /// Input box and submit control are disabled while a chat request is pending.
    pub fn input_enabled(&self) -> bool {
        !self.is_loading
    }

    pub fn placeholder(&self) -> &'static str {
        if self.is_loading {
            LOADING_PLACEHOLDER
        } else {
            IDLE_PLACEHOLDER
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading { BUSY_LABEL } else { SEND_LABEL }
    }
}
