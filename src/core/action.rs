//! # Actions
//!
//! Everything that can happen in FarmCopilot becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ChatCompleted(reply)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! event loop must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::backend::Document;
use crate::core::state::{
    App, BackendHealth, UPLOAD_COMPLETE_STATUS, UPLOAD_FAILED_STATUS, UPLOADING_STATUS,
    UploadToken,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the composition buffer.
    Submit(String),
    /// `/chat` answered with this text.
    ChatCompleted(String),
    /// `/chat` failed; carries a human-readable reason.
    ChatFailed(String),
    /// User picked a file to upload.
    SelectFile(PathBuf),
    /// `/upload` answered. `message` is the backend's optional message field.
    UploadCompleted {
        token: UploadToken,
        message: Option<String>,
    },
    /// `/upload` could not be completed.
    UploadFailed { token: UploadToken, reason: String },
    /// Result of the start-up `/healthz` probe.
    HealthChecked { online: bool },
    Quit,
}

/// Side effects requested by `update()`, performed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnChat(String),
    SpawnUpload { token: UploadToken, path: PathBuf },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit ignored: chat request already pending");
                return Effect::None;
            }
            app.is_loading = true;
            app.status_message.clear();
            app.conversation.push_user(text.clone());
            Effect::SpawnChat(text)
        }
        Action::ChatCompleted(reply) => {
            app.conversation.push_assistant(reply);
            app.is_loading = false;
            Effect::None
        }
        Action::ChatFailed(reason) => {
            warn!("Chat request failed: {reason}");
            app.is_loading = false;
            app.status_message = format!("Chat request failed: {reason}");
            Effect::None
        }
        Action::SelectFile(path) => {
            if !Document::looks_like_pdf(&path) {
                warn!("{} does not look like a PDF, uploading anyway", path.display());
            }
            let token = app.issue_upload_token();
            info!("Upload #{} started for {}", token.0, path.display());
            app.upload_status = UPLOADING_STATUS.to_string();
            Effect::SpawnUpload { token, path }
        }
        Action::UploadCompleted { token, message } => {
            if !app.is_latest_upload(token) {
                debug!("Dropping completion for superseded upload #{}", token.0);
                return Effect::None;
            }
            app.upload_status = message.unwrap_or_else(|| UPLOAD_COMPLETE_STATUS.to_string());
            Effect::None
        }
        Action::UploadFailed { token, reason } => {
            warn!("Upload #{} failed: {reason}", token.0);
            if !app.is_latest_upload(token) {
                debug!("Dropping failure for superseded upload #{}", token.0);
                return Effect::None;
            }
            app.upload_status = UPLOAD_FAILED_STATUS.to_string();
            Effect::None
        }
        Action::HealthChecked { online } => {
            app.health = if online {
                BackendHealth::Online
            } else {
                BackendHealth::Offline
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::{Message, Role};
    use crate::test_support::test_app;

    fn msg(role: Role, content: &str) -> Message {
        Message {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut app = test_app();
        let before = app.conversation.clone();

        for text in ["", "   ", "\n\t "] {
            assert_eq!(update(&mut app, Action::Submit(text.to_string())), Effect::None);
        }

        assert_eq!(app.conversation, before);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_round_trip_appends_user_then_assistant() {
        let mut app = test_app();
        let start = app.conversation.len();

        let effect = update(&mut app, Action::Submit("hello".to_string()));
        assert_eq!(effect, Effect::SpawnChat("hello".to_string()));
        assert!(app.is_loading);

        update(&mut app, Action::ChatCompleted("hi there".to_string()));
        assert!(!app.is_loading);

        let added = &app.conversation.messages()[start..];
        assert_eq!(
            added,
            &[msg(Role::User, "hello"), msg(Role::Assistant, "hi there")]
        );
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let len = app.conversation.len();

        let effect = update(&mut app, Action::Submit("second".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), len);
    }

    #[test]
    fn test_input_disabled_only_while_pending() {
        let mut app = test_app();
        assert!(app.input_enabled());

        update(&mut app, Action::Submit("question".to_string()));
        assert!(!app.input_enabled());

        update(&mut app, Action::ChatCompleted("answer".to_string()));
        assert!(app.input_enabled());
    }

    #[test]
    fn test_chat_failure_releases_loading_flag() {
        let mut app = test_app();
        let start = app.conversation.len();
        update(&mut app, Action::Submit("hello".to_string()));

        update(
            &mut app,
            Action::ChatFailed("network error: connection refused".to_string()),
        );

        assert!(!app.is_loading);
        assert!(app.input_enabled());
        assert_eq!(app.conversation.len(), start + 1);
        assert_eq!(app.conversation.last().map(|m| m.role), Some(Role::User));
        assert!(app.status_message.starts_with("Chat request failed"));
    }

    #[test]
    fn test_next_submit_clears_failure_status() {
        let mut app = test_app();
        update(&mut app, Action::Submit("a".to_string()));
        update(&mut app, Action::ChatFailed("boom".to_string()));
        update(&mut app, Action::Submit("b".to_string()));
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_select_file_sets_uploading_status() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SelectFile(PathBuf::from("crops.pdf")));

        assert_eq!(app.upload_status, "Uploading...");
        match effect {
            Effect::SpawnUpload { token, path } => {
                assert!(app.is_latest_upload(token));
                assert_eq!(path, PathBuf::from("crops.pdf"));
            }
            other => panic!("Expected SpawnUpload, got {:?}", other),
        }
    }

    #[test]
    fn test_upload_message_becomes_status() {
        let mut app = test_app();
        let Effect::SpawnUpload { token, .. } =
            update(&mut app, Action::SelectFile(PathBuf::from("crops.pdf")))
        else {
            panic!("Expected SpawnUpload");
        };

        update(
            &mut app,
            Action::UploadCompleted {
                token,
                message: Some("Indexed 12 pages".to_string()),
            },
        );
        assert_eq!(app.upload_status, "Indexed 12 pages");
    }

    #[test]
    fn test_upload_without_message_uses_default() {
        let mut app = test_app();
        let token = app.issue_upload_token();
        update(&mut app, Action::UploadCompleted { token, message: None });
        assert_eq!(app.upload_status, "Upload complete!");
    }

    #[test]
    fn test_upload_failure_leaves_history_alone() {
        let mut app = test_app();
        let before = app.conversation.clone();
        let token = app.issue_upload_token();

        update(
            &mut app,
            Action::UploadFailed {
                token,
                reason: "network error: connection refused".to_string(),
            },
        );

        assert_eq!(app.upload_status, "Upload failed. Is the backend running?");
        assert_eq!(app.conversation, before);
    }

    #[test]
    fn test_superseded_upload_cannot_overwrite_status() {
        let mut app = test_app();
        let older = app.issue_upload_token();
        let newer = app.issue_upload_token();

        update(
            &mut app,
            Action::UploadCompleted {
                token: newer,
                message: Some("Indexed 3 pages".to_string()),
            },
        );
        update(
            &mut app,
            Action::UploadCompleted {
                token: older,
                message: Some("Indexed 40 pages".to_string()),
            },
        );
        update(
            &mut app,
            Action::UploadFailed {
                token: older,
                reason: "late".to_string(),
            },
        );

        assert_eq!(app.upload_status, "Indexed 3 pages");
    }

    #[test]
    fn test_health_check_updates_health() {
        let mut app = test_app();
        update(&mut app, Action::HealthChecked { online: true });
        assert_eq!(app.health, BackendHealth::Online);
        update(&mut app, Action::HealthChecked { online: false });
        assert_eq!(app.health, BackendHealth::Offline);
    }

    #[test]
    fn test_quit_requests_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
