//! # TitleBar Component
//!
//! Top status line: application name, backend origin with its health, and
//! the transient status message (chat failures land here).
//!
//! Purely presentational. All fields are props, so the text only depends on
//! what the parent passes in:
//!
//! 1. **Status message**: `"FarmCopilot | http://localhost:8000 (online) | Chat request failed: ..."`
//! 2. **Default**: `"FarmCopilot | http://localhost:8000 (online)"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::BackendHealth;
use crate::tui::component::Component;

pub const APP_TITLE: &str = "FarmCopilot";

pub struct TitleBar<'a> {
    pub backend_url: &'a str,
    pub health: BackendHealth,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(backend_url: &'a str, health: BackendHealth, status_message: &'a str) -> Self {
        Self {
            backend_url,
            health,
            status_message,
        }
    }

    fn health_style(&self) -> Style {
        match self.health {
            BackendHealth::Online => Style::default().fg(Color::Green),
            BackendHealth::Offline => Style::default().fg(Color::Red),
            BackendHealth::Unknown => Style::default().fg(Color::DarkGray),
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | {} ", self.backend_url)),
            Span::styled(format!("({})", self.health.label()), self.health_style()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
