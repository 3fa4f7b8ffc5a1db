//! # File Prompt Component
//!
//! Centered overlay for typing the path of the PDF to upload.
//! Opened with Ctrl+U, confirmed with Enter, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilePromptState` lives in `TuiState` while the prompt is open
//! - `FilePrompt` is created each frame with borrowed state

use std::path::PathBuf;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const PROMPT_WIDTH_PERCENT: u16 = 70;
const PROMPT_HEIGHT: u16 = 3;

/// Persistent state for the file prompt overlay.
#[derive(Debug, Default)]
pub struct FilePromptState {
    pub path: String,
}

/// Events emitted by the file prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum FilePromptEvent {
    Confirm(PathBuf),
    Cancel,
}

impl FilePromptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<FilePromptEvent> {
        match event {
            TuiEvent::Escape => Some(FilePromptEvent::Cancel),
            TuiEvent::Submit => {
                let trimmed = self.path.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Some(FilePromptEvent::Confirm(expand_home(trimmed)))
            }
            TuiEvent::InputChar('\n') => None,
            TuiEvent::InputChar(c) => {
                self.path.push(*c);
                None
            }
            // Drag-and-drop into most terminals arrives as a paste, sometimes quoted
            TuiEvent::Paste(text) => {
                let cleaned = text.trim().trim_matches(|c| c == '\'' || c == '"');
                self.path.push_str(cleaned);
                None
            }
            TuiEvent::Backspace => {
                self.path.pop();
                None
            }
            _ => None,
        }
    }
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Transient render wrapper for the file prompt overlay.
pub struct FilePrompt<'a> {
    state: &'a FilePromptState,
}

impl<'a> FilePrompt<'a> {
    pub fn new(state: &'a FilePromptState) -> Self {
        Self { state }
    }
}

impl Component for FilePrompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = prompt_rect(area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(" Upload PDF ")
            .title_bottom(Line::from(" Enter Upload  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);

        let paragraph = if self.state.path.is_empty() {
            Paragraph::new("Path to a .pdf file").style(Style::default().fg(Color::DarkGray))
        } else {
            // Keep the tail of long paths visible
            let width = UnicodeWidthStr::width(self.state.path.as_str()) as u16;
            let scroll = width.saturating_sub(inner.width.saturating_sub(1));
            Paragraph::new(self.state.path.as_str())
                .style(Style::default().fg(Color::White))
                .scroll((0, scroll))
        };
        frame.render_widget(paragraph.block(block), overlay);

        let typed = UnicodeWidthStr::width(self.state.path.as_str()) as u16;
        let cursor_x = inner.x + typed.min(inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

/// Fixed-height box, centered in `outer`.
fn prompt_rect(outer: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(PROMPT_HEIGHT)])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Percentage(PROMPT_WIDTH_PERCENT)])
        .flex(Flex::Center)
        .areas(row);
    center
}
