//! # UploadPanel Component
//!
//! Shows the outcome of the latest upload attempt and how to start one.
//! Stateless: the status string is a prop copied from `App` each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::state::{UPLOAD_COMPLETE_STATUS, UPLOAD_FAILED_STATUS, UPLOADING_STATUS};
use crate::tui::component::Component;

pub const UPLOAD_HINT: &str = "Ctrl+U: choose PDF file";

pub struct UploadPanel<'a> {
    pub status: &'a str,
}

impl<'a> UploadPanel<'a> {
    pub fn new(status: &'a str) -> Self {
        Self { status }
    }
}

fn status_style(status: &str) -> Style {
    match status {
        UPLOADING_STATUS => Style::default().fg(Color::Yellow),
        UPLOAD_FAILED_STATUS => Style::default().fg(Color::Red),
        UPLOAD_COMPLETE_STATUS => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Gray),
    }
}

impl Component for UploadPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Document ")
            .title(
                Line::from(Span::styled(
                    format!(" {UPLOAD_HINT} "),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            )
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.status)
            .style(status_style(self.status))
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
