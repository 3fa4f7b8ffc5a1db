use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::conversation::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never take more than this share of the row, so alignment stays visible.
const MAX_WIDTH_PERCENT: u16 = 80;

/// Size of one chat bubble, with its content already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleLayout {
    pub lines: Vec<String>,
    pub width: u16,
    pub height: u16,
}

impl BubbleLayout {
    /// Wraps `content` for a row `row_width` cells wide.
    ///
    /// The bubble shrinks to the longest wrapped line, so short replies get
    /// short bubbles. Heights computed here are what the message list caches.
    pub fn compute(content: &str, row_width: u16) -> Self {
        let max_width = ((u32::from(row_width) * u32::from(MAX_WIDTH_PERCENT) / 100) as u16)
            .max(HORIZONTAL_OVERHEAD + 1);
        let text_width = max_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1);

        let content = content.trim();
        let options = textwrap::Options::new(text_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let mut lines: Vec<String> = textwrap::wrap(content, options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }

        let longest = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()) as u16)
            .max()
            .unwrap_or(0)
            .min(text_width);
        let width = longest
            .saturating_add(HORIZONTAL_OVERHEAD)
            .min(row_width.max(1));
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD);

        Self {
            lines,
            width,
            height,
        }
    }
}

/// A single conversation entry rendered as a chat bubble.
///
/// User entries sit on the right edge of their row, assistant entries on
/// the left. The component is transient: `MessageList` creates one per
/// visible entry each frame.
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub layout: &'a BubbleLayout,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, layout: &'a BubbleLayout) -> Self {
        Self { message, layout }
    }

    /// Where the bubble goes inside a full-width row.
    pub fn bubble_rect(&self, row: Rect) -> Rect {
        let width = self.layout.width.min(row.width);
        let x = match self.message.role {
            Role::User => row.x + row.width.saturating_sub(width),
            Role::Assistant => row.x,
        };
        Rect::new(x, row.y, width, self.layout.height.min(row.height))
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "copilot",
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::LightBlue),
        Role::Assistant => Style::default().fg(Color::Gray),
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = self.bubble_rect(area);
        let style = role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let title = Line::from(role_label(self.message.role));
        let title = match self.message.role {
            Role::User => title.right_aligned(),
            Role::Assistant => title.left_aligned(),
        };

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines: Vec<Line> = self
            .layout
            .lines
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();
        Paragraph::new(lines).style(style).render(inner, buf);
    }
}
