use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::theme::{BRAND_TEAL, POPUP_BORDER};

/// Bordered dialog centred over `area`, sized to its content.
pub struct PopupDialog<'a> {
    title: String,
    lines: Vec<Line<'a>>,
    width: u16,
    footer: Option<String>,
}

impl<'a> PopupDialog<'a> {
    pub fn new(title: impl Into<String>, lines: Vec<Line<'a>>) -> Self {
        Self {
            title: title.into(),
            lines,
            width: 60,
            footer: None,
        }
    }

    pub fn fixed_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let extra = if self.footer.is_some() { 2 } else { 0 };
        let height = (self.lines.len() as u16 + 2 + extra).min(area.height);
        let width = self.width.min(area.width);
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        let mut lines = self.lines;
        if let Some(footer) = self.footer {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                footer,
                Style::default().add_modifier(Modifier::DIM),
            )));
        }

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(POPUP_BORDER));

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            rect,
        );
    }
}
