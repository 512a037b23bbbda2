use crate::ui::app::Tab;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect, tab: Tab) -> Paragraph<'static> {
        let hints = match tab {
            Tab::Prices => " Tab: Switch │ n: New │ e: Edit │ d: Delete │ f: Filter │ r: Refresh │ [ ]: Page │ + -: Size │ x: Dismiss │ q: Quit",
            Tab::Services => " Tab: Switch │ n: New │ e: Edit │ d: Delete │ t: Toggle │ f: Filter │ r: Refresh │ [ ]: Page │ + -: Size │ x: Dismiss │ q: Quit",
        };
        let version = format!("v{} ", VERSION);

        // Padding by char count, not byte count (box-drawing separators)
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
