use crate::domain::AdminProfile;
use crate::ui::theme::{
    BRAND_TEAL, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, profile: Option<&AdminProfile>, base_url: &str) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (dot, who) = match profile {
            Some(profile) => (
                Span::styled("●", Style::default().fg(STATUS_OK)),
                Span::styled(profile.display_name().to_string(), text_style),
            ),
            None => (
                Span::styled("●", Style::default().fg(STATUS_ERROR)),
                Span::styled("not logged in", text_style.add_modifier(Modifier::DIM)),
            ),
        };
        let line = Line::from(vec![
            Span::styled(
                "  fleetdesk",
                Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            dot,
            Span::styled(" ", text_style),
            who,
            Span::styled("  │  ", separator_style),
            Span::styled(base_url.to_string(), text_style.add_modifier(Modifier::DIM)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
