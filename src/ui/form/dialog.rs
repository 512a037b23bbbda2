use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::ui::form::state::FormDialogState;
use crate::ui::popup::PopupDialog;
use crate::ui::theme::{ACTIVE_HIGHLIGHT, BRAND_TEAL, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR};

const DIALOG_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 16;

pub fn render_form_dialog(frame: &mut Frame, state: &FormDialogState) {
    let FormDialogState::Visible {
        title,
        fields,
        focused,
        ..
    } = state
    else {
        return;
    };

    let mut lines = Vec::with_capacity(fields.len() * 2);
    for (i, field) in fields.iter().enumerate() {
        let is_focused = i == *focused;
        let marker = if field.spec.required { "*" } else { " " };
        let label = format!(
            "{:<width$}",
            format!("{}{}", field.spec.label, marker),
            width = LABEL_WIDTH
        );

        let row_style = if is_focused {
            Style::default().bg(ACTIVE_HIGHLIGHT)
        } else {
            Style::default()
        };
        let label_style = if is_focused {
            Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HEADER_TEXT)
        };

        let value = if field.value.is_empty() && !is_focused {
            Span::styled(field.spec.hint.to_string(), Style::default().fg(MUTED_TEXT))
        } else {
            Span::styled(field.value.clone(), Style::default().fg(HEADER_TEXT))
        };

        let mut spans = vec![Span::styled(format!(" {} ", label), label_style), value];
        if is_focused {
            spans.push(Span::styled("▏", Style::default().fg(BRAND_TEAL)));
        }
        lines.push(Line::from(spans).style(row_style));

        if let Some(error) = &field.error {
            lines.push(Line::from(Span::styled(
                format!(" {:width$} {}", "", error, width = LABEL_WIDTH),
                Style::default().fg(STATUS_ERROR),
            )));
        }
    }

    let area = frame.area();
    PopupDialog::new(title.clone(), lines)
        .fixed_width(DIALOG_WIDTH)
        .footer(" ↑/↓ field │ Enter save │ Ctrl+U clear │ Esc cancel")
        .render(frame, area);
}
