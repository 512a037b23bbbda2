use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::domain::Resource;
use crate::store::ListState;
use crate::ui::app::{App, Tab};
use crate::ui::footer::Footer;
use crate::ui::form::render_form_dialog;
use crate::ui::header::Header;
use crate::ui::layout::{body_regions, layout_regions};
use crate::ui::notifications::render_notifications;
use crate::ui::popup::PopupDialog;
use crate::ui::table::TableRow;
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, BRAND_TEAL, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT,
    STATUS_ERROR, STATUS_WARN,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(app.profile(), app.base_url()), header);
    frame.render_widget(Clear, body);

    let (tabs, table, status) = body_regions(body);
    frame.render_widget(tab_bar(app.tab()), tabs);
    match app.tab() {
        Tab::Prices => {
            draw_list(frame, table, status, app.prices(), app.selected(Tab::Prices));
        }
        Tab::Services => {
            draw_list(frame, table, status, app.services(), app.selected(Tab::Services));
        }
    }

    frame.render_widget(Footer::new().widget(footer, app.tab()), footer);

    if let Some(pending) = app.confirm() {
        PopupDialog::new("Confirm delete", vec![Line::from(pending.prompt.clone())])
            .fixed_width(52)
            .footer("y: Delete │ n/Esc: Cancel")
            .render(frame, area);
    }
    render_form_dialog(frame, app.form());
    render_notifications(frame, body, app.notifications());
}

fn tab_bar(active: Tab) -> Paragraph<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(HEADER_SEPARATOR)));
        }
        let label = format!("{} {}", tab.index() + 1, tab.title());
        let style = if *tab == active {
            Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED_TEXT)
        };
        spans.push(Span::styled(label, style));
    }
    Paragraph::new(Line::from(spans))
}

fn draw_list<R>(
    frame: &mut Frame<'_>,
    area: Rect,
    status: Rect,
    state: &ListState<R>,
    selected: usize,
) where
    R: Resource + TableRow,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
        .title(Span::styled(
            format!(" {} ", R::LABEL),
            Style::default().fg(HEADER_TEXT),
        ));

    if state.items.is_empty() {
        let message = if state.loading {
            Span::styled("Loading…", Style::default().fg(STATUS_WARN))
        } else if let Some(error) = &state.error {
            Span::styled(error.clone(), Style::default().fg(STATUS_ERROR))
        } else {
            Span::styled("No records", Style::default().fg(MUTED_TEXT))
        };
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
    } else {
        let header = Row::new(R::headers().iter().copied())
            .style(Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD));
        let rows = state.items.iter().map(|item| Row::new(item.cells()));
        let table = Table::new(rows, R::widths())
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(ACTIVE_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut table_state = TableState::default().with_selected(Some(selected));
        frame.render_stateful_widget(table, area, &mut table_state);
    }

    frame.render_widget(status_line(state), status);
}

fn status_line<R: Resource>(state: &ListState<R>) -> Paragraph<'static> {
    let pagination = &state.pagination;
    let mut spans = vec![Span::styled(
        format!(
            " Page {}/{} │ {} total │ {} per page",
            pagination.page,
            pagination.total_pages.max(1),
            pagination.total,
            state.query.limit
        ),
        Style::default().fg(MUTED_TEXT),
    )];
    if state.loading {
        spans.push(Span::styled("  ⟳ loading", Style::default().fg(STATUS_WARN)));
    }
    if let Some(error) = &state.error {
        if !state.items.is_empty() {
            spans.push(Span::styled(
                format!("  {}", error),
                Style::default().fg(STATUS_ERROR),
            ));
        }
    }
    Paragraph::new(Line::from(spans))
}
