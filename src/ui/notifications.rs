//! Transient toasts for mutation results.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::mvi::{Intent, Reducer, UiState};
use crate::ui::theme::{STATUS_ERROR, STATUS_OK, STATUS_WARN};

/// Oldest toasts are dropped beyond this.
pub const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    /// Ticks left before the toast disappears.
    pub ttl: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationState {
    pub notices: Vec<Notice>,
}

impl UiState for NotificationState {}

#[derive(Debug, Clone)]
pub enum NotificationIntent {
    Push(Notice),
    Tick,
    DismissAll,
}

impl Intent for NotificationIntent {}

pub struct NotificationReducer;

impl Reducer for NotificationReducer {
    type State = NotificationState;
    type Intent = NotificationIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NotificationIntent::Push(notice) => {
                state.notices.push(notice);
                let overflow = state.notices.len().saturating_sub(MAX_NOTICES);
                state.notices.drain(..overflow);
                state
            }
            NotificationIntent::Tick => {
                for notice in state.notices.iter_mut() {
                    notice.ttl = notice.ttl.saturating_sub(1);
                }
                state.notices.retain(|n| n.ttl > 0);
                state
            }
            NotificationIntent::DismissAll => NotificationState::default(),
        }
    }
}

/// Stack toasts in the bottom-right corner of `area`.
pub fn render_notifications(frame: &mut Frame, area: Rect, state: &NotificationState) {
    let width = 48.min(area.width);
    let mut y = area.y + area.height;
    for notice in state.notices.iter().rev() {
        let height = 3;
        if y < area.y + height {
            break;
        }
        y -= height;
        let rect = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };
        let color = match notice.level {
            NoticeLevel::Success => STATUS_OK,
            NoticeLevel::Info => STATUS_WARN,
            NoticeLevel::Error => STATUS_ERROR,
        };
        let line = Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            rect,
        );
    }
}
