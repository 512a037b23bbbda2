use crate::api::{ListQuery, Pagination};
use crate::domain::Resource;
use crate::ui::mvi::UiState;

/// View state of one resource list: what the table renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<R: Resource> {
    pub items: Vec<R>,
    pub loading: bool,
    /// Message of the last failed fetch; cleared when a fetch starts.
    pub error: Option<String>,
    pub pagination: Pagination,
    /// Filter and page used by the next fetch.
    pub query: ListQuery<R::Filter>,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::default(),
            query: ListQuery::default(),
        }
    }
}

impl<R: Resource> UiState for ListState<R> {}

impl<R: Resource> ListState<R> {
    pub fn with_limit(limit: u32) -> Self {
        let mut state = Self::default();
        state.query.limit = limit.max(1);
        state
    }
}
