use std::marker::PhantomData;

use crate::api::Pagination;
use crate::domain::Resource;
use crate::store::intent::ListIntent;
use crate::store::state::ListState;
use crate::ui::mvi::Reducer;

pub struct ListReducer<R>(PhantomData<R>);

impl<R: Resource> Reducer for ListReducer<R> {
    type State = ListState<R>;
    type Intent = ListIntent<R>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::FetchStarted => {
                state.loading = true;
                state.error = None;
                state
            }
            ListIntent::FetchSucceeded(page) => {
                state.items = page.items;
                state.pagination = page.pagination;
                state.loading = false;
                state.error = None;
                state
            }
            ListIntent::FetchFailed(message) => {
                state.items.clear();
                state.pagination = Pagination {
                    page: state.query.page,
                    limit: state.query.limit,
                    ..Pagination::default()
                };
                state.loading = false;
                state.error = Some(message);
                state
            }
            ListIntent::SetFilter(filter) => {
                state.query.filter = filter;
                state.query.page = 1;
                state
            }
            ListIntent::SetPage(page) => {
                let last = state.pagination.total_pages;
                let page = if last > 0 { page.min(last) } else { page };
                state.query.page = page.max(1);
                state
            }
            ListIntent::SetLimit(limit) => {
                state.query.limit = limit.max(1);
                state.query.page = 1;
                state
            }
        }
    }
}
