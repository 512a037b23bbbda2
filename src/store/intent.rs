use crate::api::Page;
use crate::domain::Resource;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ListIntent<R: Resource> {
    FetchStarted,
    FetchSucceeded(Page<R>),
    /// List failures are swallowed into an empty list plus this message.
    FetchFailed(String),
    /// New filter; paging restarts at page 1.
    SetFilter(R::Filter),
    SetPage(u32),
    SetLimit(u32),
}

impl<R: Resource> Intent for ListIntent<R> {}
