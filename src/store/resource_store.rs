use thiserror::Error;

use crate::api::{ApiError, ResourceApi};
use crate::domain::{FormDraft, Resource, Service, ValidationError};
use crate::store::intent::ListIntent;
use crate::store::reducer::ListReducer;
use crate::store::state::ListState;
use crate::ui::mvi::Reducer;

/// Why a create/update/delete did not happen.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Invalid(err) => err.to_string(),
            ActionError::Api(err) => err.user_message(),
        }
    }
}

/// View-state container for one collection.
///
/// Lists never fail: a failed fetch leaves an empty list and an error
/// message in the state. Mutations return their error to the caller and,
/// on success, refetch the current page.
pub struct ResourceStore<R: Resource> {
    api: ResourceApi<R>,
    state: ListState<R>,
}

pub type PriceStore = ResourceStore<crate::domain::Price>;
pub type ServiceStore = ResourceStore<Service>;

impl<R: Resource> ResourceStore<R> {
    pub fn new(api: ResourceApi<R>, page_size: u32) -> Self {
        Self {
            api,
            state: ListState::with_limit(page_size),
        }
    }

    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    pub fn dispatch(&mut self, intent: ListIntent<R>) {
        self.state = ListReducer::<R>::reduce(std::mem::take(&mut self.state), intent);
    }

    /// Re-run the list request with the current query.
    pub async fn fetch(&mut self) {
        self.dispatch(ListIntent::FetchStarted);
        match self.api.list(&self.state.query).await {
            Ok(page) => {
                tracing::debug!(
                    count = page.items.len(),
                    page = page.pagination.page,
                    "{} list loaded",
                    R::LABEL
                );
                self.dispatch(ListIntent::FetchSucceeded(page));
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    error_type = err.error_type(),
                    status = ?err.status(),
                    "{} list failed",
                    R::LABEL
                );
                self.dispatch(ListIntent::FetchFailed(err.user_message()));
            }
        }
    }

    pub async fn set_filter(&mut self, filter: R::Filter) {
        self.dispatch(ListIntent::SetFilter(filter));
        self.fetch().await;
    }

    pub async fn set_page(&mut self, page: u32) {
        self.dispatch(ListIntent::SetPage(page));
        self.fetch().await;
    }

    /// New page size; paging restarts at page 1.
    pub async fn set_limit(&mut self, limit: u32) {
        self.dispatch(ListIntent::SetLimit(limit));
        self.fetch().await;
    }

    pub async fn next_page(&mut self) {
        if self.state.pagination.has_next() {
            let page = self.state.query.page + 1;
            self.set_page(page).await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.state.query.page > 1 {
            let page = self.state.query.page - 1;
            self.set_page(page).await;
        }
    }

    pub async fn create(&mut self, draft: R::Draft) -> Result<R, ActionError> {
        draft.validate()?;
        let created = self.mutation(self.api.create(&draft).await, "create")?;
        self.fetch().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, draft: R::Draft) -> Result<R, ActionError> {
        draft.validate()?;
        let updated = self.mutation(self.api.update(id, &draft).await, "update")?;
        self.fetch().await;
        Ok(updated)
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), ActionError> {
        self.mutation(self.api.delete(id).await, "delete")?;
        self.fetch().await;
        Ok(())
    }

    /// All drafts are validated before anything is sent.
    pub async fn bulk_create(&mut self, drafts: Vec<R::Draft>) -> Result<Vec<R>, ActionError> {
        for draft in &drafts {
            draft.validate()?;
        }
        let created = self.mutation(self.api.bulk_create(&drafts).await, "bulk create")?;
        self.fetch().await;
        Ok(created)
    }

    fn mutation<T>(&self, result: Result<T, ApiError>, action: &str) -> Result<T, ActionError> {
        result.map_err(|err| {
            tracing::warn!(
                error = %err,
                error_type = err.error_type(),
                status = ?err.status(),
                "{} {} failed",
                R::LABEL,
                action
            );
            ActionError::Api(err)
        })
    }
}

impl ResourceStore<Service> {
    pub async fn set_active(&mut self, id: &str, active: bool) -> Result<Service, ActionError> {
        let service = self.mutation(self.api.set_active(id, active).await, "status change")?;
        self.fetch().await;
        Ok(service)
    }
}
