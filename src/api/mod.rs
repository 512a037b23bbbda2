//! HTTP client for the operator backend.
//!
//! ```text
//! ApiClient ── ResourceApi<Price>   (PriceApi)
//!           ├─ ResourceApi<Service> (ServiceApi, + set_active)
//!           └─ AuthApi
//! ```

mod auth;
mod client;
mod envelope;
mod error;
mod prices;
mod resource;
mod services;

pub use auth::{AuthApi, Login};
pub use client::ApiClient;
pub use envelope::{decode_item, decode_page, error_message, Page, Pagination};
pub use error::ApiError;
pub use prices::PriceApi;
pub use resource::{ListQuery, ResourceApi};
pub use services::ServiceApi;
