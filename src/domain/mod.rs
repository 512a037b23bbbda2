//! Records mirrored from the backend's JSON shape.
//!
//! The client enforces presence and parse checks only; uniqueness and
//! referential integrity belong to the server.

mod form;
mod price;
mod profile;
mod service;
mod window;

pub use form::{FieldError, FieldSpec, FormDraft, QueryFilter, ValidationError};
pub use price::{Price, PriceDraft, PriceFilter};
pub use profile::AdminProfile;
pub use service::{Service, ServiceDraft, ServiceFilter};
pub use window::TimeWindow;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A backend collection the console can list and mutate.
pub trait Resource: Clone + Debug + PartialEq + Send + Sync + DeserializeOwned + 'static {
    /// Create/update payload.
    type Draft: FormDraft + Serialize + Debug + PartialEq + Send + Sync + 'static;
    /// List filter, rendered into the query string.
    type Filter: FormDraft + QueryFilter + Default + Debug + PartialEq + Send + Sync + 'static;

    /// Collection path segment, also the key of the bulk-create payload.
    const COLLECTION: &'static str;
    /// Singular name used in messages.
    const LABEL: &'static str;

    fn id(&self) -> &str;

    fn to_draft(&self) -> Self::Draft;
}
