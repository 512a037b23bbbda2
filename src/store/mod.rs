//! List view state for prices and services.
//!
//! ```text
//! screen ──→ ResourceStore ──→ ResourceApi ──→ backend
//!                 │
//!   ListIntent ──→ ListReducer ──→ ListState
//! ```

mod intent;
mod reducer;
mod resource_store;
mod state;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use resource_store::{ActionError, PriceStore, ResourceStore, ServiceStore};
pub use state::ListState;
