//! Local login state.
//!
//! Holds what a browser would keep in a cookie (the auth token) and in
//! local storage (the admin profile shown in the header).

mod credentials;
mod store;

pub use credentials::SecureString;
pub use store::{Session, SessionError, SessionStore};
