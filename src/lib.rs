//! Operator console for a logistics / ride-hailing backend: price and
//! service management over the backend's JSON API.

pub mod api;
pub mod config;
pub mod domain;
pub mod logging;
pub mod session;
pub mod store;
pub mod ui;
