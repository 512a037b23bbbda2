pub mod app;
pub mod events;
pub mod footer;
pub mod form;
pub mod header;
pub mod layout;
pub mod mvi;
pub mod notifications;
pub mod popup;
pub mod render;
pub mod runtime;
pub mod table;
pub mod terminal_guard;
pub mod theme;
pub mod worker;

pub use runtime::{run, Console};
