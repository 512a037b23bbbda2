//! Base trait for view state.

/// Marker trait for state objects.
///
/// `Default` is the initial screen; `PartialEq` lets tests compare whole
/// states; `Send` lets the worker ship snapshots to the UI thread.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
