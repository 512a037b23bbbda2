//! Base trait for intents.

/// Marker trait for intent objects: user input (key presses, form edits)
/// or system events (list loaded, request failed, tick).
pub trait Intent: Send + 'static {}
