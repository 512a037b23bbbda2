//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place where view state changes.
///
/// Must stay free of I/O so it can be unit tested and replayed.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
