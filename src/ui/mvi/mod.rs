//! Model-View-Intent (MVI) primitives shared by every screen.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────── keys / responses ────┘
//! ```
//!
//! - **State**: everything a view needs to render
//! - **Intent**: a key press or a backend result
//! - **Reducer**: pure `(State, Intent) -> State`; network calls stay in the worker

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
