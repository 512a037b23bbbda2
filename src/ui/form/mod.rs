mod dialog;
mod intent;
mod reducer;
mod state;

pub use dialog::render_form_dialog;
pub use intent::FormIntent;
pub use reducer::{FormReducer, MAX_FIELD_LEN};
pub use state::{FormDialogState, FormField, FormPurpose};
