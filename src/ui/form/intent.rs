use crate::domain::{FieldSpec, ValidationError};
use crate::ui::form::state::FormPurpose;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum FormIntent {
    Open {
        purpose: FormPurpose,
        title: String,
        specs: &'static [FieldSpec],
        values: Vec<String>,
    },
    Close,
    MoveUp,
    MoveDown,
    Input(char),
    Backspace,
    ClearField,
    /// Submit failed validation; attach messages to their fields.
    Rejected(ValidationError),
}

impl Intent for FormIntent {}
