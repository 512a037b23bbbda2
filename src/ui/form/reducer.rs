use crate::ui::form::intent::FormIntent;
use crate::ui::form::state::{FormDialogState, FormField};
use crate::ui::mvi::Reducer;

/// Longest value a single field accepts.
pub const MAX_FIELD_LEN: usize = 64;

pub struct FormReducer;

impl Reducer for FormReducer {
    type State = FormDialogState;
    type Intent = FormIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FormIntent::Open {
                purpose,
                title,
                specs,
                values,
            } => {
                let fields = specs
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| FormField {
                        spec: *spec,
                        value: values.get(i).cloned().unwrap_or_default(),
                        error: None,
                    })
                    .collect();
                FormDialogState::Visible {
                    purpose,
                    title,
                    fields,
                    focused: 0,
                }
            }
            FormIntent::Close => FormDialogState::Hidden,
            FormIntent::MoveUp => match state {
                FormDialogState::Visible {
                    purpose,
                    title,
                    fields,
                    focused,
                } => {
                    let focused = if focused == 0 {
                        fields.len().saturating_sub(1)
                    } else {
                        focused - 1
                    };
                    FormDialogState::Visible {
                        purpose,
                        title,
                        fields,
                        focused,
                    }
                }
                other => other,
            },
            FormIntent::MoveDown => match state {
                FormDialogState::Visible {
                    purpose,
                    title,
                    fields,
                    focused,
                } => {
                    let focused = if focused + 1 >= fields.len() {
                        0
                    } else {
                        focused + 1
                    };
                    FormDialogState::Visible {
                        purpose,
                        title,
                        fields,
                        focused,
                    }
                }
                other => other,
            },
            FormIntent::Input(ch) => edit_focused(state, |field| {
                if !ch.is_control() && field.value.chars().count() < MAX_FIELD_LEN {
                    field.value.push(ch);
                }
            }),
            FormIntent::Backspace => edit_focused(state, |field| {
                field.value.pop();
            }),
            FormIntent::ClearField => edit_focused(state, |field| field.value.clear()),
            FormIntent::Rejected(errors) => match state {
                FormDialogState::Visible {
                    purpose,
                    title,
                    mut fields,
                    focused,
                } => {
                    for field in fields.iter_mut() {
                        field.error = errors.message_for(field.spec.key).map(str::to_string);
                    }
                    // Jump to the first broken field.
                    let focused = fields
                        .iter()
                        .position(|f| f.error.is_some())
                        .unwrap_or(focused);
                    FormDialogState::Visible {
                        purpose,
                        title,
                        fields,
                        focused,
                    }
                }
                other => other,
            },
        }
    }
}

/// Apply `edit` to the focused field and clear its stale error.
fn edit_focused<F: FnOnce(&mut FormField)>(state: FormDialogState, edit: F) -> FormDialogState {
    match state {
        FormDialogState::Visible {
            purpose,
            title,
            mut fields,
            focused,
        } => {
            if let Some(field) = fields.get_mut(focused) {
                edit(field);
                field.error = None;
            }
            FormDialogState::Visible {
                purpose,
                title,
                fields,
                focused,
            }
        }
        other => other,
    }
}
