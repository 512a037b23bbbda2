use crate::domain::FieldSpec;
use crate::ui::mvi::UiState;

/// What submitting the form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPurpose {
    CreatePrice,
    EditPrice { id: String },
    FilterPrices,
    CreateService,
    EditService { id: String },
    FilterServices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    /// Validation message from the last rejected submit.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormDialogState {
    #[default]
    Hidden,
    Visible {
        purpose: FormPurpose,
        title: String,
        fields: Vec<FormField>,
        focused: usize,
    },
}

impl UiState for FormDialogState {}

impl FormDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Current text of every field, in field order.
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Visible { fields, .. } => fields.iter().map(|f| f.value.clone()).collect(),
            Self::Hidden => Vec::new(),
        }
    }

    pub fn purpose(&self) -> Option<&FormPurpose> {
        match self {
            Self::Visible { purpose, .. } => Some(purpose),
            Self::Hidden => None,
        }
    }
}
