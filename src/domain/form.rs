use thiserror::Error;

/// Static description of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Placeholder shown while the field is empty.
    pub hint: &'static str,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self {
            key,
            label,
            required: true,
            hint,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str, hint: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
            hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// One or more fields failed presence or parse checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", summarize(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }
}

/// Collects field errors while a draft is being parsed from form text.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub(crate) fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Trimmed value; records "is required" when empty.
    pub(crate) fn required(&mut self, field: &'static str, value: Option<&String>) -> String {
        let value = value.map(|v| v.trim()).unwrap_or_default();
        if value.is_empty() {
            self.fail(field, "is required");
        }
        value.to_string()
    }

    pub(crate) fn number(&mut self, field: &'static str, value: Option<&String>) -> f64 {
        let raw = self.required(field, value);
        if raw.is_empty() {
            return 0.0;
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => n,
            Ok(_) => {
                self.fail(field, "must be a non-negative number");
                0.0
            }
            Err(_) => {
                self.fail(field, "must be a number");
                0.0
            }
        }
    }

    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                fields: self.errors,
            })
        }
    }
}

/// Empty strings become `None`.
pub(crate) fn optional_text(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A record that can be edited through a text form.
///
/// Values are positional and follow the order of `fields()`.
pub trait FormDraft: Sized + Clone {
    fn fields() -> &'static [FieldSpec];

    fn to_values(&self) -> Vec<String>;

    fn from_values(values: &[String]) -> Result<Self, ValidationError>;

    /// Checks applied to drafts that did not come through the form
    /// (JSON imports, CLI payloads).
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Filters that become query-string parameters.
pub trait QueryFilter {
    /// Non-empty `(name, value)` pairs; unset filters are omitted.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}
