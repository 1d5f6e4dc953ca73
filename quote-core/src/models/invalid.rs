use thiserror::Error;

/// A configuration code that does not name any member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}'")]
pub struct InvalidConfiguration {
    pub field: &'static str,
    pub value: String,
}

impl InvalidConfiguration {
    pub fn new(
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}
