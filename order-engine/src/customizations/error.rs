use thiserror::Error;

/// A customization payload that matches none of the known historical shapes
///
/// Never leaves the normalizer: `extract_customizations` turns it into an
/// empty summary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("line item is a {0}, not an object")]
    NotAnObject(&'static str),

    #[error("unsupported `{field}` payload: {found}")]
    UnsupportedPayload { field: String, found: &'static str },

    #[error("malformed `{field}`: expected {expected}, got {found}")]
    Malformed {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ShapeError {
    pub(crate) fn malformed(
        field: impl Into<String>,
        expected: &'static str,
        value: &serde_json::Value,
    ) -> Self {
        Self::Malformed {
            field: field.into(),
            expected,
            found: shared::error::json_type_name(value),
        }
    }
}

pub type ShapeResult<T> = Result<T, ShapeError>;
