//! Error types for the shared crate

use thiserror::Error;

/// Data model errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Record is not a JSON object
    #[error("Invalid record: expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Order envelope without a usable id
    #[error("Order record has no orderId")]
    MissingOrderId,

    /// Quantity out of range
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    /// Price is negative, non-finite or too large
    #[error("Invalid price for {field}: {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    /// Line flagged as a combo without any sub-items
    #[error("Combo line {0} has no combo items")]
    EmptyCombo(String),

    /// Amount arithmetic left the representable decimal range
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(&'static str),
}

/// Result type for data model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Human-readable JSON type name, for error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
