//! Shared order types
//!
//! Data model used by the cart, the customization normalizer and receipt
//! assembly: cart line items, schema-less persisted records and the receipt
//! envelope, plus the model-level error type.

pub mod error;
pub mod order;
pub mod types;
pub mod util;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use serde::{Deserialize, Serialize};
