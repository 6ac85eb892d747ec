//! Cart module
//!
//! - **identity**: identity keys for cart-line de-duplication
//! - **line_items**: the active cart, merging lines by identity key
//! - **validation**: bounds checks on incoming lines

pub mod identity;
pub mod line_items;
pub mod validation;

use shared::ModelError;
use thiserror::Error;

pub use identity::{IdentityKeyMode, identity_key, identity_key_with};
pub use line_items::{Cart, CartEntry};
pub use validation::validate_line_item;

/// Cart mutation errors
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ModelError),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Quantity {quantity} exceeds the per-line maximum for {key}")]
    QuantityExceeded { key: String, quantity: i32 },
}

pub type CartResult<T> = Result<T, CartError>;
