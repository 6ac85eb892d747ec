//! Order data model
//!
//! - `types`: cart-side line items (toppings, sauces, combos)
//! - `persisted`: schema-less records read back from the order store
//! - `receipt`: display-level receipt envelope

pub mod persisted;
pub mod receipt;
pub mod types;

// Re-exports
pub use persisted::{LEGACY_CUSTOMIZATION_FIELDS, PersistedOrder, PersistedOrderItem};
pub use receipt::{
    CustomerInfo, DeliveryDetails, FulfillmentType, OrderSource, PickupDetails, PrintStatus,
    ReceiptData, ReceiptItem,
};
pub use types::*;
