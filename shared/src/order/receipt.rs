//! Receipt envelope
//!
//! Display-level view of an order, consumed by receipt rendering and the
//! printing collaborator. Built once (at checkout or when re-displaying a
//! historical order); afterwards only the print bookkeeping changes.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

// ============================================================================
// Channel & Fulfillment
// ============================================================================

/// Where the order was placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    /// Online ordering site
    Online,
    /// Point-of-sale client
    #[default]
    Pos,
}

impl OrderSource {
    /// Lenient parse of historical values (`online`, `web`, `pos`, `POS`, ...)
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "online" | "web" | "website" => Some(Self::Online),
            "pos" | "in-store" | "instore" => Some(Self::Pos),
            _ => None,
        }
    }
}

/// How the order is handed over
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FulfillmentType {
    #[default]
    Pickup,
    Delivery,
    DineIn,
}

impl FulfillmentType {
    /// Lenient parse (`dine-in`, `dine_in`, `dineIn`, `Delivery`, ...)
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "pickup" | "takeout" | "carryout" => Some(Self::Pickup),
            "delivery" => Some(Self::Delivery),
            "dinein" => Some(Self::DineIn),
            _ => None,
        }
    }
}

/// Print lifecycle, owned by the printing collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrintStatus {
    #[default]
    Pending,
    Printed,
    Failed,
}

// ============================================================================
// Sub-records
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PickupDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Receipt
// ============================================================================

/// Display-level line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i32,
    /// Unit price
    pub price: f64,
    /// price × quantity
    pub total: f64,
    /// Normalized, de-duplicated customization lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Vec<String>>,
}

/// Full order envelope for display and printing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptData {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    pub source: OrderSource,
    pub order_type: FulfillmentType,
    #[serde(default)]
    pub customer: CustomerInfo,
    pub items: Vec<ReceiptItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Unix milliseconds
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<DeliveryDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_details: Option<PickupDetails>,
    #[serde(default)]
    pub status: PrintStatus,
    #[serde(default)]
    pub print_attempts: u32,
}

impl ReceiptData {
    /// Count one more attempt at printing this receipt
    pub fn record_print_attempt(&mut self) {
        self.print_attempts = self.print_attempts.saturating_add(1);
    }

    pub fn mark_printed(&mut self) {
        self.record_print_attempt();
        self.status = PrintStatus::Printed;
    }

    pub fn mark_print_failed(&mut self) {
        self.record_print_attempt();
        self.status = PrintStatus::Failed;
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
