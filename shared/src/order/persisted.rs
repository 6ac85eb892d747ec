//! Persisted order records
//!
//! Records come back from the order store exactly as some historical version
//! of the ordering system wrote them. Nothing about their shape is enforced,
//! so they are kept as raw JSON and read through tolerant accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names under which older clients stored the customization payload,
/// in lookup priority order.
pub const LEGACY_CUSTOMIZATION_FIELDS: [&str; 5] =
    ["customizations", "modifiers", "options", "extras", "additions"];

/// Keys an extra charge has been stored under, in lookup order
pub const EXTRA_CHARGE_FIELDS: [&str; 2] = ["extraCharge", "extraCharges"];

/// First JSON number among `values`, kept only when positive
pub fn positive_charge<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<f64> {
    values
        .into_iter()
        .find_map(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Read a JSON number, accepting numeric strings written by older clients
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Non-blank trimmed string value
pub fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Line Items
// ============================================================================

/// A line item as found at rest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct PersistedOrderItem(pub Value);

impl PersistedOrderItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    /// Field lookup; `null` counts as absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Display name (`name`, falling back to `productName`)
    pub fn name(&self) -> Option<&str> {
        self.field("name")
            .and_then(non_blank_str)
            .or_else(|| self.field("productName").and_then(non_blank_str))
    }

    /// The item's own size, used to avoid restating it per customization
    pub fn size(&self) -> Option<&str> {
        self.field("size").and_then(non_blank_str)
    }

    /// Quantity, defaulting to 1 when missing or unusable
    pub fn quantity(&self) -> i32 {
        self.field("quantity")
            .and_then(lenient_f64)
            .map(|q| q.trunc() as i32)
            .filter(|&q| q > 0)
            .unwrap_or(1)
    }

    /// Unit price, defaulting to 0
    pub fn unit_price(&self) -> f64 {
        self.field("price").and_then(lenient_f64).unwrap_or(0.0)
    }

    /// Extra charge per unit carried on the item itself
    pub fn extra_charge(&self) -> Option<f64> {
        positive_charge(EXTRA_CHARGE_FIELDS.iter().filter_map(|&name| self.field(name)))
    }

    /// Non-empty `comboItems` list, if any
    pub fn combo_items(&self) -> Option<&Vec<Value>> {
        self.field("comboItems")
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
    }

    /// Whether the product name marks it as a combo ("Pizza Combo", "combo deal", ...)
    pub fn is_combo_named(&self) -> bool {
        self.name()
            .map(|name| name.to_lowercase().contains("combo"))
            .unwrap_or(false)
    }

    /// First legacy customization field present on the record
    pub fn legacy_customizations(&self) -> Option<(&'static str, &Value)> {
        LEGACY_CUSTOMIZATION_FIELDS
            .iter()
            .find_map(|&name| self.field(name).map(|v| (name, v)))
    }
}

impl From<Value> for PersistedOrderItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ============================================================================
// Orders
// ============================================================================

/// A whole order envelope as found at rest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct PersistedOrder(pub Value);

impl PersistedOrder {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    /// Field lookup; `null` counts as absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// First non-blank string among the given field names
    pub fn first_str(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|&name| self.field(name).and_then(non_blank_str))
    }

    /// `orderId`, falling back to `id`; numeric ids are stringified
    pub fn order_id(&self) -> Option<String> {
        ["orderId", "id"].iter().find_map(|&name| match self.field(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Line items; anything other than an array reads as no items
    pub fn items(&self) -> Vec<PersistedOrderItem> {
        self.field("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(PersistedOrderItem).collect())
            .unwrap_or_default()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(lenient_f64)
    }
}

impl From<Value> for PersistedOrder {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
