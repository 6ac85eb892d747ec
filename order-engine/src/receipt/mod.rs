//! Receipt assembly
//!
//! Two entry points build the same [`ReceiptData`]:
//! - [`build_receipt`] re-displays a historical order read from the order store
//! - [`receipt_from_cart`] builds the receipt once at checkout
//!
//! Customization lines always come from the normalizer, so a cart line and
//! the record it is later persisted as summarize identically.

use crate::cart::Cart;
use crate::customizations::extract_customizations;
use crate::money;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::order::{
    CustomerInfo, DeliveryDetails, FulfillmentType, OrderSource, PersistedOrder,
    PersistedOrderItem, PickupDetails, PrintStatus, ReceiptData, ReceiptItem,
};
use shared::util::{now_millis, parse_timestamp};
use shared::{ModelError, ModelResult};
use tracing::{debug, warn};

/// Item name shown when a record carries none
const UNNAMED_ITEM: &str = "Item";

/// Receipt computation settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceiptOptions {
    /// Fractional tax rate used when a record carries no tax amount
    pub tax_rate: f64,
}

/// Envelope fields known at checkout
#[derive(Debug, Clone, Default)]
pub struct CheckoutInfo {
    pub order_id: String,
    pub store_id: Option<String>,
    pub source: OrderSource,
    pub order_type: FulfillmentType,
    pub customer: CustomerInfo,
    pub payment_method: Option<String>,
    pub delivery_details: Option<DeliveryDetails>,
    pub pickup_details: Option<PickupDetails>,
}

/// Display line for one persisted item
///
/// The unit price includes the item's extra charge, as at checkout.
pub fn receipt_item(raw: &PersistedOrderItem) -> ModelResult<ReceiptItem> {
    let quantity = raw.quantity();
    let unit = money::to_decimal(raw.unit_price())
        .checked_add(money::to_decimal(raw.extra_charge().unwrap_or(0.0)))
        .ok_or(ModelError::AmountOutOfRange("unit price"))?;
    let total = money::line_total(unit, quantity).ok_or(ModelError::AmountOutOfRange("item total"))?;
    let customizations = extract_customizations(raw);

    Ok(ReceiptItem {
        name: raw.name().unwrap_or(UNNAMED_ITEM).to_string(),
        quantity,
        price: money::to_f64(unit),
        total: money::to_f64(total),
        customizations: (!customizations.is_empty()).then_some(customizations),
    })
}

/// Receipt for a historical order record
pub fn build_receipt(order: &PersistedOrder, opts: &ReceiptOptions) -> ModelResult<ReceiptData> {
    if !order.is_object() {
        return Err(ModelError::NotAnObject(shared::error::json_type_name(
            order.as_value(),
        )));
    }
    let order_id = order.order_id().ok_or(ModelError::MissingOrderId)?;

    let items = order
        .items()
        .iter()
        .map(receipt_item)
        .collect::<ModelResult<Vec<_>>>()?;

    let source = order
        .first_str(&["source", "channel"])
        .and_then(OrderSource::parse_lenient)
        .unwrap_or_default();
    let order_type = order
        .first_str(&["orderType", "fulfillmentType", "type"])
        .and_then(FulfillmentType::parse_lenient)
        .unwrap_or_default();

    let delivery_details = order.field("deliveryDetails").and_then(sub_record::<DeliveryDetails>);
    let pickup_details = order.field("pickupDetails").and_then(sub_record::<PickupDetails>);

    let subtotal = items
        .iter()
        .try_fold(Decimal::ZERO, |sum, i| sum.checked_add(money::to_decimal(i.total)))
        .ok_or(ModelError::AmountOutOfRange("subtotal"))?;
    let tax = match order.number("tax") {
        Some(tax) => money::to_decimal(tax),
        None => money::tax_for(subtotal, opts.tax_rate).ok_or(ModelError::AmountOutOfRange("tax"))?,
    };
    let delivery_fee = delivery_details
        .as_ref()
        .and_then(|d| d.delivery_fee)
        .map(money::to_decimal)
        .unwrap_or_default();
    let total = grand_total(subtotal, tax, delivery_fee)?;

    let timestamp = ["timestamp", "createdAt", "orderDate"]
        .iter()
        .find_map(|&name| order.field(name).and_then(parse_timestamp))
        .unwrap_or_else(|| {
            warn!(order_id = %order_id, "Order has no readable timestamp, using now");
            now_millis()
        });

    let status = order
        .field("status")
        .and_then(|v| serde_json::from_value::<PrintStatus>(v.clone()).ok())
        .unwrap_or_default();
    let print_attempts = order
        .number("printAttempts")
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0);

    debug!(
        order_id = %order_id,
        items = items.len(),
        subtotal = %subtotal,
        tax = %tax,
        "Built receipt from order record"
    );

    Ok(ReceiptData {
        order_id,
        store_id: order.first_str(&["storeId"]).map(str::to_string),
        source,
        order_type,
        customer: customer_info(order),
        items,
        subtotal: money::to_f64(subtotal),
        tax: money::to_f64(tax),
        total: money::to_f64(total),
        payment_method: order.first_str(&["paymentMethod"]).map(str::to_string),
        timestamp,
        delivery_details,
        pickup_details,
        status,
        print_attempts,
    })
}

/// Receipt built at checkout from the active cart
pub fn receipt_from_cart(
    cart: &Cart,
    checkout: CheckoutInfo,
    opts: &ReceiptOptions,
) -> ModelResult<ReceiptData> {
    let items: Vec<ReceiptItem> = cart
        .items()
        .map(|line| {
            let raw = PersistedOrderItem::new(serde_json::to_value(line).unwrap_or(Value::Null));
            let customizations = extract_customizations(&raw);
            let line_total = money::cart_line_total(line);
            let unit = money::to_decimal(line.price)
                + money::to_decimal(line.extra_charges.unwrap_or(0.0));
            ReceiptItem {
                name: line.name.clone(),
                quantity: line.quantity,
                price: money::to_f64(unit),
                total: money::to_f64(line_total),
                customizations: (!customizations.is_empty()).then_some(customizations),
            }
        })
        .collect();

    let subtotal: Decimal = cart.items().map(money::cart_line_total).sum();
    let tax = money::tax_for(subtotal, opts.tax_rate).ok_or(ModelError::AmountOutOfRange("tax"))?;
    let delivery_fee = checkout
        .delivery_details
        .as_ref()
        .and_then(|d| d.delivery_fee)
        .map(money::to_decimal)
        .unwrap_or_default();
    let total = grand_total(subtotal, tax, delivery_fee)?;

    Ok(ReceiptData {
        order_id: checkout.order_id,
        store_id: checkout.store_id,
        source: checkout.source,
        order_type: checkout.order_type,
        customer: checkout.customer,
        items,
        subtotal: money::to_f64(subtotal),
        tax: money::to_f64(tax),
        total: money::to_f64(total),
        payment_method: checkout.payment_method,
        timestamp: now_millis(),
        delivery_details: checkout.delivery_details,
        pickup_details: checkout.pickup_details,
        status: PrintStatus::Pending,
        print_attempts: 0,
    })
}

fn grand_total(subtotal: Decimal, tax: Decimal, delivery_fee: Decimal) -> ModelResult<Decimal> {
    subtotal
        .checked_add(tax)
        .and_then(|sum| sum.checked_add(delivery_fee))
        .ok_or(ModelError::AmountOutOfRange("total"))
}

fn sub_record<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone())
        .map_err(|e| debug!(error = %e, "Ignoring unreadable sub-record"))
        .ok()
}

/// Customer contact from a nested `customer` object or flat legacy fields
fn customer_info(order: &PersistedOrder) -> CustomerInfo {
    let nested = order.field("customer").and_then(sub_record::<CustomerInfo>);
    let mut info = nested.unwrap_or_default();

    if info.name.is_none() {
        info.name = order.first_str(&["customerName"]).map(str::to_string);
    }
    if info.phone.is_none() {
        info.phone = order.first_str(&["customerPhone", "phone"]).map(str::to_string);
    }
    if info.email.is_none() {
        info.email = order.first_str(&["customerEmail", "email"]).map(str::to_string);
    }
    info
}
