//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for the data model.

use rust_decimal::prelude::*;
use shared::order::CartLineItem;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; non-finite values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed two-decimal rendering with a currency symbol (`$3.50`)
pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, round_money(to_decimal(value)))
}

/// unit_price × quantity, None on overflow
pub fn line_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// (price + extra charges) × quantity for a cart line
pub fn cart_line_total(item: &CartLineItem) -> Decimal {
    let unit = to_decimal(item.price) + to_decimal(item.extra_charges.unwrap_or(0.0));
    unit * Decimal::from(item.quantity)
}

/// Tax on a subtotal at a fractional rate (0.0825 = 8.25%), None on overflow
pub fn tax_for(subtotal: Decimal, rate: f64) -> Option<Decimal> {
    subtotal.checked_mul(to_decimal(rate)).map(round_money)
}
