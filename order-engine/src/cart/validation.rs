//! Cart line validation

use shared::ModelError;
use shared::order::CartLineItem;

/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

fn require_price(value: f64, field: &'static str) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 || value > MAX_PRICE {
        return Err(ModelError::InvalidPrice { field, value });
    }
    Ok(())
}

pub fn require_quantity(quantity: i32) -> Result<(), ModelError> {
    if quantity <= 0 || quantity > MAX_QUANTITY {
        return Err(ModelError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Validate a line before it enters the cart
pub fn validate_line_item(item: &CartLineItem) -> Result<(), ModelError> {
    require_price(item.price, "price")?;
    if let Some(extra) = item.extra_charges {
        require_price(extra, "extraCharges")?;
    }
    require_quantity(item.quantity)?;

    if item.is_combo {
        match item.combo_items.as_deref() {
            Some(sub_items) if !sub_items.is_empty() => {
                for sub_item in sub_items {
                    require_quantity(sub_item.quantity)?;
                }
            }
            _ => return Err(ModelError::EmptyCombo(item.id.clone())),
        }
    }

    if let Some(toppings) = &item.toppings {
        for topping in toppings
            .whole_pizza
            .iter()
            .chain(&toppings.left_side)
            .chain(&toppings.right_side)
        {
            require_price(topping.price, "topping.price")?;
        }
    }

    if let Some(sauces) = &item.sauces {
        for price in sauces.iter().filter_map(|s| s.price) {
            require_price(price, "sauce.price")?;
        }
    }

    Ok(())
}
