//! Cart-side order types
//!
//! These are the strongly-typed shapes produced by the ordering front-ends at
//! cart-mutation time. Historical records read back from the order store are
//! NOT guaranteed to match them; see [`super::persisted`] for that side.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Toppings & Sauces
// ============================================================================

/// A configurable addition (pepperoni, mushrooms, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topping {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

impl Topping {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Toppings partitioned by where they go on the pizza
///
/// A topping in `left_side` / `right_side` implies the pizza is half-and-half.
/// `whole_pizza` toppings apply regardless of the split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToppingPlacement {
    #[serde(default)]
    pub whole_pizza: Vec<Topping>,
    #[serde(default)]
    pub left_side: Vec<Topping>,
    #[serde(default)]
    pub right_side: Vec<Topping>,
}

impl ToppingPlacement {
    /// Whole-pizza toppings only
    pub fn whole(toppings: Vec<Topping>) -> Self {
        Self {
            whole_pizza: toppings,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.whole_pizza.is_empty() && self.left_side.is_empty() && self.right_side.is_empty()
    }

    /// True when either half carries its own toppings
    pub fn has_sides(&self) -> bool {
        !self.left_side.is_empty() || !self.right_side.is_empty()
    }

    /// Copy with every placement list in canonical (id, name) order
    pub fn sorted(&self) -> Self {
        let sort = |list: &[Topping]| {
            let mut list = list.to_vec();
            list.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
            list
        };
        Self {
            whole_pizza: sort(&self.whole_pizza),
            left_side: sort(&self.left_side),
            right_side: sort(&self.right_side),
        }
    }
}

/// Dipping / base sauce selection, optionally priced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sauce {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Sauce {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
        }
    }

    pub fn priced(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
        }
    }
}

// ============================================================================
// Size
// ============================================================================

/// Pizza size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

impl PizzaSize {
    /// Wire value (`small`, `medium`, `large`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Cart Line Items
// ============================================================================

/// One constituent of a combo purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComboSubItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toppings: Option<ToppingPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sauces: Option<Vec<Sauce>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PizzaSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
}

fn default_quantity() -> i32 {
    1
}

/// A purchasable unit in the active cart
///
/// The cart key (`uniqueId` on the front-ends) is deliberately not a field:
/// it is derived from the configuration every time it is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Base product id
    pub id: String,
    pub name: String,
    /// Unit price of the configured product
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toppings: Option<ToppingPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sauces: Option<Vec<Sauce>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PizzaSize>,
    #[serde(default)]
    pub is_half_and_half: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_combo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_items: Option<Vec<ComboSubItem>>,
    /// Per-unit surcharge on top of `price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_charges: Option<f64>,
}

impl CartLineItem {
    /// Plain product with no customization
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, quantity: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            toppings: None,
            sauces: None,
            size: None,
            is_half_and_half: false,
            is_combo: false,
            combo_items: None,
            extra_charges: None,
        }
    }

    /// An empty placement is stored as no toppings; toppings on either half
    /// mark the line half-and-half
    pub fn with_toppings(mut self, toppings: ToppingPlacement) -> Self {
        self.is_half_and_half |= toppings.has_sides();
        self.toppings = (!toppings.is_empty()).then_some(toppings);
        self
    }

    pub fn with_sauces(mut self, sauces: Vec<Sauce>) -> Self {
        self.sauces = Some(sauces);
        self
    }

    pub fn with_size(mut self, size: PizzaSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn half_and_half(mut self) -> Self {
        self.is_half_and_half = true;
        self
    }

    pub fn with_combo_items(mut self, items: Vec<ComboSubItem>) -> Self {
        self.is_combo = !items.is_empty();
        self.combo_items = Some(items);
        self
    }

    pub fn with_extra_charges(mut self, extra: f64) -> Self {
        self.extra_charges = Some(extra);
        self
    }
}
