//! Cart line identity keys
//!
//! The identity key decides whether two cart lines are "the same customized
//! product". Lines with equal keys are merged by adding quantities.
//!
//! Key = `"<product id>-<canonical configuration JSON>"` where the
//! configuration record is, in this field order:
//! - `toppings`: JSON of the topping placement, or `""`
//! - `sauces`: JSON of the sauce list, or `""`
//! - `size`: wire size, or `""`
//! - `isHalfAndHalf`: bool
//!
//! Quantity, extra charges and combo contents never participate. Integral
//! prices are written without a fraction (`2`, not `2.0`), as browser-side
//! `JSON.stringify` writes them.

use serde::{Serialize, Serializer};
use shared::order::{CartLineItem, Sauce, Topping, ToppingPlacement};

/// Largest integer a browser number holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// How list order inside the configuration affects the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityKeyMode {
    /// List order participates: the same toppings picked in a different order
    /// produce a different key. Same layout as keys built by the web cart.
    #[default]
    Ordered,
    /// Topping and sauce lists are sorted before serialization
    Canonical,
}

impl IdentityKeyMode {
    /// Parse `ordered` / `canonical` (case-insensitive)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ordered" => Some(Self::Ordered),
            "canonical" | "sorted" => Some(Self::Canonical),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentityConfig<'a> {
    toppings: String,
    sauces: String,
    size: &'a str,
    is_half_and_half: bool,
}

struct KeyNumber(f64);

impl Serialize for KeyNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

#[derive(Serialize)]
struct KeyTopping<'a> {
    id: &'a str,
    name: &'a str,
    price: KeyNumber,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyPlacement<'a> {
    whole_pizza: Vec<KeyTopping<'a>>,
    left_side: Vec<KeyTopping<'a>>,
    right_side: Vec<KeyTopping<'a>>,
}

#[derive(Serialize)]
struct KeySauce<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<KeyNumber>,
}

/// Identity key with list order participating
pub fn identity_key(item: &CartLineItem) -> String {
    identity_key_with(item, IdentityKeyMode::Ordered)
}

/// Identity key under an explicit [`IdentityKeyMode`]
pub fn identity_key_with(item: &CartLineItem, mode: IdentityKeyMode) -> String {
    let toppings = match (&item.toppings, mode) {
        (Some(t), IdentityKeyMode::Ordered) => to_json(&placement_key(t)),
        (Some(t), IdentityKeyMode::Canonical) => to_json(&placement_key(&t.sorted())),
        (None, _) => String::new(),
    };

    let sauces = match (&item.sauces, mode) {
        (Some(s), IdentityKeyMode::Ordered) => to_json(&sauces_key(s)),
        (Some(s), IdentityKeyMode::Canonical) => to_json(&sauces_key(&sorted_sauces(s))),
        (None, _) => String::new(),
    };

    let config = IdentityConfig {
        toppings,
        sauces,
        size: item.size.map(|s| s.as_str()).unwrap_or(""),
        is_half_and_half: item.is_half_and_half,
    };

    format!("{}-{}", item.id, to_json(&config))
}

fn placement_key(placement: &ToppingPlacement) -> KeyPlacement<'_> {
    KeyPlacement {
        whole_pizza: toppings_key(&placement.whole_pizza),
        left_side: toppings_key(&placement.left_side),
        right_side: toppings_key(&placement.right_side),
    }
}

fn toppings_key(toppings: &[Topping]) -> Vec<KeyTopping<'_>> {
    toppings
        .iter()
        .map(|t| KeyTopping {
            id: &t.id,
            name: &t.name,
            price: KeyNumber(t.price),
        })
        .collect()
}

fn sauces_key(sauces: &[Sauce]) -> Vec<KeySauce<'_>> {
    sauces
        .iter()
        .map(|s| KeySauce {
            name: &s.name,
            price: s.price.map(KeyNumber),
        })
        .collect()
}

fn sorted_sauces(sauces: &[Sauce]) -> Vec<Sauce> {
    let mut sauces = sauces.to_vec();
    sauces.sort_by(|a, b| a.name.cmp(&b.name));
    sauces
}

// Plain data with string keys; serde_json cannot fail here and writes
// non-finite floats as null.
fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
