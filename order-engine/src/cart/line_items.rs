//! Active cart
//!
//! Lines are kept in insertion order and keyed by their identity key.
//! Adding a line whose key already exists merges quantities instead of
//! creating a second line.

use super::identity::{IdentityKeyMode, identity_key_with};
use super::validation::{MAX_QUANTITY, require_quantity, validate_line_item};
use super::{CartError, CartResult};
use crate::money;
use rust_decimal::Decimal;
use shared::order::CartLineItem;
use tracing::debug;

/// A cart line together with its current identity key
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub key: String,
    pub item: CartLineItem,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
    mode: IdentityKeyMode,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: IdentityKeyMode) -> Self {
        Self {
            entries: Vec::new(),
            mode,
        }
    }

    pub fn mode(&self) -> IdentityKeyMode {
        self.mode
    }

    /// Identity key this cart would assign to `item`
    pub fn key_for(&self, item: &CartLineItem) -> String {
        identity_key_with(item, self.mode)
    }

    /// Add a line, merging with an existing line of the same configuration
    ///
    /// Returns the identity key of the line that now holds the item.
    pub fn add_item(&mut self, item: CartLineItem) -> CartResult<String> {
        validate_line_item(&item)?;
        let key = self.key_for(&item);
        self.insert_or_merge(key.clone(), item)?;
        Ok(key)
    }

    /// Change a line's configuration
    ///
    /// The key is recomputed after `change` runs. If the new key matches
    /// another line, the two lines merge. Returns the line's new key.
    pub fn update_item<F>(&mut self, key: &str, change: F) -> CartResult<String>
    where
        F: FnOnce(&mut CartLineItem),
    {
        let index = self.position(key)?;
        let mut item = self.entries[index].item.clone();
        change(&mut item);
        validate_line_item(&item)?;

        let new_key = self.key_for(&item);
        if new_key == key {
            self.entries[index].item = item;
            return Ok(new_key);
        }

        if let Some(existing) = self.entries.iter().find(|e| e.key == new_key) {
            let merged = existing.item.quantity + item.quantity;
            if merged > MAX_QUANTITY {
                return Err(CartError::QuantityExceeded {
                    key: new_key,
                    quantity: merged,
                });
            }
        }

        let removed = self.entries.remove(index);
        debug!(old_key = %removed.key, new_key = %new_key, "Cart line reconfigured");

        match self.entries.iter_mut().find(|e| e.key == new_key) {
            Some(existing) => existing.item.quantity += item.quantity,
            None => self.entries.insert(
                index,
                CartEntry {
                    key: new_key.clone(),
                    item,
                },
            ),
        }
        Ok(new_key)
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, key: &str, quantity: i32) -> CartResult<()> {
        let index = self.position(key)?;
        if quantity <= 0 {
            self.entries.remove(index);
            return Ok(());
        }
        require_quantity(quantity)?;
        self.entries[index].item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, key: &str) -> Option<CartLineItem> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).item)
    }

    pub fn get(&self, key: &str) -> Option<&CartLineItem> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.item)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.entries.iter().map(|e| &e.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Units across all lines
    pub fn total_quantity(&self) -> i32 {
        self.entries.iter().map(|e| e.item.quantity).sum()
    }

    /// Sum of (price + extra charges) × quantity, rounded to cents
    pub fn subtotal(&self) -> f64 {
        let total: Decimal = self.items().map(money::cart_line_total).sum();
        money::to_f64(total)
    }

    fn position(&self, key: &str) -> CartResult<usize> {
        self.entries
            .iter()
            .position(|e| e.key == key)
            .ok_or_else(|| CartError::ItemNotFound(key.to_string()))
    }

    fn insert_or_merge(&mut self, key: String, item: CartLineItem) -> CartResult<()> {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => {
                let merged = existing.item.quantity + item.quantity;
                if merged > MAX_QUANTITY {
                    return Err(CartError::QuantityExceeded {
                        key,
                        quantity: merged,
                    });
                }
                existing.item.quantity = merged;
                debug!(key = %key, quantity = merged, "Merged cart line");
            }
            None => {
                debug!(key = %key, quantity = item.quantity, "Added cart line");
                self.entries.push(CartEntry { key, item });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{PizzaSize, Sauce, Topping, ToppingPlacement};

    fn pepperoni_pizza(quantity: i32) -> CartLineItem {
        CartLineItem::new("pizza-1", "Pepperoni Pizza", 12.0, quantity)
            .with_toppings(ToppingPlacement::whole(vec![Topping::new(
                "t-pep",
                "Pepperoni",
                1.5,
            )]))
            .with_size(PizzaSize::Medium)
    }

    #[test]
    fn test_add_merges_same_configuration() {
        let mut cart = Cart::new();
        let k1 = cart.add_item(pepperoni_pizza(1)).unwrap();
        let k3 = cart.add_item(pepperoni_pizza(3)).unwrap();

        assert_eq!(k1, k3);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&k1).unwrap().quantity, 4);
    }

    #[test]
    fn test_add_keeps_different_configurations_apart() {
        let mut cart = Cart::new();
        cart.add_item(pepperoni_pizza(1)).unwrap();
        cart.add_item(pepperoni_pizza(1).with_size(PizzaSize::Large))
            .unwrap();
        cart.add_item(pepperoni_pizza(1).half_and_half()).unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_add_rejects_invalid_line() {
        let mut cart = Cart::new();
        let err = cart.add_item(pepperoni_pizza(0)).unwrap_err();
        assert!(matches!(err, CartError::InvalidItem(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_respects_quantity_cap() {
        let mut cart = Cart::new();
        cart.add_item(pepperoni_pizza(MAX_QUANTITY)).unwrap();
        let err = cart.add_item(pepperoni_pizza(1)).unwrap_err();
        assert!(matches!(err, CartError::QuantityExceeded { .. }));
    }

    #[test]
    fn test_update_recomputes_key_in_place() {
        let mut cart = Cart::new();
        let soda = cart.add_item(CartLineItem::new("soda", "Soda", 2.0, 1)).unwrap();
        let key = cart.add_item(pepperoni_pizza(2)).unwrap();

        let new_key = cart
            .update_item(&key, |item| item.sauces = Some(vec![Sauce::new("Ranch")]))
            .unwrap();

        assert_ne!(key, new_key);
        assert!(cart.get(&key).is_none());
        assert_eq!(cart.get(&new_key).unwrap().quantity, 2);
        assert_eq!(cart.entries()[0].key, soda);
        assert_eq!(cart.entries()[1].key, new_key);
    }

    #[test]
    fn test_update_merges_into_matching_line() {
        let mut cart = Cart::new();
        let medium = cart.add_item(pepperoni_pizza(1)).unwrap();
        let large = cart
            .add_item(pepperoni_pizza(2).with_size(PizzaSize::Large))
            .unwrap();

        let key = cart
            .update_item(&large, |item| item.size = Some(PizzaSize::Medium))
            .unwrap();

        assert_eq!(key, medium);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&medium).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_quantity_only_keeps_key() {
        let mut cart = Cart::new();
        let key = cart.add_item(pepperoni_pizza(1)).unwrap();
        let same = cart.update_item(&key, |item| item.quantity = 5).unwrap();
        assert_eq!(key, same);
        assert_eq!(cart.get(&key).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_unknown_key() {
        let mut cart = Cart::new();
        let err = cart.update_item("nope", |_| {}).unwrap_err();
        assert!(matches!(err, CartError::ItemNotFound(_)));
    }

    #[test]
    fn test_set_quantity_and_remove() {
        let mut cart = Cart::new();
        let key = cart.add_item(pepperoni_pizza(1)).unwrap();

        cart.set_quantity(&key, 6).unwrap();
        assert_eq!(cart.get(&key).unwrap().quantity, 6);

        cart.set_quantity(&key, 0).unwrap();
        assert!(cart.is_empty());

        let key = cart.add_item(pepperoni_pizza(1)).unwrap();
        assert!(cart.remove_item(&key).is_some());
        assert!(cart.remove_item(&key).is_none());
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add_item(pepperoni_pizza(2).with_extra_charges(0.5)).unwrap();
        cart.add_item(CartLineItem::new("soda", "Soda", 1.99, 3)).unwrap();
        assert_eq!(cart.subtotal(), 30.97);
    }

    #[test]
    fn test_canonical_cart_merges_reordered_toppings() {
        let a = CartLineItem::new("pizza-1", "Pizza", 12.0, 1).with_toppings(
            ToppingPlacement::whole(vec![
                Topping::new("a", "Anchovies", 1.0),
                Topping::new("b", "Basil", 0.5),
            ]),
        );
        let mut b = a.clone();
        if let Some(t) = b.toppings.as_mut() {
            t.whole_pizza.reverse();
        }

        let mut ordered = Cart::new();
        ordered.add_item(a.clone()).unwrap();
        ordered.add_item(b.clone()).unwrap();
        assert_eq!(ordered.len(), 2);

        let mut canonical = Cart::with_mode(IdentityKeyMode::Canonical);
        canonical.add_item(a).unwrap();
        canonical.add_item(b).unwrap();
        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical.total_quantity(), 2);
    }
}
