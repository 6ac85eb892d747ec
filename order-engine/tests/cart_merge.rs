use order_engine::{Cart, IdentityKeyMode, identity_key, identity_key_with};
use shared::order::{CartLineItem, PizzaSize, Sauce, Topping, ToppingPlacement};

fn medium_pepperoni(quantity: i32) -> CartLineItem {
    CartLineItem::new("pizza-pep", "Pepperoni Pizza", 13.99, quantity)
        .with_toppings(ToppingPlacement::whole(vec![
            Topping::new("t-cheese", "Cheese", 0.0),
            Topping::new("t-pep", "Pepperoni", 1.5),
        ]))
        .with_size(PizzaSize::Medium)
}

#[test]
fn test_identical_pizzas_merge_across_quantities() {
    let one = medium_pepperoni(1);
    let three = medium_pepperoni(3);
    assert_eq!(identity_key(&one), identity_key(&three));

    let mut cart = Cart::new();
    let key = cart.add_item(one).unwrap();
    cart.add_item(three).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&key).unwrap().quantity, 4);
}

#[test]
fn test_extra_charges_do_not_split_lines() {
    let plain = medium_pepperoni(1);
    let charged = medium_pepperoni(1).with_extra_charges(1.25);
    assert_eq!(identity_key(&plain), identity_key(&charged));
}

#[test]
fn test_configuration_differences_split_lines() {
    let base = medium_pepperoni(1);
    let variants = vec![
        medium_pepperoni(1).with_size(PizzaSize::Large),
        medium_pepperoni(1).half_and_half(),
        medium_pepperoni(1).with_sauces(vec![Sauce::priced("Garlic", 0.75)]),
        medium_pepperoni(1).with_toppings(ToppingPlacement {
            whole_pizza: vec![Topping::new("t-cheese", "Cheese", 0.0)],
            left_side: vec![Topping::new("t-pep", "Pepperoni", 1.5)],
            right_side: vec![],
        }),
        medium_pepperoni(1).with_toppings(ToppingPlacement {
            whole_pizza: vec![Topping::new("t-cheese", "Cheese", 0.0)],
            left_side: vec![],
            right_side: vec![Topping::new("t-pep", "Pepperoni", 1.5)],
        }),
    ];

    let mut cart = Cart::new();
    cart.add_item(base.clone()).unwrap();
    for variant in variants {
        assert_ne!(identity_key(&base), identity_key(&variant));
        cart.add_item(variant).unwrap();
    }
    assert_eq!(cart.len(), 6);
}

#[test]
fn test_topping_order_matters_unless_canonical() {
    let a = medium_pepperoni(1);
    let mut b = medium_pepperoni(1);
    if let Some(toppings) = b.toppings.as_mut() {
        toppings.whole_pizza.reverse();
    }

    assert_ne!(identity_key(&a), identity_key(&b));
    assert_eq!(
        identity_key_with(&a, IdentityKeyMode::Canonical),
        identity_key_with(&b, IdentityKeyMode::Canonical)
    );
}

#[test]
fn test_key_is_stable_after_round_trip_through_json() {
    let item = medium_pepperoni(2).half_and_half();
    let json = serde_json::to_string(&item).unwrap();
    let back: CartLineItem = serde_json::from_str(&json).unwrap();
    assert_eq!(identity_key(&item), identity_key(&back));
}

#[test]
fn test_reconfiguring_into_existing_line_merges() {
    let mut cart = Cart::new();
    let medium = cart.add_item(medium_pepperoni(2)).unwrap();
    let large = cart
        .add_item(medium_pepperoni(1).with_size(PizzaSize::Large))
        .unwrap();
    assert_eq!(cart.len(), 2);

    let key = cart
        .update_item(&large, |item| item.size = Some(PizzaSize::Medium))
        .unwrap();
    assert_eq!(key, medium);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.total_quantity(), 3);
    assert_eq!(cart.subtotal(), 41.97);
}
