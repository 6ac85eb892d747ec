//! Combo sub-item summaries

use super::entry::{EntryContext, extract_entry};
use super::error::{ShapeError, ShapeResult};
use serde_json::Value;
use shared::order::persisted::non_blank_str;

/// One prefixed line per customization of each sub-item
///
/// Only toppings, sauces, size and instructions are summarized; crust, sauce
/// type, half & half and extra charges on a sub-item are not shown.
/// Sub-items are labelled by name, falling back to their position
/// (`Item 2: ...`). Sub-item sizes are always shown: a combo has no single
/// size of its own to compare against.
pub(crate) fn combo_lines(items: &[Value]) -> ShapeResult<Vec<String>> {
    let mut lines = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let sub_item = match item {
            Value::Null => continue,
            Value::Object(obj) => obj,
            other => return Err(ShapeError::malformed(format!("comboItems[{}]", index), "object", other)),
        };

        let label = sub_item
            .get("name")
            .and_then(non_blank_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Item {}", index + 1));

        let entry = extract_entry(sub_item, EntryContext::default())?;
        let body = entry
            .toppings
            .into_iter()
            .chain(entry.sauces)
            .chain(entry.size)
            .chain(entry.instructions);

        lines.extend(body.map(|line| format!("{}: {}", label, line)));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combo_lines_are_prefixed() {
        let items = json!([
            {
                "id": "c1",
                "name": "Large Pizza",
                "quantity": 1,
                "toppings": {
                    "wholePizza": [{ "name": "Cheese" }],
                    "leftSide": [{ "name": "Ham" }],
                    "rightSide": []
                },
                "sauces": [{ "name": "Ranch" }],
                "size": "large",
                "instructions": ["Well done"]
            },
            {
                "id": "c2",
                "quantity": 1,
                "sauces": [{ "name": "Buffalo" }, { "name": "BBQ" }]
            }
        ]);

        let lines = combo_lines(items.as_array().unwrap()).unwrap();
        assert_eq!(
            lines,
            vec![
                "Large Pizza: Cheese, Ham (Left)",
                "Large Pizza: Sauces: Ranch",
                "Large Pizza: Size: large",
                "Large Pizza: Instructions: Well done",
                "Item 2: Sauces: Buffalo, BBQ",
            ]
        );
    }

    #[test]
    fn test_sub_item_details_not_summarized() {
        let items = json!([{
            "id": "c1",
            "name": "Medium Pizza",
            "quantity": 1,
            "toppings": ["Mushrooms"],
            "crust": "Thin",
            "sauce": "BBQ",
            "isHalfAndHalf": true,
            "extraCharge": 1.5
        }]);
        assert_eq!(
            combo_lines(items.as_array().unwrap()).unwrap(),
            vec!["Medium Pizza: Mushrooms"]
        );
    }

    #[test]
    fn test_plain_sub_items_yield_nothing() {
        let items = json!([{ "id": "c1", "name": "Soda", "quantity": 2 }]);
        assert!(combo_lines(items.as_array().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_sub_item_is_malformed() {
        let items = json!([{ "name": "Soda" }, 7]);
        assert!(combo_lines(items.as_array().unwrap()).is_err());
    }
}
