//! Per-entry extraction rules
//!
//! A "customization entry" is one JSON object carrying any mix of toppings,
//! sauces, instructions and flags. The same rules apply to a line item's own
//! top-level fields, to each element of a legacy customization list, and to
//! combo sub-items.

use super::error::{ShapeError, ShapeResult};
use crate::money;
use serde_json::{Map, Value};
use shared::order::persisted::{EXTRA_CHARGE_FIELDS, non_blank_str, positive_charge};

/// Value treated as "no choice made" for crust and sauce type
const DEFAULT_CHOICE: &str = "regular";

/// How an entry relates to the item it belongs to
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EntryContext<'a> {
    /// The parent item's own size; an equal entry size is not restated
    pub parent_size: Option<&'a str>,
    /// Emit the entry's `name` (legacy modifier rows are just a name)
    pub emit_name: bool,
}

/// Lines produced by one entry, kept apart so callers can regroup them
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct EntryLines {
    pub name: Option<String>,
    pub toppings: Option<String>,
    pub instructions: Option<String>,
    pub sauces: Option<String>,
    /// Half & Half, extra charge, crust, sauce type (in that order)
    pub details: Vec<String>,
    /// Only set when it differs from the parent size
    pub size: Option<String>,
}

impl EntryLines {
    /// Lines in display order
    pub fn into_lines(self) -> Vec<String> {
        self.name
            .into_iter()
            .chain(self.toppings)
            .chain(self.instructions)
            .chain(self.sauces)
            .chain(self.details)
            .chain(self.size)
            .collect()
    }

    /// Toppings, sauces and instructions folded into one line behind `prefix`;
    /// returns None when the entry has none of them
    pub fn take_joined(&mut self, prefix: &str) -> Option<String> {
        let parts: Vec<String> = [
            self.toppings.take(),
            self.sauces.take(),
            self.instructions.take(),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| format!("{}{}", prefix, parts.join(", ")))
    }
}

/// Apply every per-entry rule to `entry`
pub(crate) fn extract_entry(entry: &Map<String, Value>, ctx: EntryContext<'_>) -> ShapeResult<EntryLines> {
    let field = |name: &str| entry.get(name).filter(|v| !v.is_null());

    let mut lines = EntryLines {
        toppings: field("toppings").map(toppings_line).transpose()?.flatten(),
        instructions: field("instructions").map(instructions_line).transpose()?.flatten(),
        sauces: field("sauces").map(sauces_line).transpose()?.flatten(),
        ..Default::default()
    };

    if ctx.emit_name
        && let Some(name) = field("name").and_then(non_blank_str)
    {
        lines.name = Some(match field("value").and_then(non_blank_str) {
            Some(value) => format!("{}: {}", name, value),
            None => name.to_string(),
        });
    }

    if field("isHalfAndHalf") == Some(&Value::Bool(true)) {
        lines.details.push("Half & Half".to_string());
    }

    if let Some(extra) = positive_charge(EXTRA_CHARGE_FIELDS.iter().filter_map(|&name| field(name))) {
        lines
            .details
            .push(format!("Extra: {}", money::format_amount("$", extra)));
    }

    if let Some(crust) = field("crust").and_then(chosen) {
        lines.details.push(format!("{} Crust", crust));
    }

    if let Some(sauce) = field("sauce").and_then(chosen) {
        lines.details.push(format!("{} Sauce", sauce));
    }

    if let Some(size) = field("size").and_then(non_blank_str)
        && !ctx
            .parent_size
            .is_some_and(|parent| parent.eq_ignore_ascii_case(size))
    {
        lines.size = Some(format!("Size: {}", size));
    }

    Ok(lines)
}

/// Non-default crust / sauce choice
fn chosen(value: &Value) -> Option<&str> {
    non_blank_str(value).filter(|v| !v.eq_ignore_ascii_case(DEFAULT_CHOICE))
}

/// Display name of a list element: a non-blank string, or an object's non-blank `name`
fn element_name(value: &Value) -> Option<&str> {
    match value {
        Value::String(_) => non_blank_str(value),
        Value::Object(obj) => obj.get("name").and_then(non_blank_str),
        _ => None,
    }
}

fn names_of(list: &[Value]) -> Vec<&str> {
    list.iter().filter_map(element_name).collect()
}

fn joined(names: Vec<&str>) -> Option<String> {
    (!names.is_empty()).then(|| names.join(", "))
}

/// Toppings flattened to one comma-separated line
///
/// Accepts the placement object (`wholePizza` / `leftSide` / `rightSide`),
/// a flat list, or a single string.
pub(crate) fn toppings_line(value: &Value) -> ShapeResult<Option<String>> {
    let names: Vec<String> = match value {
        Value::Object(placement) => {
            let mut names = Vec::new();
            for (side, suffix) in [("wholePizza", ""), ("leftSide", " (Left)"), ("rightSide", " (Right)")] {
                match placement.get(side) {
                    None | Some(Value::Null) => {}
                    Some(Value::Array(list)) => {
                        names.extend(names_of(list).into_iter().map(|n| format!("{}{}", n, suffix)))
                    }
                    Some(other) => {
                        return Err(ShapeError::malformed(format!("toppings.{}", side), "array", other));
                    }
                }
            }
            names
        }
        Value::Array(list) => names_of(list).into_iter().map(str::to_string).collect(),
        Value::String(_) => non_blank_str(value).map(str::to_string).into_iter().collect(),
        other => return Err(ShapeError::malformed("toppings", "object or array", other)),
    };

    Ok((!names.is_empty()).then(|| names.join(", ")))
}

/// `Instructions: a, b`; a list of only blank entries yields nothing
pub(crate) fn instructions_line(value: &Value) -> ShapeResult<Option<String>> {
    let names = match value {
        Value::Array(list) => names_of(list),
        Value::String(_) => non_blank_str(value).into_iter().collect(),
        other => return Err(ShapeError::malformed("instructions", "array or string", other)),
    };
    Ok(joined(names).map(|text| format!("Instructions: {}", text)))
}

/// `Sauces: a, b`, from entries that carry a name
pub(crate) fn sauces_line(value: &Value) -> ShapeResult<Option<String>> {
    let names = match value {
        Value::Array(list) => names_of(list),
        Value::String(_) => non_blank_str(value).into_iter().collect(),
        other => return Err(ShapeError::malformed("sauces", "array", other)),
    };
    Ok(joined(names).map(|text| format!("Sauces: {}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(entry: Value, ctx: EntryContext<'_>) -> Vec<String> {
        let obj = entry.as_object().unwrap();
        extract_entry(obj, ctx).unwrap().into_lines()
    }

    #[test]
    fn test_toppings_with_sides() {
        let line = toppings_line(&json!({
            "wholePizza": [{ "name": "Cheese" }],
            "leftSide": [{ "name": "Pepperoni" }],
            "rightSide": [{ "name": "Olives" }, { "id": "no-name" }],
        }))
        .unwrap();
        assert_eq!(line.as_deref(), Some("Cheese, Pepperoni (Left), Olives (Right)"));
    }

    #[test]
    fn test_empty_toppings_emit_nothing() {
        let line = toppings_line(&json!({ "wholePizza": [], "leftSide": [], "rightSide": [] }));
        assert_eq!(line, Ok(None));
        assert_eq!(toppings_line(&json!([])), Ok(None));
    }

    #[test]
    fn test_flat_topping_list() {
        let line = toppings_line(&json!(["Ham", { "name": "Pineapple" }, "  "])).unwrap();
        assert_eq!(line.as_deref(), Some("Ham, Pineapple"));
    }

    #[test]
    fn test_malformed_toppings() {
        assert!(toppings_line(&json!(3)).is_err());
        assert!(toppings_line(&json!({ "leftSide": "Pepperoni" })).is_err());
    }

    #[test]
    fn test_blank_instructions_suppressed() {
        assert_eq!(instructions_line(&json!(["", "  "])), Ok(None));
        assert_eq!(instructions_line(&json!([{ "name": "" }])), Ok(None));
        assert_eq!(
            instructions_line(&json!(["Well done", { "name": "Cut in squares" }, ""])),
            Ok(Some("Instructions: Well done, Cut in squares".to_string()))
        );
    }

    #[test]
    fn test_sauces_need_a_name() {
        assert_eq!(
            sauces_line(&json!([{ "name": "Ranch", "price": 0.5 }, { "price": 1 }])),
            Ok(Some("Sauces: Ranch".to_string()))
        );
        assert_eq!(sauces_line(&json!([{ "price": 1 }])), Ok(None));
    }

    #[test]
    fn test_defaults_are_suppressed() {
        let out = lines(
            json!({ "crust": "Regular", "sauce": "REGULAR", "extraCharge": 0 }),
            EntryContext::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_detail_lines() {
        let out = lines(
            json!({
                "isHalfAndHalf": true,
                "extraCharge": 1.5,
                "crust": "Stuffed",
                "sauce": "BBQ",
                "size": "Large",
            }),
            EntryContext { parent_size: Some("medium"), emit_name: false },
        );
        assert_eq!(
            out,
            vec!["Half & Half", "Extra: $1.50", "Stuffed Crust", "BBQ Sauce", "Size: Large"]
        );
    }

    #[test]
    fn test_size_matching_parent_not_restated() {
        let out = lines(
            json!({ "size": "Large" }),
            EntryContext { parent_size: Some("large"), emit_name: false },
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_negative_or_string_extra_ignored() {
        let out = lines(json!({ "extraCharge": -2 }), EntryContext::default());
        assert!(out.is_empty());
        let out = lines(json!({ "extraCharges": "2.00" }), EntryContext::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_name_rows() {
        let ctx = EntryContext { parent_size: None, emit_name: true };
        assert_eq!(lines(json!({ "name": "Extra Cheese", "price": 1 }), ctx), vec!["Extra Cheese"]);
        assert_eq!(lines(json!({ "name": "Dressing", "value": "Ranch" }), ctx), vec!["Dressing: Ranch"]);
        assert!(lines(json!({ "name": "Pizza" }), EntryContext::default()).is_empty());
    }

    #[test]
    fn test_take_joined() {
        let obj = json!({
            "toppings": ["Ham"],
            "sauces": [{ "name": "Garlic" }],
            "instructions": ["Crispy"],
            "crust": "Thin",
        });
        let mut entry = extract_entry(obj.as_object().unwrap(), EntryContext::default()).unwrap();
        assert_eq!(
            entry.take_joined("Pizza 1: ").as_deref(),
            Some("Pizza 1: Ham, Sauces: Garlic, Instructions: Crispy")
        );
        assert_eq!(entry.into_lines(), vec!["Thin Crust"]);
    }
}
