//! Shape dispatch for legacy customization payloads
//!
//! The payload found under a legacy field name has been written as:
//! - an object keyed `"0"`, `"1"`, ... (a list stored as a map)
//! - an array of customization entries
//! - a single customization object
//! - a plain string
//!
//! Matchers are tried in that order.

use super::entry::{EntryContext, extract_entry};
use super::error::{ShapeError, ShapeResult};
use serde_json::{Map, Value};
use shared::order::PersistedOrderItem;
use tracing::debug;

/// Whether array entries tagged `type: "pizza"` get a `Pizza N: ` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PizzaNumbering {
    On,
    Off,
}

pub(crate) fn dispatch(
    raw: &PersistedOrderItem,
    field: &'static str,
    value: &Value,
) -> ShapeResult<Vec<String>> {
    let ctx = EntryContext {
        parent_size: raw.size(),
        emit_name: true,
    };

    match value {
        Value::Object(map) if is_numeric_keyed(map) => {
            debug!(field, entries = map.len(), "Numeric-keyed customization map");
            entry_sequence(field, numeric_values(map), ctx, PizzaNumbering::Off)
        }
        Value::Array(list) => {
            let numbering = if raw.is_combo_named() {
                PizzaNumbering::On
            } else {
                PizzaNumbering::Off
            };
            debug!(field, entries = list.len(), ?numbering, "Customization list");
            entry_sequence(field, list.iter(), ctx, numbering)
        }
        Value::Object(map) => Ok(extract_entry(map, ctx)?.into_lines()),
        Value::String(s) => Ok(vec![s.clone()]),
        other => Err(ShapeError::UnsupportedPayload {
            field: field.to_string(),
            found: shared::error::json_type_name(other),
        }),
    }
}

/// Non-empty object whose keys are all unsigned integers
fn is_numeric_keyed(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .keys()
            .all(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()))
}

/// Values in ascending numeric key order ("2" before "10")
fn numeric_values(map: &Map<String, Value>) -> impl Iterator<Item = &Value> {
    let mut pairs: Vec<(u128, &Value)> = map
        .iter()
        .map(|(k, v)| (k.parse::<u128>().unwrap_or(u128::MAX), v))
        .collect();
    pairs.sort_by_key(|(k, _)| *k);
    pairs.into_iter().map(|(_, v)| v)
}

fn is_pizza_entry(entry: &Map<String, Value>) -> bool {
    entry
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.trim().eq_ignore_ascii_case("pizza"))
}

fn entry_sequence<'a>(
    field: &str,
    entries: impl Iterator<Item = &'a Value>,
    ctx: EntryContext<'_>,
    numbering: PizzaNumbering,
) -> ShapeResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut pizzas = 0;

    for (index, entry) in entries.enumerate() {
        match entry {
            Value::Null => {}
            Value::String(s) => lines.push(s.clone()),
            Value::Object(obj) if numbering == PizzaNumbering::On && is_pizza_entry(obj) => {
                pizzas += 1;
                let mut extracted = extract_entry(
                    obj,
                    EntryContext {
                        emit_name: false,
                        ..ctx
                    },
                )?;
                lines.extend(extracted.take_joined(&format!("Pizza {}: ", pizzas)));
                lines.extend(extracted.into_lines());
            }
            Value::Object(obj) => lines.extend(extract_entry(obj, ctx)?.into_lines()),
            other => {
                return Err(ShapeError::malformed(
                    format!("{}[{}]", field, index),
                    "object or string",
                    other,
                ));
            }
        }
    }

    Ok(lines)
}
