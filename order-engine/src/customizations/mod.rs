//! Customization summaries for persisted line items
//!
//! Turns a line item of unknown historical shape into ordered, de-duplicated
//! display lines ("Pepperoni (Left)", "Thin Crust", "Sauces: Ranch", ...).
//!
//! # Resolution
//!
//! ```text
//! comboItems non-empty ──► combo lines (authoritative, stop here)
//!        │ otherwise
//!        ▼
//! item's own fields ──► per-entry rules
//!        +
//! first legacy field ──► shape dispatch ──► per-entry rules
//!        │
//!        ▼
//! trim, drop blanks, de-duplicate (first seen wins)
//! ```
//!
//! Any shape error collapses to an empty summary: a missing summary must never
//! block showing or printing the order.

mod combo;
mod entry;
mod error;
mod shape;

pub use error::{ShapeError, ShapeResult};

use entry::{EntryContext, extract_entry};
use shared::order::PersistedOrderItem;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Display lines for a persisted line item; never fails
pub fn extract_customizations(raw: &PersistedOrderItem) -> Vec<String> {
    match try_extract_customizations(raw) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(
                item = raw.name().unwrap_or("<unnamed>"),
                error = %e,
                "Unreadable customization payload, showing item without summary"
            );
            Vec::new()
        }
    }
}

/// Same as [`extract_customizations`], but reports why a payload was unreadable
pub fn try_extract_customizations(raw: &PersistedOrderItem) -> ShapeResult<Vec<String>> {
    let item = raw
        .as_object()
        .ok_or_else(|| ShapeError::NotAnObject(shared::error::json_type_name(raw.as_value())))?;

    if let Some(combo_items) = raw.combo_items() {
        let lines = finalize(combo::combo_lines(combo_items)?);
        if !lines.is_empty() {
            return Ok(lines);
        }
        debug!("Combo sub-items carry no customizations, trying item fields");
    }

    // The item's own size is never restated for itself
    let own = EntryContext {
        parent_size: None,
        emit_name: false,
    };
    let mut item_fields = item.clone();
    item_fields.remove("size");
    let mut lines = extract_entry(&item_fields, own)?.into_lines();

    if let Some((field, value)) = raw.legacy_customizations() {
        debug!(field, "Legacy customization field");
        lines.extend(shape::dispatch(raw, field, value)?);
    }

    Ok(finalize(lines))
}

/// Trim, drop blanks and keep the first occurrence of each line
fn finalize(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.clone()))
        .collect()
}
