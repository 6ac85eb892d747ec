//! Order history replay
//!
//! Loads raw order records exported from the order store and turns each into
//! a receipt. Records that cannot become a receipt are reported, not fatal.

use crate::receipt::{ReceiptOptions, build_receipt};
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use shared::order::{PersistedOrder, ReceiptData};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// A record that could not be turned into a receipt
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedOrder {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ReplayReport {
    pub receipts: Vec<ReceiptData>,
    pub skipped: Vec<SkippedOrder>,
}

/// Parse an export: a single order, an array of orders, or `{ "orders": [...] }`
pub fn parse_orders(input: &str) -> anyhow::Result<Vec<PersistedOrder>> {
    let value: Value = serde_json::from_str(input).context("Order export is not valid JSON")?;
    let orders = match value {
        Value::Array(list) => list,
        Value::Object(mut map) => match map.remove("orders") {
            Some(Value::Array(list)) => list,
            Some(other) => {
                anyhow::bail!(
                    "`orders` must be an array, got {}",
                    shared::error::json_type_name(&other)
                )
            }
            None => vec![Value::Object(map)],
        },
        other => anyhow::bail!(
            "Expected an order object or array, got {}",
            shared::error::json_type_name(&other)
        ),
    };
    Ok(orders.into_iter().map(PersistedOrder::new).collect())
}

/// Read an export from `path`, or from stdin when no path is given
pub fn read_orders(path: Option<&Path>) -> anyhow::Result<Vec<PersistedOrder>> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    parse_orders(&input)
}

/// Build receipts for every record
pub fn replay(orders: &[PersistedOrder], opts: &ReceiptOptions) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (index, order) in orders.iter().enumerate() {
        match build_receipt(order, opts) {
            Ok(receipt) => report.receipts.push(receipt),
            Err(e) => {
                warn!(index, error = %e, "Skipping order record");
                report.skipped.push(SkippedOrder {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        receipts = report.receipts.len(),
        skipped = report.skipped.len(),
        "Replay finished"
    );
    report
}
