use quaddrop_common::types::{AccountKey, Amount};
use serde_json::Value;

use crate::error::DistributionError;
use crate::msg::SnapshotEntryMsg;
use crate::state::{RawBalance, ValidatedEntry};

/// Decode a snapshot document: a JSON array of `{ key, data: { free, reserved } }`.
pub fn parse_snapshot(json: &str) -> Result<Vec<SnapshotEntryMsg>, DistributionError> {
    Ok(serde_json::from_str(json)?)
}

/// Validate every snapshot entry, preserving input order.
///
/// The first malformed entry aborts ingestion; nothing is returned for the
/// entries before it.
pub fn ingest_snapshot(
    entries: Vec<SnapshotEntryMsg>,
) -> Result<Vec<ValidatedEntry>, DistributionError> {
    entries.into_iter().map(validate_entry).collect()
}

pub fn validate_entry(entry: SnapshotEntryMsg) -> Result<ValidatedEntry, DistributionError> {
    let data = entry.data.unwrap_or_default();
    let free = parse_balance_field(&entry.key, "free", data.free.as_ref())?;
    let reserved = parse_balance_field(&entry.key, "reserved", data.reserved.as_ref())?;

    Ok(ValidatedEntry {
        key: entry.key,
        balance: RawBalance { free, reserved },
    })
}

fn parse_balance_field(
    key: &AccountKey,
    field: &str,
    value: Option<&Value>,
) -> Result<Amount, DistributionError> {
    let malformed = |reason: String| DistributionError::MalformedBalance {
        key: key.to_string(),
        field: field.to_string(),
        reason,
    };

    match value {
        None | Some(Value::Null) => Err(malformed("is missing".to_string())),
        Some(Value::String(s)) => s
            .parse::<Amount>()
            .map_err(|e| malformed(format!("{s:?} {e}"))),
        Some(other) => Err(malformed(format!(
            "must be a decimal string, got {other}"
        ))),
    }
}
