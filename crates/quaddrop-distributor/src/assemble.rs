use quaddrop_common::types::{AccountKey, Amount, MigratedAccountRecord};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::DistributionError;
use crate::msg::{AccountEntryMsg, DistributionListMsg};

/// Default length of the trailing key substring in the distribution list:
/// the hex of a 32-byte account id at the end of a storage key.
pub const DEFAULT_SHORT_KEY_LEN: usize = 64;

/// Output contract A. Records keep their input order; none are dropped or merged.
pub fn assemble_accounts(
    records: impl IntoIterator<Item = (AccountKey, MigratedAccountRecord)>,
) -> Vec<AccountEntryMsg> {
    records
        .into_iter()
        .map(|(key, value)| AccountEntryMsg { key, value })
        .collect()
}

/// Output contract B.
pub fn assemble_distribution_list(
    allocations: &[(AccountKey, Amount)],
    short_key_len: usize,
) -> DistributionListMsg {
    DistributionListMsg {
        balances: allocations
            .iter()
            .map(|(key, amount)| (key.short(short_key_len).to_string(), amount.clone()))
            .collect(),
    }
}

/// Pretty JSON with four-space indentation and a trailing newline.
pub fn encode_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, DistributionError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
