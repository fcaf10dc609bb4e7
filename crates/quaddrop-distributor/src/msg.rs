use quaddrop_common::types::{AccountKey, Amount, BasisMode, MigratedAccountRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DistributionError;
use crate::state::DistributionParams;

/// One account as delivered by the snapshot source.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct SnapshotEntryMsg {
    pub key: AccountKey,
    /// Absent and `null` both decode to `None`; ingestion reports the
    /// missing fields against `key`.
    #[serde(default)]
    pub data: Option<RawBalanceMsg>,
}

/// Balance fields as they appear in the snapshot. Kept untyped so that a
/// missing or mistyped field is reported against its account key instead of
/// failing the whole decode.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct RawBalanceMsg {
    #[serde(default)]
    pub free: Option<Value>,
    #[serde(default)]
    pub reserved: Option<Value>,
}

impl SnapshotEntryMsg {
    pub fn new(key: &str, free: &str, reserved: &str) -> Self {
        Self {
            key: AccountKey::from(key),
            data: Some(RawBalanceMsg {
                free: Some(Value::String(free.to_string())),
                reserved: Some(Value::String(reserved.to_string())),
            }),
        }
    }
}

fn default_basis_mode() -> String {
    BasisMode::default().as_str().to_string()
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionConfigMsg {
    /// Token amount to distribute, in minor units.
    pub total_pool: String,
    /// `"free"` or `"free+reserved"`.
    #[serde(default = "default_basis_mode")]
    pub basis_mode: String,
}

impl DistributionConfigMsg {
    pub fn new(total_pool: impl Into<String>, basis_mode: BasisMode) -> Self {
        Self {
            total_pool: total_pool.into(),
            basis_mode: basis_mode.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> Result<DistributionParams, DistributionError> {
        let total_pool: Amount =
            self.total_pool
                .parse()
                .map_err(|e| DistributionError::InvalidConfiguration {
                    reason: format!("totalPool {:?} {}", self.total_pool, e),
                })?;
        let basis_mode: BasisMode = self
            .basis_mode
            .parse()
            .map_err(|reason| DistributionError::InvalidConfiguration { reason })?;

        Ok(DistributionParams {
            total_pool,
            basis_mode,
        })
    }
}

/// Output contract A: one migrated account, keyed exactly as in the input.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct AccountEntryMsg {
    pub key: AccountKey,
    pub value: MigratedAccountRecord,
}

/// Output contract B: `[shortKey, amount]` pairs.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct DistributionListMsg {
    pub balances: Vec<(String, Amount)>,
}

/// Untyped `[accountId, amount]` pairs read back for genesis building.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawAllocationMsg {
    pub balances: Vec<(String, String)>,
}

/// Genesis balances: `["0x<32-byte hex>", amount]` pairs.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct GenesisBalancesMsg {
    pub balances: Vec<(String, Amount)>,
}
