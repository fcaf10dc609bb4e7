use num_bigint::BigUint;
use quaddrop_common::types::{AccountKey, Amount, BasisMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Validated run configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionParams {
    pub total_pool: Amount,
    pub basis_mode: BasisMode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBalance {
    pub free: Amount,
    pub reserved: Amount,
}

impl RawBalance {
    /// The balance figure that feeds the weighting under `mode`.
    pub fn basis(&self, mode: BasisMode) -> BigUint {
        match mode {
            BasisMode::Free => self.free.as_biguint().clone(),
            BasisMode::FreeAndReserved => self.free.as_biguint() + self.reserved.as_biguint(),
        }
    }
}

/// A snapshot entry that passed ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub key: AccountKey,
    pub balance: RawBalance,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedRecord {
    pub key: AccountKey,
    /// Basis balance under the configured mode.
    pub balance: BigUint,
    /// `isqrt(balance)`
    pub weight: BigUint,
}

/// Outcome of the allocation pass, in snapshot order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionResult {
    pub denominator: BigUint,
    pub allocations: Vec<(AccountKey, Amount)>,
    pub distributed: BigUint,
    pub total_basis: BigUint,
}

/// Audit figures for one run. `remainder` is the floor-division dust left
/// undistributed; it is always smaller than `accounts`.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub accounts: u64,
    pub basis_mode: BasisMode,
    pub total_pool: Amount,
    pub total_basis: Amount,
    pub denominator: Amount,
    pub distributed: Amount,
    pub remainder: Amount,
}
