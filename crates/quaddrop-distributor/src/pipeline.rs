use num_traits::Zero;
use quaddrop_common::types::{AccountKey, Amount};

use crate::assemble::{assemble_accounts, assemble_distribution_list};
use crate::error::DistributionError;
use crate::ingest::ingest_snapshot;
use crate::migrate::migrate_account;
use crate::msg::{AccountEntryMsg, DistributionConfigMsg, DistributionListMsg, SnapshotEntryMsg};
use crate::state::{DistributionParams, DistributionSummary};
use crate::weights::calculate;

/// Everything one run produces. Built only when every stage succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionOutput {
    pub accounts: Vec<AccountEntryMsg>,
    pub allocations: Vec<(AccountKey, Amount)>,
    pub summary: DistributionSummary,
}

impl DistributionOutput {
    pub fn distribution_list(&self, short_key_len: usize) -> DistributionListMsg {
        assemble_distribution_list(&self.allocations, short_key_len)
    }
}

/// Snapshot + configuration in, migrated accounts out.
///
/// Ingest → weigh → allocate → migrate → assemble. Any error aborts the whole
/// run; no partial output is returned.
pub fn distribute(
    snapshot: Vec<SnapshotEntryMsg>,
    config: &DistributionConfigMsg,
) -> Result<DistributionOutput, DistributionError> {
    let params = config.validate()?;
    distribute_with_params(snapshot, &params)
}

pub fn distribute_with_params(
    snapshot: Vec<SnapshotEntryMsg>,
    params: &DistributionParams,
) -> Result<DistributionOutput, DistributionError> {
    let entries = ingest_snapshot(snapshot)?;
    let result = calculate(&entries, params)?;

    let pool = params.total_pool.as_biguint();
    // allocate() never hands out more than the pool.
    let remainder = pool - &result.distributed;

    tracing::info!(
        accounts = result.allocations.len(),
        basis_mode = %params.basis_mode,
        total_pool = %pool,
        total_basis = %result.total_basis,
        denominator = %result.denominator,
        distributed = %result.distributed,
        remainder = %remainder,
        "quadratic distribution computed"
    );
    if !remainder.is_zero() {
        tracing::warn!(
            remainder = %remainder,
            "floor-division remainder left undistributed"
        );
    }

    let accounts = assemble_accounts(
        result
            .allocations
            .iter()
            .map(|(key, allocation)| (key.clone(), migrate_account(allocation))),
    );

    let summary = DistributionSummary {
        accounts: result.allocations.len() as u64,
        basis_mode: params.basis_mode,
        total_pool: params.total_pool.clone(),
        total_basis: Amount::from(result.total_basis),
        denominator: Amount::from(result.denominator),
        distributed: Amount::from(result.distributed),
        remainder: Amount::from(remainder),
    };

    Ok(DistributionOutput {
        accounts,
        allocations: result.allocations,
        summary,
    })
}
