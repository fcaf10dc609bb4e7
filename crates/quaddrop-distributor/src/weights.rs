use num_bigint::BigUint;
use num_traits::Zero;
use quaddrop_common::math::isqrt;
use quaddrop_common::types::{Amount, BasisMode};

use crate::error::DistributionError;
use crate::state::{DistributionParams, DistributionResult, ValidatedEntry, WeightedRecord};

/// Pass 1 output. Only [`compute_weights`] builds one, so the denominator is
/// always non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSnapshot {
    records: Vec<WeightedRecord>,
    denominator: BigUint,
    total_basis: BigUint,
}

impl WeightedSnapshot {
    pub fn records(&self) -> &[WeightedRecord] {
        &self.records
    }

    /// Sum of all square-root weights.
    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    /// Plain sum of all basis balances.
    pub fn total_basis(&self) -> &BigUint {
        &self.total_basis
    }
}

/// Pass 1: weight every entry by the integer square root of its basis
/// balance and sum the weights.
pub fn compute_weights(
    entries: &[ValidatedEntry],
    mode: BasisMode,
) -> Result<WeightedSnapshot, DistributionError> {
    let (records, denominator, total_basis) = entries.iter().fold(
        (
            Vec::with_capacity(entries.len()),
            BigUint::zero(),
            BigUint::zero(),
        ),
        |(mut records, denominator, total_basis), entry| {
            let balance = entry.balance.basis(mode);
            let weight = isqrt(&balance);
            let denominator = denominator + &weight;
            let total_basis = total_basis + &balance;
            records.push(WeightedRecord {
                key: entry.key.clone(),
                balance,
                weight,
            });
            (records, denominator, total_basis)
        },
    );

    if denominator.is_zero() {
        return Err(DistributionError::ZeroDenominator);
    }

    Ok(WeightedSnapshot {
        records,
        denominator,
        total_basis,
    })
}

/// Pass 2: `allocation = floor(weight * total_pool / denominator)` for every
/// record, multiplying before dividing. The floor-division remainder is not
/// handed out to anyone.
pub fn allocate(weighted: &WeightedSnapshot, total_pool: &Amount) -> DistributionResult {
    let pool = total_pool.as_biguint();

    let (allocations, distributed) = weighted.records.iter().fold(
        (Vec::with_capacity(weighted.records.len()), BigUint::zero()),
        |(mut allocations, distributed), record| {
            let allocation = (&record.weight * pool) / &weighted.denominator;
            tracing::debug!(
                key = %record.key,
                balance = %record.balance,
                weight = %record.weight,
                allocation = %allocation,
                "allocated"
            );
            let distributed = distributed + &allocation;
            allocations.push((record.key.clone(), Amount::from(allocation)));
            (allocations, distributed)
        },
    );

    DistributionResult {
        denominator: weighted.denominator.clone(),
        allocations,
        distributed,
        total_basis: weighted.total_basis.clone(),
    }
}

/// Run both passes.
pub fn calculate(
    entries: &[ValidatedEntry],
    params: &DistributionParams,
) -> Result<DistributionResult, DistributionError> {
    let weighted = compute_weights(entries, params.basis_mode)?;
    Ok(allocate(&weighted, &params.total_pool))
}
