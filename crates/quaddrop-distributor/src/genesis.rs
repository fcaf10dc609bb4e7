use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use quaddrop_common::types::Amount;

use crate::error::DistributionError;
use crate::msg::{GenesisBalancesMsg, RawAllocationMsg};

/// 32-byte account id of the target chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Parse 64 hex characters, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, DistributionError> {
        let invalid = |reason: String| DistributionError::InvalidAccountKey {
            key: s.to_string(),
            reason,
        };
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| invalid(e.to_string()))?;
        let id: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| invalid(format!("expected 32 bytes, got {}", b.len())))?;
        Ok(Self(id))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Balances ready for the target chain's genesis configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisAllocation {
    pub balances: Vec<(AccountId, u128)>,
}

impl GenesisAllocation {
    pub fn total(&self) -> BigUint {
        self.balances
            .iter()
            .fold(BigUint::zero(), |acc, (_, amount)| acc + *amount)
    }

    pub fn to_msg(&self) -> GenesisBalancesMsg {
        GenesisBalancesMsg {
            balances: self
                .balances
                .iter()
                .map(|(id, amount)| (id.to_string(), Amount::from(*amount)))
                .collect(),
        }
    }
}

/// Build the genesis balance list from a distribution list plus fixed
/// endowments.
///
/// Distribution entries with a zero amount are dropped. Endowments are
/// appended afterwards, in order, and kept even when zero.
pub fn parse_allocation(
    distribution: &RawAllocationMsg,
    endowments: &RawAllocationMsg,
) -> Result<GenesisAllocation, DistributionError> {
    let mut balances = Vec::with_capacity(distribution.balances.len() + endowments.balances.len());

    for (key, amount) in &distribution.balances {
        let entry = parse_balance(key, amount)?;
        if entry.1 > 0 {
            balances.push(entry);
        }
    }
    for (key, amount) in &endowments.balances {
        balances.push(parse_balance(key, amount)?);
    }

    Ok(GenesisAllocation { balances })
}

fn parse_balance(key: &str, amount: &str) -> Result<(AccountId, u128), DistributionError> {
    let id = AccountId::from_hex(key)?;
    let parsed: Amount = amount
        .parse()
        .map_err(|e| DistributionError::MalformedBalance {
            key: key.to_string(),
            field: "amount".to_string(),
            reason: format!("{amount:?} {e}"),
        })?;
    let value = parsed
        .to_u128()
        .ok_or_else(|| DistributionError::AmountOverflow {
            key: key.to_string(),
            amount: amount.to_string(),
        })?;
    Ok((id, value))
}
