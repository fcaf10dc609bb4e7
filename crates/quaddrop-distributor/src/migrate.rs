use quaddrop_common::types::{AccountData, Amount, MigratedAccountRecord};

pub const MIGRATED_NONCE: u32 = 0;
pub const MIGRATED_CONSUMERS: u32 = 0;
/// Every migrated account is kept alive by exactly one provider reference.
pub const MIGRATED_PROVIDERS: u32 = 1;
pub const MIGRATED_SUFFICIENTS: u32 = 0;

/// Rewrite an allocation into the target account record. The allocation
/// becomes the free balance; every other field is a fixed default.
pub fn migrate_account(allocation: &Amount) -> MigratedAccountRecord {
    MigratedAccountRecord {
        nonce: MIGRATED_NONCE,
        consumers: MIGRATED_CONSUMERS,
        providers: MIGRATED_PROVIDERS,
        sufficients: MIGRATED_SUFFICIENTS,
        data: AccountData {
            free: allocation.clone(),
            reserved: Amount::zero(),
            misc_frozen: Amount::zero(),
            fee_frozen: Amount::zero(),
        },
    }
}
