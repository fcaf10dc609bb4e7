//! Integration tests for the quaddrop distribution pipeline.
//!
//! These tests drive the library the way the CLI does: JSON snapshot text in,
//! encoded output artefacts out. They cover the worked example, both output
//! contracts, the genesis loader and the all-or-nothing failure behaviour.
//!
//! Run:
//! ```bash
//! cargo test -p quaddrop-integration-tests
//! ```

use num_bigint::BigUint;
use quaddrop_common::digest::artefact_digest_hex;
use quaddrop_common::types::{Amount, BasisMode};
use quaddrop_distributor::assemble::{encode_pretty, DEFAULT_SHORT_KEY_LEN};
use quaddrop_distributor::genesis::parse_allocation;
use quaddrop_distributor::ingest::parse_snapshot;
use quaddrop_distributor::msg::{DistributionConfigMsg, RawAllocationMsg};
use quaddrop_distributor::{distribute, DistributionError, DistributionOutput};

// ─── Constants ───

/// 5,000,000 tokens with 18 decimals.
const POOL_5M: &str = "5000000000000000000000000";

/// 2,500,000 tokens with 18 decimals.
const POOL_2_5M: &str = "2500000000000000000000000";

// ─── Helpers ───

/// A system.account storage key: 32-byte prefix, blake2_128 hash, then the
/// account id as the trailing 32 bytes.
fn storage_key(account_byte: u8) -> String {
    format!(
        "0x26aa394eea5630e07c48ae0c9558cef7b99d880ec681799c0cf30e8886371da9{}{}",
        "5f".repeat(16),
        hex_byte(account_byte).repeat(32)
    )
}

fn hex_byte(b: u8) -> String {
    format!("{b:02x}")
}

fn snapshot_json(entries: &[(String, &str, &str)]) -> String {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|(key, free, reserved)| {
            serde_json::json!({
                "key": key,
                "data": { "free": free, "reserved": reserved, "miscFrozen": "0", "feeFrozen": "0" }
            })
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}

fn run(json: &str, pool: &str, mode: BasisMode) -> Result<DistributionOutput, DistributionError> {
    let snapshot = parse_snapshot(json)?;
    distribute(snapshot, &DistributionConfigMsg::new(pool, mode))
}

fn free_of(output: &DistributionOutput, index: usize) -> BigUint {
    output.accounts[index].value.data.free.as_biguint().clone()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_worked_example() {
    let json = r#"[
        {"key": "A", "data": {"free": "100", "reserved": "0"}},
        {"key": "B", "data": {"free": "400", "reserved": "0"}}
    ]"#;
    let output = run(json, POOL_5M, BasisMode::Free).unwrap();

    let pool: BigUint = POOL_5M.parse().unwrap();
    let a = free_of(&output, 0);
    let b = free_of(&output, 1);

    assert_eq!(a, BigUint::from(10u32) * &pool / BigUint::from(30u32));
    assert_eq!(b, BigUint::from(20u32) * &pool / BigUint::from(30u32));

    let twice_a = &a * 2u32;
    let diff = if b > twice_a { &b - &twice_a } else { &twice_a - &b };
    assert!(diff <= BigUint::from(1u32));
    assert!(&a + &b <= pool);

    assert_eq!(output.summary.denominator, Amount::from(30u128));
}

#[test]
fn test_accounts_output_shape() {
    let json = snapshot_json(&[
        (storage_key(1), "1000000000000000000", "5"),
        (storage_key(2), "4000000000000000000", "0"),
    ]);
    let output = run(&json, POOL_5M, BasisMode::Free).unwrap();
    let value: serde_json::Value =
        serde_json::from_slice(&encode_pretty(&output.accounts).unwrap()).unwrap();

    let first = &value[0];
    assert_eq!(first["key"], storage_key(1));
    assert_eq!(first["value"]["nonce"], 0);
    assert_eq!(first["value"]["consumers"], 0);
    assert_eq!(first["value"]["providers"], 1);
    assert_eq!(first["value"]["sufficients"], 0);
    assert_eq!(first["value"]["data"]["reserved"], "0");
    assert_eq!(first["value"]["data"]["miscFrozen"], "0");
    assert_eq!(first["value"]["data"]["feeFrozen"], "0");

    // sqrt weights 1e9 and 2e9: one third and two thirds of the pool.
    assert_eq!(first["value"]["data"]["free"], "1666666666666666666666666");
    assert_eq!(value[1]["value"]["data"]["free"], "3333333333333333333333333");
}

#[test]
fn test_distribution_list_short_keys() {
    let json = snapshot_json(&[
        (storage_key(0xaa), "900", "100"),
        (storage_key(0xbb), "0", "0"),
    ]);
    let output = run(&json, POOL_2_5M, BasisMode::FreeAndReserved).unwrap();
    let list = output.distribution_list(DEFAULT_SHORT_KEY_LEN);

    assert_eq!(list.balances.len(), 2);
    assert_eq!(list.balances[0].0, "aa".repeat(32));
    assert_eq!(list.balances[0].1.to_string(), POOL_2_5M);
    assert_eq!(list.balances[1].0, "bb".repeat(32));
    assert!(list.balances[1].1.is_zero());
}

#[test]
fn test_distribution_list_feeds_genesis() {
    let json = snapshot_json(&[
        (storage_key(0x01), "100", "0"),
        (storage_key(0x02), "0", "0"),
        (storage_key(0x03), "400", "0"),
    ]);
    let output = run(&json, POOL_5M, BasisMode::Free).unwrap();

    // Round-trip the list through its JSON encoding, as the CLI would.
    let bytes = encode_pretty(&output.distribution_list(DEFAULT_SHORT_KEY_LEN)).unwrap();
    let raw: RawAllocationMsg = serde_json::from_slice(&bytes).unwrap();

    let founders = "dadea872c11cac6d115aa4fe27eb1592383f99c9a0ae5ccbcbc44ffe31530871";
    let endowments = RawAllocationMsg {
        balances: vec![(founders.to_string(), "50000000000000000000000".to_string())],
    };
    let genesis = parse_allocation(&raw, &endowments).unwrap();

    // The zero-balance account is dropped; the endowment comes last.
    assert_eq!(genesis.balances.len(), 3);
    assert_eq!(genesis.balances[0].0 .0, [0x01; 32]);
    assert_eq!(genesis.balances[1].0 .0, [0x03; 32]);
    assert_eq!(genesis.balances[2].1, 50_000_000_000_000_000_000_000);

    let distributed = output.summary.distributed.as_biguint();
    assert_eq!(
        genesis.total(),
        distributed + BigUint::from(50_000_000_000_000_000_000_000u128)
    );
}

#[test]
fn test_deterministic_output() {
    let json = snapshot_json(&[
        (storage_key(7), "123456789012345678901234567890", "42"),
        (storage_key(8), "98765432109876543210", "0"),
        (storage_key(9), "5", "999"),
    ]);

    let first = run(&json, POOL_5M, BasisMode::FreeAndReserved).unwrap();
    let second = run(&json, POOL_5M, BasisMode::FreeAndReserved).unwrap();

    let first_bytes = encode_pretty(&first.accounts).unwrap();
    let second_bytes = encode_pretty(&second.accounts).unwrap();
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(
        artefact_digest_hex(&first_bytes),
        artefact_digest_hex(&second_bytes)
    );
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_order_and_duplicates_preserved() {
    let json = r#"[
        {"key": "zeta", "data": {"free": "1", "reserved": "0"}},
        {"key": "alpha", "data": {"free": "4", "reserved": "0"}},
        {"key": "zeta", "data": {"free": "1", "reserved": "0"}}
    ]"#;
    let output = run(json, "100", BasisMode::Free).unwrap();
    let keys: Vec<&str> = output.accounts.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "zeta"]);

    // weights 1, 2, 1 over denominator 4
    let amounts: Vec<String> = output
        .accounts
        .iter()
        .map(|e| e.value.data.free.to_string())
        .collect();
    assert_eq!(amounts, vec!["25", "50", "25"]);
}

#[test]
fn test_malformed_balance_names_the_account() {
    let json = r#"[
        {"key": "good", "data": {"free": "100", "reserved": "0"}},
        {"key": "bad", "data": {"free": "-100", "reserved": "0"}}
    ]"#;
    let err = run(json, POOL_5M, BasisMode::Free).unwrap_err();
    assert!(err.to_string().contains("bad"));
    assert!(matches!(err, DistributionError::MalformedBalance { .. }));

    let json = r#"[{"key": "noreserved", "data": {"free": "100"}}]"#;
    let err = run(json, POOL_5M, BasisMode::Free).unwrap_err();
    assert!(matches!(
        err,
        DistributionError::MalformedBalance { ref key, ref field, .. }
            if key == "noreserved" && field == "reserved"
    ));
}

#[test]
fn test_zero_snapshot_rejected() {
    let json = snapshot_json(&[(storage_key(1), "0", "0"), (storage_key(2), "0", "0")]);
    let err = run(&json, POOL_5M, BasisMode::Free).unwrap_err();
    assert!(matches!(err, DistributionError::ZeroDenominator));

    let err = run("[]", POOL_5M, BasisMode::Free).unwrap_err();
    assert!(matches!(err, DistributionError::ZeroDenominator));
}

#[test]
fn test_invalid_configuration() {
    let json = snapshot_json(&[(storage_key(1), "10", "0")]);
    let snapshot = parse_snapshot(&json).unwrap();

    let bad_mode = DistributionConfigMsg {
        total_pool: POOL_5M.to_string(),
        basis_mode: "reserved".to_string(),
    };
    let err = distribute(snapshot.clone(), &bad_mode).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidConfiguration { .. }));

    let bad_pool = DistributionConfigMsg {
        total_pool: "five million".to_string(),
        basis_mode: "free".to_string(),
    };
    let err = distribute(snapshot, &bad_pool).unwrap_err();
    assert!(matches!(err, DistributionError::InvalidConfiguration { .. }));
}

#[test]
fn test_remainder_reported_not_redistributed() {
    let json = snapshot_json(&[
        (storage_key(1), "1", "0"),
        (storage_key(2), "1", "0"),
        (storage_key(3), "1", "0"),
    ]);
    let output = run(&json, "100", BasisMode::Free).unwrap();

    for i in 0..3 {
        assert_eq!(free_of(&output, i), BigUint::from(33u32));
    }
    assert_eq!(output.summary.distributed, Amount::from(99u128));
    assert_eq!(output.summary.remainder, Amount::from(1u128));
}
