//! quaddrop - quadratic token distribution over an account balance snapshot

mod artefact;
mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quaddrop_distributor::assemble::{encode_pretty, DEFAULT_SHORT_KEY_LEN};
use quaddrop_distributor::distribute;
use quaddrop_distributor::genesis::parse_allocation;
use quaddrop_distributor::ingest::parse_snapshot;
use quaddrop_distributor::msg::{
    AccountEntryMsg, DistributionConfigMsg, DistributionListMsg, GenesisBalancesMsg,
    RawAllocationMsg, SnapshotEntryMsg,
};
use schemars::schema_for;
use serde::Serialize;

use crate::artefact::{write_artefact, write_artefacts};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "quaddrop", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the quadratic distribution and migrate every account
    Distribute {
        /// Snapshot JSON: [{ "key", "data": { "free", "reserved" } }, ...]
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Config JSON: { "totalPool", "basisMode" }
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pool to distribute, in minor units (overrides the config file)
        #[arg(long)]
        total_pool: Option<String>,

        /// "free" or "free+reserved" (overrides the config file)
        #[arg(long)]
        basis_mode: Option<String>,

        /// Where to write the migrated account records
        #[arg(long, default_value = "dump/accounts.json")]
        accounts_out: PathBuf,

        /// Where to write the [shortKey, amount] distribution list
        #[arg(long)]
        distribution_out: Option<PathBuf>,

        /// Trailing key characters kept in the distribution list
        #[arg(long, default_value_t = DEFAULT_SHORT_KEY_LEN)]
        short_key_len: usize,
    },

    /// Turn a distribution list into genesis balances
    Genesis {
        #[arg(short, long)]
        distribution: PathBuf,

        /// Extra [accountId, amount] pairs appended after the distribution
        #[arg(short, long)]
        endowments: Option<PathBuf>,

        #[arg(short, long, default_value = "genesis_balances.json")]
        output: PathBuf,
    },

    /// Write JSON schemas for every input and output document
    Schema {
        #[arg(long, default_value = "schema")]
        out_dir: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Distribute {
            snapshot,
            config,
            total_pool,
            basis_mode,
            accounts_out,
            distribution_out,
            short_key_len,
        } => cmd_distribute(
            &snapshot,
            config.as_deref(),
            total_pool,
            basis_mode,
            &accounts_out,
            distribution_out.as_deref(),
            short_key_len,
        ),
        Command::Genesis {
            distribution,
            endowments,
            output,
        } => cmd_genesis(&distribution, endowments.as_deref(), &output),
        Command::Schema { out_dir } => cmd_schema(&out_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_distribute(
    snapshot_path: &Path,
    config_path: Option<&Path>,
    total_pool: Option<String>,
    basis_mode: Option<String>,
    accounts_out: &Path,
    distribution_out: Option<&Path>,
    short_key_len: usize,
) -> Result<()> {
    let config = config::resolve_config(config_path, total_pool, basis_mode)?;

    let text = fs::read_to_string(snapshot_path)
        .with_context(|| format!("reading snapshot {}", snapshot_path.display()))?;
    let snapshot = parse_snapshot(&text)
        .with_context(|| format!("parsing snapshot {}", snapshot_path.display()))?;
    tracing::info!(
        accounts = snapshot.len(),
        path = %snapshot_path.display(),
        "snapshot loaded"
    );

    let output = distribute(snapshot, &config)?;

    // Encode everything before touching the filesystem so a failure leaves no
    // partial output behind.
    let accounts_bytes = encode_pretty(&output.accounts)?;
    let distribution_bytes = distribution_out
        .map(|_| encode_pretty(&output.distribution_list(short_key_len)))
        .transpose()?;

    let mut artefacts: Vec<(&Path, &[u8])> = vec![(accounts_out, accounts_bytes.as_slice())];
    if let (Some(path), Some(bytes)) = (distribution_out, distribution_bytes.as_deref()) {
        artefacts.push((path, bytes));
    }
    write_artefacts(&artefacts)?;

    println!("{}", serde_json::to_string_pretty(&output.summary)?);
    Ok(())
}

fn cmd_genesis(distribution: &Path, endowments: Option<&Path>, output: &Path) -> Result<()> {
    let distribution_msg: RawAllocationMsg = read_json(distribution)?;
    let endowments_msg: RawAllocationMsg = match endowments {
        Some(path) => read_json(path)?,
        None => RawAllocationMsg::default(),
    };

    let allocation = parse_allocation(&distribution_msg, &endowments_msg)?;
    tracing::info!(
        accounts = allocation.balances.len(),
        dropped = distribution_msg.balances.len() + endowments_msg.balances.len()
            - allocation.balances.len(),
        total = %allocation.total(),
        "genesis balances built"
    );

    write_artefact(output, &encode_pretty(&allocation.to_msg())?)
}

fn cmd_schema(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    write_schema(out_dir, "snapshot", &schema_for!(Vec<SnapshotEntryMsg>))?;
    write_schema(out_dir, "config", &schema_for!(DistributionConfigMsg))?;
    write_schema(out_dir, "accounts", &schema_for!(Vec<AccountEntryMsg>))?;
    write_schema(out_dir, "distribution", &schema_for!(DistributionListMsg))?;
    write_schema(out_dir, "genesis_balances", &schema_for!(GenesisBalancesMsg))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_schema<T: Serialize>(out_dir: &Path, name: &str, schema: &T) -> Result<()> {
    write_artefact(&out_dir.join(format!("{name}.json")), &encode_pretty(schema)?)
}
