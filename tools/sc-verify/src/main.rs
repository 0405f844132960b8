//! sc-verify: evaluate one staking message the way a validator would.
//!
//! Runs the side handler against a live external-chain node and prints the
//! resulting vote as JSON. Exits non-zero unless the vote is `Yes`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{info, Instrument};

use sc_01_chain_caller::{RpcConfig, RpcContractCaller};
use sc_02_staking::{ChainParams, LedgerState, SideHandler, StakingMsg, Validator};
use sc_telemetry::{init_logging, subsystem_span, TelemetryConfig};
use shared_types::parse_address;

/// Dry-run a staking side transaction
#[derive(Parser, Debug)]
#[command(name = "sc-verify")]
#[command(about = "Vote on a staking message against a live external-chain node")]
struct Args {
    /// External-chain JSON-RPC endpoint
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// Staking-info contract address (0x-prefixed)
    #[arg(long)]
    staking_info: String,

    /// Confirmations required before a receipt counts
    #[arg(long, default_value = "6")]
    confirmations: u64,

    /// JSON-encoded staking message
    #[arg(long)]
    message: PathBuf,

    /// JSON ledger snapshot: `{"epoch": n, "validators": [...]}`
    #[arg(long)]
    validators: Option<PathBuf>,

    /// Bound on the receipt query, in milliseconds
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    epoch: u64,
    #[serde(default)]
    validators: Vec<Validator>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_ledger(path: Option<&Path>) -> Result<LedgerState> {
    let file = match path {
        Some(path) => read_json::<LedgerFile>(path)?,
        None => LedgerFile::default(),
    };
    LedgerState::from_validators(file.epoch, file.validators).context("building ledger snapshot")
}

async fn run(args: Args) -> Result<bool> {
    let contract = parse_address(&args.staking_info).context("invalid --staking-info")?;
    let params = ChainParams::new(args.confirmations, contract);
    params.validate().context("invalid chain parameters")?;

    let msg: StakingMsg = read_json(&args.message)?;
    let ledger = load_ledger(args.validators.as_deref())?;

    let caller = RpcContractCaller::new(RpcConfig {
        url: args.rpc_url.clone(),
        timeout_ms: args.timeout_ms,
    })
    .context("building RPC client")?;

    let span = subsystem_span!(
        "sc-verify",
        kind = %msg.kind(),
        validator_id = %msg.validator_id()
    );
    info!(parent: &span, validators = ledger.len(), "evaluating staking message");

    let handler = SideHandler::new(
        Arc::new(caller),
        params,
        Duration::from_millis(args.timeout_ms),
    );
    let result = handler.handle(&ledger, Some(&msg)).instrument(span).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.is_yes())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&TelemetryConfig::for_service("sc-verify")) {
        eprintln!("Warning: logging disabled: {e}");
    }

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
