//! Vigil daemon: entry point for the candidate monitor.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use vigil_node::{init_logging, node_clients, Monitor, MonitorConfig, Poller, Snapshot};
use vigil_types::{Candidate, ChainId, CoinSymbol, PublicKey, SystemClock};
use vigil_utils::{format_coins, shorten};

#[derive(Parser)]
#[command(name = "vigil-daemon", about = "Validator candidate monitor")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VIGIL_CONFIG")]
    config: Option<PathBuf>,

    /// Node API base URL queried first.
    #[arg(long, env = "VIGIL_PRIMARY_URL")]
    primary_url: Option<String>,

    /// Node API base URL used when the primary fails.
    #[arg(long, env = "VIGIL_SECONDARY_URL")]
    secondary_url: Option<String>,

    /// Chain to sign for: "mainnet" or "testnet".
    #[arg(long, env = "VIGIL_CHAIN_ID")]
    chain_id: Option<ChainId>,

    /// Coin that pays transaction fees.
    #[arg(long, env = "VIGIL_GAS_COIN")]
    gas_coin: Option<CoinSymbol>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VIGIL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VIGIL_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Poll the node, alert on watched operators, optionally serve status.
    Run {
        /// Seconds between polls.
        #[arg(long, env = "VIGIL_POLL_INTERVAL")]
        poll_interval: Option<u64>,

        /// Serve /health, /metrics and /candidates.
        #[arg(long, env = "VIGIL_STATUS_SERVER")]
        status_server: bool,

        #[arg(long, env = "VIGIL_STATUS_PORT")]
        status_port: Option<u16>,
    },

    /// Switch a candidate on or off.
    Candidate {
        #[command(subcommand)]
        action: CandidateAction,
    },

    /// List candidates whose public key contains a substring.
    Search { needle: String },

    /// Show one candidate by its full public key.
    Show { pub_key: String },
}

#[derive(clap::Subcommand)]
enum CandidateAction {
    /// Send a set-candidate-online transaction.
    On(SwitchArgs),
    /// Send a set-candidate-offline transaction.
    Off(SwitchArgs),
}

#[derive(clap::Args)]
struct SwitchArgs {
    /// Candidate public key (Mp...).
    #[arg(long)]
    pub_key: String,

    /// Control address that pays for and signs the transaction (Mx...).
    #[arg(long, env = "VIGIL_PAYER")]
    payer: String,

    /// Hex private key of the control address.
    #[arg(long, env = "VIGIL_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,
}

fn load_config(cli: &Cli) -> anyhow::Result<MonitorConfig> {
    let mut config = match &cli.config {
        Some(path) => MonitorConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MonitorConfig::default(),
    };

    if let Some(url) = &cli.primary_url {
        config.primary_url = url.clone();
    }
    if let Some(url) = &cli.secondary_url {
        config.secondary_url = Some(url.clone());
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(coin) = cli.gas_coin {
        config.gas_coin = coin;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

/// One poll, primary then secondary, without touching any store.
async fn fetch_snapshot(config: &MonitorConfig) -> anyhow::Result<Snapshot> {
    config.validate()?;
    let (primary, secondary) = node_clients(config)?;
    let poller = Poller::new(primary, secondary, Arc::new(SystemClock));
    Ok(poller.poll().await?)
}

fn print_candidate(c: &Candidate) {
    println!(
        "{}  {:<9}  commission {:>3}%  stake {} BIP",
        c.pub_key,
        c.status.to_string(),
        c.commission,
        format_coins(c.total_stake_display)
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;

    match cli.command {
        Command::Run {
            poll_interval,
            status_server,
            status_port,
        } => {
            if let Some(secs) = poll_interval {
                config.poll_interval_secs = secs;
            }
            config.enable_status_server |= status_server;
            if let Some(port) = status_port {
                config.status_port = port;
            }
            config.validate()?;
            init_logging(config.log_format()?, &config.log_level)?;

            tracing::info!(
                chain = config.chain_id.as_str(),
                watched = config.watch.len(),
                "starting vigil monitor (status server: {})",
                if config.enable_status_server {
                    config.status_port.to_string()
                } else {
                    "off".into()
                },
            );

            let mut monitor = Monitor::from_config(config)?;
            monitor.start().await?;
            monitor.shutdown_controller().wait_for_signal().await;

            tracing::info!("shutdown signal received, stopping monitor");
            monitor.stop().await;
            tracing::info!("vigil daemon exited cleanly");
        }

        Command::Candidate { action } => {
            vigil_utils::init_tracing(&config.log_level);
            let (activate, args) = match action {
                CandidateAction::On(args) => (true, args),
                CandidateAction::Off(args) => (false, args),
            };
            let target = PublicKey::new(args.pub_key.trim());
            let monitor = Monitor::from_config(config)?;
            let receipt = monitor
                .set_candidate_state(&args.payer, &args.private_key, &target, activate)
                .await
                .context("candidate switch failed")?;
            println!(
                "{} {} (nonce {}): {}",
                if activate { "activated" } else { "deactivated" },
                shorten(target.as_str()),
                receipt.nonce,
                receipt.hash
            );
        }

        Command::Search { needle } => {
            vigil_utils::init_tracing(&config.log_level);
            let snapshot = fetch_snapshot(&config).await?;
            let matches = snapshot.search(needle.trim());
            if matches.is_empty() {
                println!("no candidates match {needle:?}");
            }
            for candidate in matches {
                print_candidate(candidate);
            }
        }

        Command::Show { pub_key } => {
            vigil_utils::init_tracing(&config.log_level);
            let snapshot = fetch_snapshot(&config).await?;
            let candidate = snapshot
                .find(pub_key.trim())
                .with_context(|| format!("{} is not a known candidate", pub_key.trim()))?;
            print_candidate(candidate);
            println!("  address        {}", candidate.candidate_address);
            println!("  created at     block {}", candidate.created_at_block);
            println!("  absent times   {}", candidate.absent_times);
            println!(
                "  reward         {} BIP",
                format_coins(candidate.accumulated_reward_display)
            );
            println!("  delegators     {}", candidate.stakes.len());
            for stake in &candidate.stakes {
                println!(
                    "    {}  {} {}  ({} BIP)",
                    shorten(stake.owner.as_str()),
                    format_coins(stake.value_display),
                    stake.coin,
                    format_coins(stake.bip_value_display)
                );
            }
        }
    }

    Ok(())
}
