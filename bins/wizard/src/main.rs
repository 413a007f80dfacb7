use alloy::primitives::keccak256;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wizard_chain::{
    normalize_ipfs_uri, ContractDeployer, ContractVerifier, FeeStrategy, NodeClient,
    PinningClient, VerifyOutcome,
};
use wizard_core::config::AppConfig;
use wizard_core::types::ContractOptions;
use wizard_core::utils::{now_ms, parse_address};
use wizard_factory::{encode_deployment, estimate_deployment_cost, fallback_estimate, templates};
use wizard_history::{DeploymentRecord, HistoryStore};
use wizard_reality::{derive_facts, evaluate_consequences, generate_hints, Severity};

#[derive(Parser)]
#[command(name = "wizard", version, about = "Guided token contract deployment wizard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show consequences, hints and a cost estimate for an options snapshot.
    Preview {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
        /// Path to a JSON options snapshot.
        #[arg(short, long)]
        options: String,
        /// Connected wallet address, for custom-owner detection.
        #[arg(long)]
        caller: Option<String>,
    },
    /// Print the ABI-ordered constructor arguments and init code digest.
    Encode {
        #[arg(short, long)]
        options: String,
    },
    /// Encode, sign and broadcast the deployment, then record it locally.
    Deploy {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
        #[arg(short, long)]
        options: String,
    },
    /// Run explorer source verification for a deployed contract.
    Verify {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
        #[arg(short, long)]
        options: String,
        #[arg(long)]
        address: String,
    },
    /// Upload a JSON metadata file to the configured pinning service.
    PinMetadata {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
        /// Path to the metadata JSON file to pin.
        #[arg(short, long)]
        file: String,
    },
    /// List locally recorded deployments.
    History {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
        #[arg(long)]
        deployer: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    PrintConfig {
        #[arg(short, long, default_value = "config/wizard.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview {
            config,
            options,
            caller,
        } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let opts = load_options(&options)?;
            preview(&cfg, &opts, caller.as_deref()).await?;
        }
        Commands::Encode { options } => {
            init_tracing("info");
            let opts = load_options(&options)?;
            encode(&opts)?;
        }
        Commands::Deploy { config, options } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let opts = load_options(&options)?;
            deploy(&cfg, &opts).await?;
        }
        Commands::Verify {
            config,
            options,
            address,
        } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let opts = load_options(&options)?;
            let address = parse_address(&address)?;
            let data = encode_deployment(&opts)?;
            let verifier = ContractVerifier::new(cfg.verify.clone());
            match verifier.verify(address, &data.args_as_strings()).await? {
                VerifyOutcome::Verified => println!("Contract verified"),
                VerifyOutcome::AlreadyVerified => println!("Contract already verified"),
                VerifyOutcome::Failed(reason) => {
                    return Err(anyhow!("verification failed: {reason}"))
                }
            }
        }
        Commands::PinMetadata { config, file } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            pin_metadata(&cfg, &file).await?;
        }
        Commands::History {
            config,
            deployer,
            address,
        } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            let store = HistoryStore::new(&cfg.history.path);
            let records = match (&address, &deployer) {
                (Some(address), _) => store.find(address).into_iter().collect(),
                (None, Some(deployer)) => store.for_deployer(deployer),
                (None, None) => store.load(),
            };
            if records.is_empty() {
                println!("No deployments recorded");
            }
            for r in records {
                println!(
                    "{}  {}  {} ({}) by {} on {}",
                    r.timestamp_ms, r.contract_address, r.contract_name, r.contract_type,
                    r.deployed_by, r.network
                );
            }
        }
        Commands::PrintConfig { config } => {
            let cfg = AppConfig::load(&config)?;
            init_tracing(&cfg.observability.log_level);
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }
    Ok(())
}

async fn preview(cfg: &AppConfig, opts: &ContractOptions, caller: Option<&str>) -> Result<()> {
    let facts = derive_facts(opts, caller);
    let consequences = evaluate_consequences(&facts);
    let hints = generate_hints(&facts);

    for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
        let group: Vec<_> = consequences
            .iter()
            .filter(|c| c.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        println!("== {severity} ==");
        for c in group {
            println!("  [{}] {}", c.id, c.title);
            println!("      {}", c.explanation);
        }
    }
    if !hints.is_empty() {
        println!("== Hints ==");
        for h in &hints {
            println!("  {}: {}", h.condition, h.hint);
        }
    }

    let tpl = templates::template(opts.contract_type())
        .ok_or_else(|| anyhow!("{} is not deployable", opts.contract_type()))?;
    let estimate = match NodeClient::connect(&cfg.chain).await {
        Ok(client) => match client.gas_price().await {
            Ok(price) => estimate_deployment_cost(tpl.bytecode_hex(), price),
            Err(e) => {
                warn!(error = %e, "gas price unavailable; using fallback estimate");
                fallback_estimate(tpl.bytecode_hex())
            }
        },
        Err(e) => {
            warn!(error = %e, "node unreachable; using fallback estimate");
            fallback_estimate(tpl.bytecode_hex())
        }
    };
    println!(
        "Estimated deployment: {} gas, ~{} {} ({} bytecode bytes)",
        estimate.gas_units, estimate.cost_native, cfg.chain.native_symbol, estimate.bytecode_size
    );
    Ok(())
}

fn encode(opts: &ContractOptions) -> Result<()> {
    let data = encode_deployment(opts)?;
    println!("Constructor arguments ({}):", opts.contract_type());
    for (i, arg) in data.args_as_strings().iter().enumerate() {
        println!("  [{i}] {arg}");
    }
    let init_code = data.init_code();
    println!("Init code: {} bytes", init_code.len());
    println!("Init code keccak256: 0x{}", hex::encode(keccak256(&init_code)));
    Ok(())
}

async fn deploy(cfg: &AppConfig, opts: &ContractOptions) -> Result<()> {
    // Validation failures surface here, before anything is signed.
    let data = encode_deployment(opts)?;

    let client =
        NodeClient::connect_with_signer(&cfg.chain, &cfg.deploy.deployer_private_key_env).await?;
    let deployed_by = client
        .signer
        .map(|a| a.to_string())
        .unwrap_or_default();
    let fees = FeeStrategy::from_config(&cfg.deploy)?;
    let deployer = ContractDeployer::new(client.http, fees, cfg.deploy.receipt_timeout_ms);
    let receipt = deployer.deploy(&data).await?;
    info!(address = %receipt.address, "deployment confirmed");

    let store = HistoryStore::new(&cfg.history.path);
    let record = DeploymentRecord {
        tx_hash: receipt.tx_hash.to_string(),
        contract_address: receipt.address.to_string(),
        timestamp_ms: now_ms(),
        contract_type: opts.contract_type().to_string(),
        contract_name: opts.name().to_string(),
        token_symbol: opts.symbol().map(str::to_string),
        initial_supply: match opts {
            ContractOptions::Erc20(o) => Some(o.initial_supply.clone()),
            _ => None,
        },
        metadata_uri: match opts {
            ContractOptions::Erc721(o) => o.uri.clone(),
            ContractOptions::Erc1155(o) => o.uri.clone(),
            _ => None,
        },
        deployed_by,
        network: cfg.chain.network_name.clone(),
    };
    if let Err(e) = store.append(record) {
        warn!(error = %e, "failed to record deployment locally");
    }

    println!("Deployed {} at {}", opts.name(), receipt.address);
    println!("Transaction: {}", receipt.tx_hash);
    Ok(())
}

async fn pin_metadata(cfg: &AppConfig, path: &str) -> Result<()> {
    let client = PinningClient::from_config(&cfg.pinning)?
        .ok_or_else(|| anyhow!("no pinning endpoint configured; set [pinning] endpoint"))?;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read metadata file {path}"))?;
    let metadata: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("malformed metadata file {path}"))?;
    let cid = client.pin_json(&metadata).await?;
    println!("Pinned: ipfs://{cid}");
    println!("Gateway: {}", normalize_ipfs_uri(&cid));
    Ok(())
}

fn load_options(path: &str) -> Result<ContractOptions> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed options file {path}"))
}

fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(value) => EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        Err(_) => EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
