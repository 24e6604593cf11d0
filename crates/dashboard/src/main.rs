use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::time;

use xcm_yield_dashboard::{
    Dashboard, DashboardConfig, InstantSleeper, Sleeper, SystemClock, TokioSleeper,
};

#[derive(Parser, Debug)]
#[command(name = "xcm-yield-demo")]
#[command(about = "Headless run of the cross-chain yield dashboard simulation")]
struct Args {
    /// Path to dashboard configuration file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,

    /// Seed for the random source (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of background refresh ticks to run after the scripted actions
    #[arg(short, long, default_value = "3")]
    ticks: u32,

    /// Amount to deposit through the optimizer
    #[arg(short, long, default_value = "1000")]
    amount: f64,

    /// Skip every simulated delay
    #[arg(long)]
    instant: bool,

    /// Write the default configuration to --config and exit
    #[arg(long)]
    write_default_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if args.verbose { "debug" } else { "info" })
    ).init();

    if args.write_default_config {
        DashboardConfig::default()
            .save(&args.config)
            .with_context(|| format!("writing default config to {}", args.config))?;
        log::info!("Wrote default configuration to {}", args.config);
        return Ok(());
    }

    // Load configuration
    let mut config = if std::path::Path::new(&args.config).exists() {
        DashboardConfig::load(&args.config)?
    } else {
        log::warn!("Config file {} not found, using defaults", args.config);
        DashboardConfig::default()
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.instant {
        config = config.without_delays();
        config.refresh_interval_secs = 1;
    }

    log::info!("Starting cross-chain yield dashboard on {}", config.network);

    let sleeper: Arc<dyn Sleeper> = if args.instant {
        Arc::new(InstantSleeper::new())
    } else {
        Arc::new(TokioSleeper)
    };
    let dashboard = Dashboard::new(config, sleeper, Arc::new(SystemClock))?;

    for vault in dashboard.snapshot().await.vaults {
        log::info!(
            "{} {:<9} apy={:>5.2}% tvl=${:>10.0} risk={}/10 active={} best={}",
            vault.logo, vault.chain_name, vault.apy, vault.tvl, vault.risk_score,
            vault.is_active, vault.is_best
        );
    }

    // Deposits are rejected until the wallet is connected
    match dashboard.deposit_to_vault("acala", args.amount).await {
        Err(e) if e.is_guard_failure() => log::warn!("Expected rejection before connecting: {}", e),
        Err(e) => return Err(anyhow::Error::new(e).context("deposit before connecting")),
        Ok(tx) => log::warn!("Deposit {} unexpectedly accepted before connecting", tx.id),
    }

    dashboard.connect_wallet().await?;
    dashboard.refresh_vaults().await?;

    match dashboard.optimize_yield(args.amount).await {
        Ok(tx) => log::info!("Optimized deposit settled: {} ({:?})", tx.id, tx.status),
        Err(e) if e.is_guard_failure() => log::warn!("Optimization skipped: {}", e),
        Err(e) => log::error!("Optimization failed: {}", e),
    }

    let refresh = dashboard.spawn_background_refresh();
    let period = dashboard.config().refresh_interval();
    time::sleep(period.saturating_mul(args.ticks) + Duration::from_millis(100)).await;
    refresh.stop();

    let state = dashboard.snapshot().await;
    log::info!(
        "Portfolio: {} positions, deposited ${:.2}, value ${:.2}, earned ${:.4} ({:.4}%), avg APY {:.2}%",
        state.portfolio.position_count(),
        state.portfolio.total_deposited,
        state.portfolio.total_value,
        state.portfolio.total_earned,
        state.portfolio.return_percent(),
        state.portfolio.avg_apy
    );

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
