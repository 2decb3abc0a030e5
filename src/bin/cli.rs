use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use synclify::autoscan::AutoScan;
use synclify::clock::SystemClock;
use synclify::config::{Config, StorageConfig, read_config_file};
use synclify::engine::Dashboard;
use synclify::predict::parse_keywords;
use synclify::scanner::ScanOutcome;
use synclify::state::DashboardState;
use synclify::storage::create_backend;
use synclify::{Provider, util};
use tracing::{debug, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
#[command(name = "synclify", about = "Social engagement analytics demo engine")]
struct Args {
    /// Config file (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Store file path (overrides config and SYNCLIFY_STORE)
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Connect a mock account for a provider
    Connect {
        /// instagram, youtube or twitter
        provider: Provider,
    },

    /// Ingest one engagement sample for an account
    Ingest {
        /// Account id (as printed by `connect` / `status`)
        account: String,

        #[arg(long)]
        impressions: i64,

        #[arg(long, default_value_t = 0)]
        likes: i64,

        #[arg(long, default_value_t = 0)]
        hour: i64,
    },

    /// Score keywords and print ranked predictions
    Predict {
        /// Comma-separated keywords
        keywords: String,
    },

    /// Scan all accounts for performance drops
    Scan {
        /// Drop percentage threshold (default 40)
        #[arg(long)]
        threshold: Option<i32>,

        /// Comma-separated keywords fed into generated briefs
        #[arg(long)]
        keywords: Option<String>,
    },

    /// Scan periodically until interrupted
    Watch {
        /// Seconds between scans
        #[arg(long, default_value_t = 60)]
        interval: u64,

        #[arg(long)]
        threshold: Option<i32>,

        #[arg(long)]
        keywords: Option<String>,
    },

    /// Show connected accounts, recent metrics, alerts and briefs
    Status,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("synclify", LevelFilter::DEBUG),
        ("cli", LevelFilter::DEBUG),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.config {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    let storage_config = match &args.store {
        Some(path) => StorageConfig::Json { path: path.clone() },
        None => config.storage.clone().unwrap_or_else(|| StorageConfig::Json {
            path: util::get_store_path(),
        }),
    };
    let scan_config = config.scan.clone().unwrap_or_default();
    debug!("using storage {storage_config:?}");

    let backend = create_backend(&storage_config);
    let dashboard = Dashboard::load(backend, Box::new(SystemClock), StdRng::from_os_rng())
        .await?
        .with_drop_threshold(scan_config.threshold);

    run(args.command, dashboard, scan_config.keywords.unwrap_or_default()).await
}

async fn run(
    command: Command,
    mut dashboard: Dashboard<StdRng>,
    config_keywords: Vec<String>,
) -> anyhow::Result<()> {
    match command {
        Command::Connect { provider } => {
            let account = dashboard.connect(provider).await?;
            println!("{} connected (mock).", account.provider);
            println!("  id: {}", account.id);
            println!("  display name: {}", account.display_name);
            print_accounts(dashboard.state());
        }

        Command::Ingest {
            account,
            impressions,
            likes,
            hour,
        } => {
            let metric = dashboard.ingest(&account, impressions, likes, hour).await?;
            println!(
                "ingested: {} impressions • {} likes • hour:{}",
                metric.impressions, metric.likes, metric.hour
            );
            print_recent_metrics(dashboard.state());
        }

        Command::Predict { keywords } => {
            let keywords = parse_keywords(&keywords);
            let predictions = dashboard.predict(&keywords)?;
            for p in &predictions {
                println!(
                    "{} — score: {} — growth: {}% — best hour: {}:00",
                    p.keyword, p.score, p.predicted_growth_pct, p.best_post_hour
                );
            }
        }

        Command::Scan {
            threshold,
            keywords,
        } => {
            let keywords = resolve_keywords(keywords, config_keywords);
            let outcome = dashboard.scan(threshold, &keywords).await?;
            print_scan(dashboard.state(), &outcome);
        }

        Command::Watch {
            interval,
            threshold,
            keywords,
        } => {
            let keywords = resolve_keywords(keywords, config_keywords);
            println!("auto-scan every {interval}s, Ctrl-C to stop");
            let auto = AutoScan::spawn(
                dashboard,
                Duration::from_secs(interval),
                threshold,
                keywords,
            );
            tokio::signal::ctrl_c().await?;
            let dashboard = auto.stop().await?;
            print_scan_state(dashboard.state());
            dashboard.close().await?;
            return Ok(());
        }

        Command::Status => {
            print_accounts(dashboard.state());
            print_recent_metrics(dashboard.state());
            print_scan_state(dashboard.state());
            println!("{}", dashboard.storage_stats().await?);
        }
    }

    dashboard.close().await?;
    Ok(())
}

fn resolve_keywords(cli: Option<String>, config: Vec<String>) -> Vec<String> {
    match cli {
        Some(raw) => parse_keywords(&raw),
        None => config,
    }
}

fn print_accounts(state: &DashboardState) {
    if state.accounts.is_empty() {
        println!("No accounts connected");
        return;
    }
    println!("Connected accounts:");
    for account in &state.accounts {
        println!(
            "  {} • {} ({})",
            account.display_name, account.provider, account.id
        );
    }
}

fn print_recent_metrics(state: &DashboardState) {
    let recent = state.recent_metrics(10);
    if recent.is_empty() {
        println!("No metrics ingested yet");
        return;
    }
    println!("Recent metrics:");
    for metric in recent {
        println!(
            "  {} — {} impressions • {} likes • hour:{} • {}",
            state.display_name_for(&metric.account_id),
            metric.impressions,
            metric.likes,
            metric.hour,
            metric.ts
        );
    }
}

fn print_scan(state: &DashboardState, outcome: &ScanOutcome) {
    if outcome.is_quiet() {
        println!("No drops detected.");
        return;
    }
    print_scan_state(state);
}

fn print_scan_state(state: &DashboardState) {
    if state.alerts.is_empty() {
        println!("No alerts");
    } else {
        println!("Alerts:");
        for alert in &state.alerts {
            println!(
                "  {} — Drop: {}% • baseline:{} • last:{} • {}",
                state.display_name_for(&alert.account_id),
                alert.drop_pct,
                alert.baseline,
                alert.last_impressions,
                alert.ts
            );
        }
    }

    if state.briefs.is_empty() {
        println!("No briefs generated");
    } else {
        println!("Briefs (newest first):");
        for brief in state.recent_briefs() {
            println!(
                "--- {} • {}\n{}",
                state.display_name_for(&brief.account_id),
                brief.ts,
                brief.brief
            );
        }
    }
}
