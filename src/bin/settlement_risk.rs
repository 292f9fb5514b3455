//! Settlement risk command line.
//!
//! `report` aggregates a JSON file of trade rows offline. `fetch` loads
//! trades from the hosted store, evaluates alerts and optionally emails
//! them. `fails` prints the settlement-fails view.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use settlement_risk::application::services::{DeliveryStatus, RiskMonitor, load_alert_rules};
use settlement_risk::config::AppConfig;
use settlement_risk::domain::entities::{RawTrade, SettlementFail, total_fail_cost};
use settlement_risk::domain::services::{Alert, AlertEvaluator, RiskAggregator, RiskMetrics};
use settlement_risk::domain::value_objects::{SettlementStatus, TradeSide};
use settlement_risk::infrastructure::notifications::{
    AlertNotifier, RecordingNotifier, SmtpAlertNotifier,
};
use settlement_risk::infrastructure::persistence::{SettlementFailSource, TimeFrame, TradeQuery};
use settlement_risk::infrastructure::rest::RestStore;
use settlement_risk::telemetry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "settlement_risk")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", env = "SETTLEMENT_RISK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, env = "SETTLEMENT_RISK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a JSON array of trade rows
    Report {
        /// Input file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Load trades from the store and evaluate alerts
    Fetch {
        /// Trade-date window: 7d, 30d or 90d
        #[arg(short, long)]
        time_frame: Option<TimeFrame>,

        /// Only this counterparty
        #[arg(long)]
        counterparty: Option<String>,

        /// Only this side (buy or sell)
        #[arg(long)]
        side: Option<TradeSide>,

        /// Only this settlement status
        #[arg(long)]
        status: Option<SettlementStatus>,

        /// Email alerts through the configured relay
        #[arg(long)]
        notify: bool,
    },
    /// Print the settlement-fails view
    Fails,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    metrics: RiskMetrics,
    alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivered: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailsReport {
    fails: Vec<SettlementFail>,
    total_cost: rust_decimal::Decimal,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn evaluator(config: &AppConfig) -> AlertEvaluator {
    AlertEvaluator::new().with_limits(config.alerts.limits.clone())
}

fn report(config: &AppConfig, input: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let rows: Vec<RawTrade> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))?;

    let metrics = RiskAggregator::new(config.aggregator).aggregate_raw(&rows);
    let alerts = evaluator(config).evaluate(&metrics);
    tracing::info!(rows = rows.len(), alerts = alerts.len(), "aggregated file");
    print_json(&Report {
        metrics,
        alerts,
        delivered: None,
    })
}

async fn fetch(config: &AppConfig, query: TradeQuery, notify: bool) -> Result<()> {
    let store = Arc::new(RestStore::new(config.require_store()?.clone())?);

    let evaluator = load_alert_rules(
        store.as_ref(),
        config.alerts.user_id.as_deref(),
        config.alerts.limits.clone(),
    )
    .await?;

    let monitor = RiskMonitor::new(store, RiskAggregator::new(config.aggregator))
        .with_query(query)
        .with_page_size(config.load.page_size);
    let metrics = monitor.refresh().await?;

    let notifier: Box<dyn AlertNotifier> = if notify {
        Box::new(SmtpAlertNotifier::new(&config.smtp)?)
    } else {
        Box::new(RecordingNotifier::new())
    };
    let outcome = monitor.check_alerts(&evaluator, notifier.as_ref()).await;
    let delivered = notify.then(|| matches!(outcome.delivery, DeliveryStatus::Delivered));

    print_json(&Report {
        metrics,
        alerts: outcome.alerts,
        delivered,
    })
}

async fn fails(config: &AppConfig) -> Result<()> {
    let store = RestStore::new(config.require_store()?.clone())?;
    let fails = store.fetch_fails().await?;
    let total_cost = total_fail_cost(&fails);
    print_json(&FailsReport { fails, total_cost })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.telemetry.level = level;
        config.validate()?;
    }
    telemetry::init_tracing(&config.telemetry)?;

    match args.command {
        Command::Report { input } => report(&config, &input),
        Command::Fetch {
            time_frame,
            counterparty,
            side,
            status,
            notify,
        } => {
            let frame = time_frame.unwrap_or(config.load.time_frame);
            let mut query = TradeQuery::for_time_frame(frame, Utc::now().date_naive());
            if let Some(name) = counterparty {
                query = query.with_counterparty(name);
            }
            if let Some(side) = side {
                query = query.with_side(side);
            }
            if let Some(status) = status {
                query = query.with_status(status);
            }
            tracing::info!(%frame, "fetching trades");
            fetch(&config, query, notify).await
        }
        Command::Fails => fails(&config).await,
    }
}
