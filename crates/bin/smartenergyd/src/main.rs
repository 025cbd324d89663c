//! # smartenergyd: smartenergy daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Generate the training corpus and fit the classifiers, once
//! - Construct the sensor and decision-log adapters
//! - Construct the decision engine, injecting adapters via port traits
//! - Run a decision cycle on a fixed interval
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use smartenergy_adapter_http_axum::router;
use smartenergy_adapter_http_axum::state::AppState;
use smartenergy_adapter_storage_csv::CsvDecisionLog;
use smartenergy_adapter_virtual::SimulatedSensors;
use smartenergy_app::classifier::ClassifierSet;
use smartenergy_app::corpus::CorpusGenerator;
use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_app::services::{DecisionEngine, HourlyForecaster};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Classifiers
    let corpus = CorpusGenerator::seeded(config.training.seed).generate(config.training.corpus_size);
    let (models, report) = ClassifierSet::train(
        &corpus,
        &config.forest_params(),
        config.training.test_fraction,
    )
    .context("failed to train classifiers")?;
    let models = Arc::new(models);
    let profile = config.energy_profile();

    // Adapters
    let log = CsvDecisionLog::open(&config.storage.log_path).with_delimiter(config.delimiter());
    let sensors = match config.simulation.seed {
        Some(seed) => SimulatedSensors::seeded(seed),
        None => SimulatedSensors::from_entropy(),
    }
    .with_failure_rate(config.simulation.failure_rate);

    // Engine
    let engine = DecisionEngine::new(sensors, log, Arc::clone(&models), profile)
        .with_overrides(config.overrides());
    let engine = Arc::new(Mutex::new(engine));
    let forecaster = HourlyForecaster::from_entropy(models, profile);

    let cycles = tokio::spawn(run_cycles(
        Arc::clone(&engine),
        Duration::from_secs(config.simulation.interval_secs),
    ));

    // HTTP
    let state = AppState::from_arcs(engine, Arc::new(Mutex::new(forecaster)), Arc::new(report));
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        log = %config.storage.log_path.display(),
        interval_secs = config.simulation.interval_secs,
        "smartenergyd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    cycles.abort();
    tracing::info!("smartenergyd stopped");
    Ok(())
}

/// Run one decision cycle per `period`, forever.
///
/// A failed cycle is logged and the loop carries on with the next tick.
/// Each cycle runs on the blocking pool with the engine locked.
async fn run_cycles<S, L>(engine: Arc<Mutex<DecisionEngine<S, L>>>, period: Duration)
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let mut guard = Arc::clone(&engine).lock_owned().await;
        // Inference and the CSV append are blocking work.
        match tokio::task::spawn_blocking(move || guard.run_cycle()).await {
            Ok(Ok(report)) => tracing::info!(
                id = %report.record.id(),
                watts = report.record.total_watts(),
                cost = report.record.cost_per_hour(),
                fallbacks = report.fallbacks.len(),
                persisted = report.persisted,
                "decision cycle completed"
            ),
            Ok(Err(err)) => tracing::warn!(error = %err, "decision cycle skipped"),
            Err(err) => tracing::error!(error = %err, "decision cycle task failed"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
