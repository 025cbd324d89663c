//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use smartenergy_app::classifier::TrainingReport;
use smartenergy_app::ports::{DecisionLog, FeatureSource};
use smartenergy_app::services::{DecisionEngine, HourlyForecaster};

use crate::error::ApiError;

/// Application state shared across all axum handlers.
///
/// The engine sits behind a mutex: cycles, overrides and resets from the
/// API and from the background cycle loop are serialized through it.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S, L> {
    /// Decision engine, shared with the background cycle loop.
    pub engine: Arc<Mutex<DecisionEngine<S, L>>>,
    /// Typical-day forecaster.
    pub forecaster: Arc<Mutex<HourlyForecaster>>,
    /// Report produced when the classifiers were trained.
    pub report: Arc<TrainingReport>,
}

impl<S, L> Clone for AppState<S, L> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            forecaster: Arc::clone(&self.forecaster),
            report: Arc::clone(&self.report),
        }
    }
}

impl<S, L> AppState<S, L>
where
    S: FeatureSource + Send + 'static,
    L: DecisionLog + Send + 'static,
{
    /// Create a new application state, taking ownership of the engine.
    pub fn new(
        engine: DecisionEngine<S, L>,
        forecaster: HourlyForecaster,
        report: TrainingReport,
    ) -> Self {
        Self::from_arcs(
            Arc::new(Mutex::new(engine)),
            Arc::new(Mutex::new(forecaster)),
            Arc::new(report),
        )
    }

    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// Use this when the engine needs to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        engine: Arc<Mutex<DecisionEngine<S, L>>>,
        forecaster: Arc<Mutex<HourlyForecaster>>,
        report: Arc<TrainingReport>,
    ) -> Self {
        Self {
            engine,
            forecaster,
            report,
        }
    }

    /// Lock the engine and run `f` on the blocking thread pool.
    ///
    /// Cycles, resets and exports do synchronous file IO and forest
    /// inference. The lock is held until `f` returns.
    pub async fn with_engine<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut DecisionEngine<S, L>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut engine = Arc::clone(&self.engine).lock_owned().await;
        Ok(tokio::task::spawn_blocking(move || f(&mut *engine)).await?)
    }

    /// Lock the forecaster and run `f` on the blocking thread pool.
    pub async fn with_forecaster<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut HourlyForecaster) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut forecaster = Arc::clone(&self.forecaster).lock_owned().await;
        Ok(tokio::task::spawn_blocking(move || f(&mut *forecaster)).await?)
    }
}
