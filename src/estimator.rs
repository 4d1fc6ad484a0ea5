use once_cell::sync::Lazy;
use thiserror::Error;

use crate::config::EstimatorConfig;
use crate::lazy::LazyModel;
use crate::model::{LinearSleepModel, ModelError, SleepFeatures, SleepModel};
use crate::time_of_day::TimeOfDay;

/// Failures surfaced to the caller. `Display` is the message to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimationError {
    #[error("Sorry, the sleep model could not be loaded.")]
    ModelUnavailable,
    #[error("Sorry, there was a problem calculating your bedtime.")]
    PredictionFailed,
}

pub type BedtimeResult = Result<TimeOfDay, EstimationError>;

/// Computes an ideal bedtime from wake time, sleep goal and caffeine intake.
pub trait Estimator {
    fn estimate(
        &self,
        wake_time_seconds: u32,
        sleep_goal_hours: f64,
        coffee_count: u32,
    ) -> BedtimeResult;
}

/// Asks the sleep model how much sleep the user will actually get and counts
/// back from the wake time, wrapping past midnight.
#[derive(Debug, Clone)]
pub struct BedtimeEstimator<M> {
    model: M,
}

impl<M: SleepModel> BedtimeEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: SleepModel> Estimator for BedtimeEstimator<M> {
    fn estimate(
        &self,
        wake_time_seconds: u32,
        sleep_goal_hours: f64,
        coffee_count: u32,
    ) -> BedtimeResult {
        let wake = TimeOfDay::from_seconds(wake_time_seconds);
        let features = SleepFeatures::new(wake.seconds(), sleep_goal_hours, coffee_count);

        let actual_sleep = self.model.predict(&features).map_err(|e| match e {
            ModelError::Unavailable(cause) => {
                tracing::warn!("bedtime estimate failed, model unavailable: {:#}", cause);
                EstimationError::ModelUnavailable
            }
            ModelError::Inference(cause) => {
                tracing::warn!("bedtime estimate failed, inference error: {:#}", cause);
                EstimationError::PredictionFailed
            }
        })?;

        let bedtime = wake.wrapping_sub_seconds(actual_sleep).ok_or_else(|| {
            tracing::warn!("model returned non-finite sleep {} for {:?}", actual_sleep, features);
            EstimationError::PredictionFailed
        })?;

        tracing::debug!(
            "wake={} goal={}h coffee={} actual_sleep={:.0}s bedtime={}",
            wake,
            sleep_goal_hours,
            coffee_count,
            actual_sleep,
            bedtime
        );
        Ok(bedtime)
    }
}

pub type SharedEstimator = BedtimeEstimator<LazyModel<LinearSleepModel>>;

static SHARED: Lazy<SharedEstimator> = Lazy::new(|| {
    let cfg = EstimatorConfig::from_env();
    tracing::info!("sleep model path: {}", cfg.model_path.display());
    BedtimeEstimator::new(LazyModel::linear(cfg.model_path))
});

/// Process-wide estimator over the configured artifact. The model is read on
/// the first estimate and never released.
pub fn shared_estimator() -> &'static SharedEstimator {
    &SHARED
}
