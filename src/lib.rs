//! Bedtime estimation for the BetterRest form.
//!
//! Given a wake time, a sleep goal and daily coffee intake, a pre-trained
//! regression model predicts how much sleep the user will actually get; the
//! recommended bedtime is that much before the wake time, wrapped into the
//! previous day when needed.
//!
//! ```
//! use better_rest::{BedtimeEstimator, Estimator, LinearSleepModel, Feature};
//!
//! let model = LinearSleepModel::new(
//!     vec![Feature::Wake, Feature::EstimatedSleep, Feature::Coffee],
//!     vec![0.0, 3600.0, 0.0],
//!     0.0,
//! ).unwrap();
//! let bedtime = BedtimeEstimator::new(model).estimate(7 * 3600, 8.5, 1).unwrap();
//! assert_eq!(bedtime.to_string(), "22:30");
//! ```

pub mod config;
pub mod estimator;
pub mod form;
pub mod lazy;
pub mod model;
pub mod time_of_day;
#[cfg(feature = "torchscript")]
pub mod torch;

pub use config::EstimatorConfig;
pub use estimator::{
    shared_estimator, BedtimeEstimator, BedtimeResult, EstimationError, Estimator,
    SharedEstimator,
};
pub use form::{Alert, BedtimeForm};
pub use lazy::LazyModel;
pub use model::{Feature, LinearSleepModel, ModelError, SleepFeatures, SleepModel};
pub use time_of_day::TimeOfDay;
#[cfg(feature = "torchscript")]
pub use torch::TorchSleepModel;
