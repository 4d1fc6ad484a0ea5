use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

// ---------- Features ----------

/// Inputs the sleep model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Wake time, seconds since midnight.
    Wake,
    /// Desired sleep, hours.
    EstimatedSleep,
    /// Cups of coffee per day.
    Coffee,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Wake, Feature::EstimatedSleep, Feature::Coffee];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Wake => "wake",
            Feature::EstimatedSleep => "estimatedSleep",
            Feature::Coffee => "coffee",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// One row of model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepFeatures {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

impl SleepFeatures {
    pub fn new(wake_seconds: u32, sleep_goal_hours: f64, coffee_count: u32) -> Self {
        Self {
            wake: f64::from(wake_seconds),
            estimated_sleep: sleep_goal_hours,
            coffee: f64::from(coffee_count),
        }
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Wake => self.wake,
            Feature::EstimatedSleep => self.estimated_sleep,
            Feature::Coffee => self.coffee,
        }
    }

    /// Lays the features out in the order a model artifact expects.
    pub fn ordered(&self, layout: &[Feature]) -> Vec<f64> {
        layout.iter().map(|f| self.value(*f)).collect()
    }

    pub fn is_finite(&self) -> bool {
        Feature::ALL.iter().all(|f| self.value(*f).is_finite())
    }
}

// ---------- Model capability ----------

#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact could not be found, read, or validated.
    #[error("sleep model unavailable: {0:#}")]
    Unavailable(anyhow::Error),
    #[error("sleep model inference failed: {0:#}")]
    Inference(anyhow::Error),
}

/// A regression model predicting actual sleep in seconds.
pub trait SleepModel: Send + Sync {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError>;
}

// ---------- Artifact metadata ----------

/// Feature ordering shared by every artifact format.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureMeta {
    pub feat_list: Vec<String>,
    pub in_dim: Option<usize>,
}

impl FeatureMeta {
    pub(crate) fn layout(&self) -> Result<Vec<Feature>> {
        let in_dim = self.in_dim.unwrap_or(self.feat_list.len());
        if in_dim != self.feat_list.len() {
            bail!(
                "in_dim ({}) != feat_list.len() ({})",
                in_dim,
                self.feat_list.len()
            );
        }
        if self.feat_list.is_empty() {
            bail!("feat_list is empty");
        }

        let mut layout = Vec::with_capacity(self.feat_list.len());
        for name in &self.feat_list {
            let f = Feature::from_name(name)
                .with_context(|| format!("unknown feature {:?} in feat_list", name))?;
            if layout.contains(&f) {
                bail!("feature {:?} listed twice", name);
            }
            layout.push(f);
        }
        Ok(layout)
    }
}

// ---------- Linear model ----------

#[derive(Deserialize)]
struct LinearArtifact {
    #[serde(flatten)]
    meta: FeatureMeta,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Linear fit `intercept + Σ coefficient·feature`, loaded from a JSON artifact:
///
/// ```json
/// { "feat_list": ["wake", "estimatedSleep", "coffee"],
///   "coefficients": [0.0125, 3420.0, 410.0],
///   "intercept": 1080.0 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSleepModel {
    layout: Vec<Feature>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearSleepModel {
    pub fn new(layout: Vec<Feature>, coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if layout.len() != coefficients.len() {
            bail!(
                "coefficient count ({}) != feature count ({})",
                coefficients.len(),
                layout.len()
            );
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            bail!("model weights must be finite");
        }
        Ok(Self {
            layout,
            coefficients,
            intercept,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read model at {}", path.display()))?;
        let model = Self::from_json_str(&txt)
            .with_context(|| format!("invalid model artifact {}", path.display()))?;
        tracing::info!(
            "loaded linear sleep model from {}; feat_list[{}]: {:?}",
            path.display(),
            model.layout.len(),
            model.layout.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        Ok(model)
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        let artifact: LinearArtifact =
            serde_json::from_str(txt).context("failed to parse model JSON")?;
        let layout = artifact.meta.layout()?;
        Self::new(layout, artifact.coefficients, artifact.intercept)
    }

    pub fn layout(&self) -> &[Feature] {
        &self.layout
    }
}

impl SleepModel for LinearSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        if !features.is_finite() {
            return Err(ModelError::Inference(anyhow::anyhow!(
                "non-finite input {:?}",
                features
            )));
        }
        let x = features.ordered(&self.layout);
        let y = self.intercept
            + x.iter()
                .zip(&self.coefficients)
                .map(|(x, c)| x * c)
                .sum::<f64>();
        tracing::debug!("predict {:?} -> {:.1}s", features, y);
        Ok(y)
    }
}
