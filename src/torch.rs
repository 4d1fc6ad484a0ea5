use anyhow::{bail, Context, Result};
use std::{fs, path::Path};
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::model::{Feature, FeatureMeta, ModelError, SleepFeatures, SleepModel};

/// TorchScript export of the sleep model, with a `meta.json` naming its inputs.
pub struct TorchSleepModel {
    model: CModule,
    device: Device,
    layout: Vec<Feature>,
}

impl TorchSleepModel {
    pub fn load(model_path: impl AsRef<Path>, meta_path: impl AsRef<Path>) -> Result<Self> {
        let (model_path, meta_path) = (model_path.as_ref(), meta_path.as_ref());
        let device = Device::Cpu;

        // Load meta.json to get feature ordering and input dim
        let meta_txt = fs::read_to_string(meta_path)
            .with_context(|| format!("failed to read meta at {}", meta_path.display()))?;
        let meta: FeatureMeta =
            serde_json::from_str(&meta_txt).with_context(|| "failed to parse meta.json")?;
        let layout = meta.layout()?;

        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {}", model_path.display()))?;

        // Probe output shape with a dummy forward; expect a single value
        let dummy = Tensor::zeros([1, layout.len() as i64], (Kind::Float, device));
        let t = model.forward_ts(&[dummy])?;
        if t.numel() != 1 {
            bail!("unexpected model output size: {:?}", t.size());
        }

        tracing::info!(
            "loaded TorchScript sleep model {}; feat_list[{}]",
            model_path.display(),
            layout.len()
        );
        Ok(Self {
            model,
            device,
            layout,
        })
    }

    fn forward(&self, features: &SleepFeatures) -> Result<f64> {
        let x: Vec<f32> = features
            .ordered(&self.layout)
            .into_iter()
            .map(|v| v as f32)
            .collect();
        let input = Tensor::from_slice(&x)
            .reshape([1, x.len() as i64])
            .to_device(self.device);

        let t = self.model.forward_ts(&[input])?;
        if t.numel() != 1 {
            bail!("unexpected model output size: {:?}", t.size());
        }
        Ok(t.reshape([-1]).double_value(&[0]))
    }
}

impl SleepModel for TorchSleepModel {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        self.forward(features).map_err(ModelError::Inference)
    }
}
