use once_cell::sync::OnceCell;
use std::{fmt, path::PathBuf};

use crate::model::{LinearSleepModel, ModelError, SleepFeatures, SleepModel};

type Loader<M> = Box<dyn Fn() -> anyhow::Result<M> + Send + Sync>;

/// A model that is loaded on first use and kept for the rest of the process.
///
/// A failed load is not cached; the next prediction tries again.
pub struct LazyModel<M> {
    cell: OnceCell<M>,
    loader: Loader<M>,
}

impl<M> LazyModel<M> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> anyhow::Result<M> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    pub fn get(&self) -> Result<&M, ModelError> {
        self.cell
            .get_or_try_init(|| (self.loader)())
            .map_err(ModelError::Unavailable)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl LazyModel<LinearSleepModel> {
    pub fn linear(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(move || LinearSleepModel::load(&path))
    }
}

impl<M: SleepModel> SleepModel for LazyModel<M> {
    fn predict(&self, features: &SleepFeatures) -> Result<f64, ModelError> {
        self.get()?.predict(features)
    }
}

impl<M> fmt::Debug for LazyModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyModel")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
