use std::path::PathBuf;

pub const MODEL_PATH_VAR: &str = "BETTER_REST_MODEL";
pub const DEFAULT_MODEL_PATH: &str = "models/sleep_calculator.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    pub model_path: PathBuf,
}

impl EstimatorConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }

    /// `BETTER_REST_MODEL` wins; otherwise the shipped artifact is looked up
    /// relative to the working directory, then next to the executable.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var_os(MODEL_PATH_VAR).map(PathBuf::from))
    }

    fn from_override(model_path: Option<PathBuf>) -> Self {
        match model_path {
            Some(p) if !p.as_os_str().is_empty() => Self::new(p),
            _ => Self::new(resolve_model_path()),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}

fn resolve_model_path() -> PathBuf {
    let candidates = [
        PathBuf::from(DEFAULT_MODEL_PATH),
        {
            let mut p = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            p.pop(); // exe dir
            p.push(DEFAULT_MODEL_PATH);
            p
        },
    ];

    for c in candidates {
        if c.exists() {
            return c;
        }
    }

    // Fallback to default relative path; loading will report the model unavailable
    PathBuf::from(DEFAULT_MODEL_PATH)
}
