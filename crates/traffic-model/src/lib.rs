//! Model loading for traffic inference.
//!
//! A model artifact is a JSON document that names the features it was
//! fitted on and carries the parameters of one regression model:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "features": ["hour", "month", "X", "Y"],
//!   "model": { "kind": "linear", "intercept": 12.5, "coefficients": [1.0, 2.0, 3.0, 4.0] }
//! }
//! ```
//!
//! [`load_model`] reads, parses and validates an artifact and returns it as
//! a shared [`Predictor`]. Every failure is a [`ModelLoadError`]; callers are
//! expected to treat it as fatal.

mod artifact;
mod ensemble;
mod linear;

pub use artifact::{ModelArtifact, ModelSpec, FORMAT_VERSION};
pub use ensemble::{Aggregation, Tree, TreeEnsemble, TreeNode};
pub use linear::LinearModel;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};
use traffic_core::Predictor;

/// Default artifact file name, resolved next to the running executable.
pub const DEFAULT_MODEL_FILE: &str = "traffic_model.json";

/// Errors that prevent a model from being loaded.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Model file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read model file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Unsupported model format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Model feature schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Default artifact location: [`DEFAULT_MODEL_FILE`] in the executable's directory.
pub fn default_model_path() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_MODEL_FILE))
}

/// Loads and validates the model artifact at `path`.
pub fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn Predictor>, ModelLoadError> {
    let path = path.as_ref();

    match read_artifact(path).and_then(ModelArtifact::into_predictor) {
        Ok(model) => {
            info!("Model loaded successfully: {} from {}", model.kind(), path.display());
            Ok(model)
        }
        Err(e) => {
            error!("Failed to load model: {}", e);
            Err(e)
        }
    }
}

fn read_artifact(path: &Path) -> Result<ModelArtifact, ModelLoadError> {
    if !path.exists() {
        return Err(ModelLoadError::NotFound { path: path.to_path_buf() });
    }

    let content = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    ModelArtifact::from_json(&content)
}
