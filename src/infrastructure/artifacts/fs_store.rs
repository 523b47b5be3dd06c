use std::fs;
use std::path::Path;
use std::sync::Arc;

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};

use crate::{
    application::services::ArtifactStore,
    domain::DomainError,
    infrastructure::model::{ForestClassifier, StandardScaler},
};

/// Classifier artifact filename inside the model directory.
pub const MODEL_FILENAME: &str = "heart_model";
/// Scaler artifact filename inside the model directory.
pub const SCALER_FILENAME: &str = "scaler";

/// Loads the artifact pair from `base_dir`, exactly once at startup.
///
/// Any read, decode, or well-formedness failure logs the cause and yields an
/// unavailable store. Neither artifact is ever loaded alone: the service
/// starts degraded instead of refusing to boot or half-booting.
pub fn load(base_dir: impl AsRef<Path>) -> ArtifactStore {
    let dir = base_dir.as_ref();
    match try_load(dir) {
        Ok((scaler, forest)) => {
            info!(
                "loaded model artifacts from {:?} ({} features, {} trees)",
                dir,
                forest.n_features,
                forest.trees.len()
            );
            ArtifactStore::ready(Arc::new(scaler), Arc::new(forest))
        }
        Err(err) => {
            error!("failed to load model artifacts from {:?}: {err}", dir);
            ArtifactStore::unavailable(err.to_string())
        }
    }
}

fn try_load(dir: &Path) -> Result<(StandardScaler, ForestClassifier), DomainError> {
    let scaler: StandardScaler = read_artifact(&dir.join(SCALER_FILENAME))?;
    scaler.validate()?;

    let forest: ForestClassifier = read_artifact(&dir.join(MODEL_FILENAME))?;
    forest.validate()?;

    Ok((scaler, forest))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let bytes = fs::read(path)
        .map_err(|err| DomainError::artifact(format!("failed to read {:?}: {err}", path)))?;

    bincode::options()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .deserialize(&bytes)
        .map_err(|err| DomainError::artifact(format!("failed to decode {:?}: {err}", path)))
}

/// Serializes one artifact with the same encoding the loader expects.
/// Used by the artifact generator binary and by tests.
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| DomainError::artifact(format!("failed to create {:?}: {err}", parent)))?;
    }

    let bytes = bincode::options()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .serialize(value)
        .map_err(|err| DomainError::artifact(format!("serialization error: {err}")))?;

    fs::write(path, bytes)
        .map_err(|err| DomainError::artifact(format!("failed to write {:?}: {err}", path)))
}
