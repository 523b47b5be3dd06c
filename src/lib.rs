//! Heart-disease risk prediction service.
//!
//! Serves binary risk predictions from a pre-trained classifier over a fixed
//! 13-field clinical feature vector. The pipeline for each request is
//! validate -> vectorize -> scale -> classify -> respond; the fitted artifact
//! pair is loaded once at startup and shared read-only by all requests. When
//! artifacts are missing or corrupt the service runs degraded: health
//! reporting stays up while predictions return a service-unavailable error.

use std::path::Path;
use std::sync::Arc;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod settings;

use application::services::ArtifactStore;
use application::InferenceService;
use infrastructure::artifacts::fs_store;

/// Loads artifacts from `model_dir` and wires the inference service.
///
/// Never fails: a failed load produces a degraded service that still serves
/// health and banner endpoints.
pub fn build_service(model_dir: impl AsRef<Path>) -> Arc<InferenceService> {
    let artifacts: Arc<ArtifactStore> = Arc::new(fs_store::load(model_dir));
    Arc::new(InferenceService::new(artifacts))
}
