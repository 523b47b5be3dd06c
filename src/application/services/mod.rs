//! Service layer orchestrating domain operations and infrastructure adapters.

mod inference_service;

pub use inference_service::{ArtifactStore, FeatureScaler, InferenceService, RiskClassifier};
