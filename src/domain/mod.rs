//! Domain layer: core entities and value objects for heart-disease risk serving.

pub mod errors;
pub mod models;

pub use errors::DomainError;
pub use models::{
    ClassifierOutput, PatientRecord, PredictionResult, RiskLevel, ServiceState, FEATURE_COUNT,
    FEATURE_ORDER,
};
