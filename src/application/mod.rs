//! Application layer wiring DTOs and services for the prediction pipeline.

pub mod dtos;
pub mod services;

pub use dtos::{HealthStatusResponse, ServiceBannerResponse};
pub use services::InferenceService;
