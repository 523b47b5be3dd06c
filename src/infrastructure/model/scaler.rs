use serde::{Deserialize, Serialize};

use crate::{application::services::FeatureScaler, domain::DomainError};

/// Fitted standardization transform persisted by the offline training run.
///
/// Applies the standard score `(x - mean) / scale` per feature, positionally.
/// `scale` holds the learned per-feature standard deviation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, DomainError> {
        let scaler = Self { mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Checks internal well-formedness after deserialization. A scaler that
    /// fails here is treated as a corrupt artifact by the loader.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.mean.len() != self.scale.len() {
            return Err(DomainError::artifact(format!(
                "scaler mean/scale length mismatch: {} vs {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.is_empty() {
            return Err(DomainError::artifact("scaler has no fitted features"));
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(DomainError::artifact("scaler mean contains non-finite values"));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(DomainError::artifact(
                "scaler scale entries must be finite and positive",
            ));
        }
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError> {
        if features.len() != self.mean.len() {
            return Err(DomainError::inference(format!(
                "feature dimension mismatch: got {}, scaler fitted for {}",
                features.len(),
                self.mean.len()
            )));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}
