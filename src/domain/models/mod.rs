use serde::{Deserialize, Serialize};

/// Number of clinical features the scaler and classifier were fitted on.
pub const FEATURE_COUNT: usize = 13;

/// Feature order shared with the offline training run.
///
/// The scaler's per-feature statistics and the classifier's split indices
/// are positional, so reordering these names silently corrupts predictions
/// without raising an error. Treat this constant as a versioned contract
/// with the training side, not as documentation.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// One validated patient record, ready for vectorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    pub age: i64,
    /// 1 = male, 0 = female
    pub sex: i64,
    /// Chest pain type (0-3)
    pub cp: i64,
    /// Resting blood pressure in mmHg
    pub trestbps: i64,
    /// Serum cholesterol in mg/dl
    pub chol: i64,
    /// Fasting blood sugar > 120 mg/dl (1 = true, 0 = false)
    pub fbs: i64,
    /// Resting electrocardiographic result (0-2)
    pub restecg: i64,
    /// Maximum heart rate achieved
    pub thalach: i64,
    /// Exercise induced angina (1 = yes, 0 = no)
    pub exang: i64,
    /// ST depression induced by exercise relative to rest
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment (0-2)
    pub slope: i64,
    /// Number of major vessels colored by fluoroscopy (0-4)
    pub ca: i64,
    /// Thalassemia (1 = normal, 2 = fixed defect, 3 = reversible defect)
    pub thal: i64,
}

impl PatientRecord {
    /// Converts the record into the positional vector the artifacts expect.
    ///
    /// Pure and total; positions follow [`FEATURE_ORDER`] exactly.
    pub fn to_feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.age as f64,
            self.sex as f64,
            self.cp as f64,
            self.trestbps as f64,
            self.chol as f64,
            self.fbs as f64,
            self.restecg as f64,
            self.thalach as f64,
            self.exang as f64,
            self.oldpeak,
            self.slope as f64,
            self.ca as f64,
            self.thal as f64,
        ]
    }
}

/// Raw classifier output before response assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOutput {
    /// Predicted class: 1 = disease likely, 0 = disease unlikely.
    pub class: u8,
    /// Probability assigned to the positive class, in [0, 1].
    pub probability: f64,
}

/// Human-readable risk label, derived strictly from the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    /// `High` iff the predicted class is 1; never derived from a
    /// probability threshold, so a class-1 result at probability 0.51 is
    /// labeled the same as one at 0.99.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

/// Response entity for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub probability: f64,
    pub risk_level: RiskLevel,
}

impl From<ClassifierOutput> for PredictionResult {
    fn from(output: ClassifierOutput) -> Self {
        Self {
            prediction: output.class,
            probability: output.probability,
            risk_level: RiskLevel::from_class(output.class),
        }
    }
}

/// Operating state of the service. `Degraded` means one or both artifacts
/// failed to load; the only transition back to `Ready` is a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Ready,
    Degraded,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            age: 57,
            sex: 0,
            cp: 1,
            trestbps: 130,
            chol: 236,
            fbs: 0,
            restecg: 0,
            thalach: 174,
            exang: 0,
            oldpeak: 0.0,
            slope: 1,
            ca: 1,
            thal: 2,
        }
    }

    #[test]
    fn feature_vector_follows_declared_order() {
        let vector = sample_record().to_feature_vector();
        assert_eq!(vector.len(), FEATURE_ORDER.len());
        assert_eq!(vector[0], 57.0); // age
        assert_eq!(vector[2], 1.0); // cp
        assert_eq!(vector[7], 174.0); // thalach
        assert_eq!(vector[9], 0.0); // oldpeak
        assert_eq!(vector[12], 2.0); // thal
    }

    #[test]
    fn risk_level_derives_from_class_only() {
        assert_eq!(RiskLevel::from_class(1), RiskLevel::High);
        assert_eq!(RiskLevel::from_class(0), RiskLevel::Low);

        // Near the decision boundary the label still follows the class.
        let result = PredictionResult::from(ClassifierOutput {
            class: 1,
            probability: 0.51,
        });
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.prediction, 1);
    }

    #[test]
    fn risk_level_serializes_as_plain_label() {
        let json = serde_json::to_string(&RiskLevel::High).expect("serialize");
        assert_eq!(json, "\"High\"");
        let json = serde_json::to_string(&RiskLevel::Low).expect("serialize");
        assert_eq!(json, "\"Low\"");
    }
}
