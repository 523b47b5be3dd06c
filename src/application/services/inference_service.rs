use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::{
    application::dtos::HealthStatusResponse,
    domain::{ClassifierOutput, DomainError, PatientRecord, PredictionResult, ServiceState},
};

/// Abstraction over the fitted preprocessing transform.
///
/// Implementations map a raw positional feature vector to the standardized
/// representation the classifier was trained on.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError>;
}

/// Abstraction over the fitted classifier.
pub trait RiskClassifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<ClassifierOutput, DomainError>;
}

struct ArtifactPair {
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn RiskClassifier>,
}

/// Immutable handle to the loaded artifact pair, shared by every request.
///
/// Constructed exactly once at startup and injected into the service, so the
/// `Ready`/`Degraded` state machine is explicit and testable without process
/// restarts. Both artifacts are present or neither is; there is no partial
/// state, and nothing mutates after construction.
pub struct ArtifactStore {
    pair: Option<ArtifactPair>,
    detail: Option<String>,
}

impl ArtifactStore {
    /// A store holding both fitted artifacts.
    pub fn ready(scaler: Arc<dyn FeatureScaler>, classifier: Arc<dyn RiskClassifier>) -> Self {
        Self {
            pair: Some(ArtifactPair { scaler, classifier }),
            detail: None,
        }
    }

    /// A degraded store recording why the artifacts are missing.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            pair: None,
            detail: Some(reason.into()),
        }
    }

    /// Whether both artifacts are present and usable. Side-effect-free.
    pub fn is_ready(&self) -> bool {
        self.pair.is_some()
    }

    pub fn state(&self) -> ServiceState {
        if self.is_ready() {
            ServiceState::Ready
        } else {
            ServiceState::Degraded
        }
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn pair(&self) -> Result<&ArtifactPair, DomainError> {
        self.pair.as_ref().ok_or_else(|| {
            DomainError::unavailable("model artifacts are not loaded; restart with valid artifacts")
        })
    }
}

/// Turns one validated patient record into one prediction, or a precise error.
pub struct InferenceService {
    artifacts: Arc<ArtifactStore>,
}

impl InferenceService {
    pub fn new(artifacts: Arc<ArtifactStore>) -> Self {
        Self { artifacts }
    }

    pub fn is_ready(&self) -> bool {
        self.artifacts.is_ready()
    }

    /// Validates a raw JSON payload into a [`PatientRecord`].
    ///
    /// Every field must be present and coercible to its declared numeric
    /// type: integer fields accept JSON integers and integral floats,
    /// `oldpeak` accepts any JSON number. Categorical codes are deliberately
    /// not range-checked; out-of-range codes flow through to the model
    /// because the training-side contract is unknown here.
    pub fn validate(raw: &Value) -> Result<PatientRecord, DomainError> {
        let map = raw
            .as_object()
            .ok_or_else(|| DomainError::validation("request body must be a JSON object"))?;

        Ok(PatientRecord {
            age: require_int(map, "age")?,
            sex: require_int(map, "sex")?,
            cp: require_int(map, "cp")?,
            trestbps: require_int(map, "trestbps")?,
            chol: require_int(map, "chol")?,
            fbs: require_int(map, "fbs")?,
            restecg: require_int(map, "restecg")?,
            thalach: require_int(map, "thalach")?,
            exang: require_int(map, "exang")?,
            oldpeak: require_real(map, "oldpeak")?,
            slope: require_int(map, "slope")?,
            ca: require_int(map, "ca")?,
            thal: require_int(map, "thal")?,
        })
    }

    /// Scales and classifies one record.
    ///
    /// Requires a ready artifact store; otherwise fails with
    /// [`DomainError::Unavailable`] and produces no partial result.
    pub fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, DomainError> {
        let pair = self.artifacts.pair()?;

        let features = record.to_feature_vector();
        let scaled = pair.scaler.transform(&features)?;
        let output = pair.classifier.predict(&scaled)?;

        Ok(PredictionResult::from(output))
    }

    /// Full request pipeline: validate, vectorize, scale, classify.
    pub fn predict_raw(&self, raw: &Value) -> Result<PredictionResult, DomainError> {
        let record = Self::validate(raw)?;
        self.predict(&record)
    }

    /// Reports the operating state. Always succeeds.
    pub fn health(&self) -> HealthStatusResponse {
        HealthStatusResponse {
            status: self.artifacts.state(),
            model_loaded: self.artifacts.is_ready(),
            detail: self.artifacts.detail().map(str::to_owned),
            checked_at: Utc::now(),
        }
    }
}

fn require_number<'a>(
    map: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a serde_json::Number, DomainError> {
    let value = map
        .get(field)
        .ok_or_else(|| DomainError::validation(format!("missing required field `{field}`")))?;

    value
        .as_number()
        .ok_or_else(|| DomainError::validation(format!("field `{field}` must be a number")))
}

fn require_int(map: &Map<String, Value>, field: &str) -> Result<i64, DomainError> {
    let number = require_number(map, field)?;

    if let Some(int) = number.as_i64() {
        return Ok(int);
    }

    // Accept integral floats such as 57.0, reject anything fractional.
    if let Some(real) = number.as_f64() {
        if real.fract() == 0.0 && real >= i64::MIN as f64 && real <= i64::MAX as f64 {
            return Ok(real as i64);
        }
    }

    Err(DomainError::validation(format!(
        "field `{field}` must be an integer"
    )))
}

fn require_real(map: &Map<String, Value>, field: &str) -> Result<f64, DomainError> {
    let number = require_number(map, field)?;

    number
        .as_f64()
        .filter(|real| real.is_finite())
        .ok_or_else(|| DomainError::validation(format!("field `{field}` must be a finite number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskLevel, FEATURE_ORDER};
    use serde_json::json;

    /// Pass-through scaler so test expectations stay hand-computable.
    struct IdentityScaler;

    impl FeatureScaler for IdentityScaler {
        fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError> {
            Ok(features.to_vec())
        }
    }

    /// Deterministic logistic scorer over a fixed weight vector. Sensitive
    /// to feature positions, which is exactly what the order-contract tests
    /// need.
    struct LinearClassifier {
        weights: Vec<f64>,
        bias: f64,
    }

    impl RiskClassifier for LinearClassifier {
        fn predict(&self, features: &[f64]) -> Result<ClassifierOutput, DomainError> {
            if features.len() != self.weights.len() {
                return Err(DomainError::inference(format!(
                    "feature dimension mismatch: got {}, expected {}",
                    features.len(),
                    self.weights.len()
                )));
            }

            let score: f64 = self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + self.bias;
            let probability = 1.0 / (1.0 + (-score).exp());
            let class = u8::from(probability > 0.5);

            Ok(ClassifierOutput { class, probability })
        }
    }

    fn linear_service() -> InferenceService {
        // Small weights on age and thalach keep probabilities away from
        // saturation for realistic inputs.
        let mut weights = vec![0.0; 13];
        weights[0] = 0.01; // age
        weights[7] = -0.012; // thalach
        weights[9] = 0.8; // oldpeak

        let store = ArtifactStore::ready(
            Arc::new(IdentityScaler),
            Arc::new(LinearClassifier {
                weights,
                bias: 0.9,
            }),
        );
        InferenceService::new(Arc::new(store))
    }

    fn sample_payload() -> Value {
        json!({
            "age": 57, "sex": 0, "cp": 1, "trestbps": 130, "chol": 236,
            "fbs": 0, "restecg": 0, "thalach": 174, "exang": 0,
            "oldpeak": 0.0, "slope": 1, "ca": 1, "thal": 2
        })
    }

    #[test]
    fn validates_complete_payload() {
        let record = InferenceService::validate(&sample_payload()).expect("valid payload");
        assert_eq!(record.age, 57);
        assert_eq!(record.thalach, 174);
        assert_eq!(record.oldpeak, 0.0);
    }

    #[test]
    fn every_missing_field_is_named() {
        for field in FEATURE_ORDER {
            let mut payload = sample_payload();
            payload
                .as_object_mut()
                .expect("object payload")
                .remove(field);

            let err = InferenceService::validate(&payload).expect_err("missing field");
            match err {
                DomainError::Validation(msg) => {
                    assert!(msg.contains(field), "`{msg}` should name `{field}`")
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_numeric_field() {
        let mut payload = sample_payload();
        payload["chol"] = json!("high");

        let err = InferenceService::validate(&payload).expect_err("non-numeric");
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("chol")));
    }

    #[test]
    fn rejects_fractional_value_for_integer_field() {
        let mut payload = sample_payload();
        payload["cp"] = json!(1.5);

        let err = InferenceService::validate(&payload).expect_err("fractional int");
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("cp")));
    }

    #[test]
    fn accepts_integral_float_for_integer_field() {
        let mut payload = sample_payload();
        payload["age"] = json!(57.0);

        let record = InferenceService::validate(&payload).expect("integral float coerces");
        assert_eq!(record.age, 57);
    }

    #[test]
    fn accepts_fractional_oldpeak() {
        let mut payload = sample_payload();
        payload["oldpeak"] = json!(1.4);

        let record = InferenceService::validate(&payload).expect("real field");
        assert_eq!(record.oldpeak, 1.4);
    }

    #[test]
    fn out_of_range_categorical_codes_pass_validation() {
        // Documented permissive boundary: codes outside the documented
        // category ranges are type-checked only and flow to the model.
        let mut payload = sample_payload();
        payload["thal"] = json!(0);
        payload["cp"] = json!(7);

        let record = InferenceService::validate(&payload).expect("permissive categoricals");
        assert_eq!(record.thal, 0);
        assert_eq!(record.cp, 7);
    }

    #[test]
    fn rejects_non_object_body() {
        let err = InferenceService::validate(&json!([1, 2, 3])).expect_err("array body");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn degraded_store_gates_every_prediction() {
        let store = ArtifactStore::unavailable("failed to read models/heart_model");
        let service = InferenceService::new(Arc::new(store));

        let err = service
            .predict_raw(&sample_payload())
            .expect_err("degraded service");
        assert!(matches!(err, DomainError::Unavailable(_)));

        let health = service.health();
        assert_eq!(health.status, ServiceState::Degraded);
        assert!(!health.model_loaded);
        assert!(health.detail.is_some());
    }

    #[test]
    fn ready_store_reports_ready_health() {
        let service = linear_service();
        let health = service.health();
        assert_eq!(health.status, ServiceState::Ready);
        assert!(health.model_loaded);
        assert!(health.detail.is_none());
    }

    #[test]
    fn prediction_is_deterministic() {
        let service = linear_service();
        let first = service.predict_raw(&sample_payload()).expect("predict");
        let second = service.predict_raw(&sample_payload()).expect("predict");
        assert_eq!(first, second);
    }

    #[test]
    fn probability_in_range_and_label_matches_class() {
        let service = linear_service();
        let result = service.predict_raw(&sample_payload()).expect("predict");

        assert!((0.0..=1.0).contains(&result.probability));
        assert!(result.prediction == 0 || result.prediction == 1);
        assert_eq!(
            result.risk_level == RiskLevel::High,
            result.prediction == 1
        );
    }

    #[test]
    fn swapping_two_features_changes_the_probability() {
        // The positional contract is load-bearing: feeding thalach where
        // age belongs must not be a no-op.
        let service = linear_service();
        let straight = service.predict_raw(&sample_payload()).expect("predict");

        let mut swapped = sample_payload();
        swapped["age"] = json!(174);
        swapped["thalach"] = json!(57);
        let crossed = service.predict_raw(&swapped).expect("predict");

        assert_ne!(straight.probability, crossed.probability);
    }
}
