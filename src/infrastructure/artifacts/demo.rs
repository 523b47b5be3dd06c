//! Deterministic demo artifact pair.
//!
//! A small stand-in for the offline training output so the service can be
//! exercised locally without running the trainer. The scaler statistics
//! approximate the UCI heart-disease dataset; the ensemble is three shallow
//! trees over clinically plausible splits (ST depression, chest-pain type,
//! max heart rate, vessel count). Not meant for real predictions.

use crate::infrastructure::model::{DecisionTree, ForestClassifier, StandardScaler, TreeNode};

/// Per-feature means in [`crate::domain::FEATURE_ORDER`] order.
const DEMO_MEAN: [f64; 13] = [
    54.37, 0.68, 0.97, 131.62, 246.26, 0.15, 0.53, 149.65, 0.33, 1.04, 1.40, 0.73, 2.31,
];

/// Per-feature standard deviations in the same order.
const DEMO_SCALE: [f64; 13] = [
    9.08, 0.47, 1.03, 17.54, 51.83, 0.36, 0.53, 22.91, 0.47, 1.16, 0.62, 1.02, 0.61,
];

pub fn demo_scaler() -> StandardScaler {
    StandardScaler::new(DEMO_MEAN.to_vec(), DEMO_SCALE.to_vec())
        .expect("demo scaler statistics are well-formed")
}

pub fn demo_forest() -> ForestClassifier {
    let split = |feature, threshold, left, right| TreeNode::Split {
        feature,
        threshold,
        left,
        right,
    };
    let leaf = |weights| TreeNode::Leaf { weights };

    // Thresholds are in standardized units: 0.0 is the training mean.
    let oldpeak_tree = DecisionTree {
        nodes: vec![
            split(9, 0.0, 1, 2),
            leaf([30.0, 10.0]),
            leaf([8.0, 32.0]),
        ],
    };
    let chest_pain_tree = DecisionTree {
        nodes: vec![
            split(2, 0.0, 1, 2),
            leaf([30.0, 10.0]),
            leaf([12.0, 28.0]),
        ],
    };
    let heart_rate_tree = DecisionTree {
        nodes: vec![
            split(7, 0.0, 1, 2),
            leaf([25.0, 15.0]),
            split(11, -0.2, 3, 4),
            leaf([8.0, 32.0]),
            leaf([20.0, 20.0]),
        ],
    };

    ForestClassifier::new(13, vec![oldpeak_tree, chest_pain_tree, heart_rate_tree])
        .expect("demo forest is well-formed")
}

pub fn demo_pair() -> (StandardScaler, ForestClassifier) {
    (demo_scaler(), demo_forest())
}
