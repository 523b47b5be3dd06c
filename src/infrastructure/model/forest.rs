use serde::{Deserialize, Serialize};

use crate::{
    application::services::RiskClassifier,
    domain::{ClassifierOutput, DomainError},
};

/// One node of a fitted decision tree, stored flat and index-linked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Binary split: go left when `features[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node carrying the training-sample weight per class
    /// (index 0 = negative, index 1 = positive).
    Leaf { weights: [f64; 2] },
}

/// A single fitted decision tree. Node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Probability the tree assigns to the positive class for `features`.
    fn positive_probability(&self, features: &[f64]) -> Result<f64, DomainError> {
        let mut index = 0usize;

        // A well-formed tree reaches a leaf within `nodes.len()` hops; the
        // bound turns an index cycle in a corrupt artifact into an error
        // instead of a hang.
        for _ in 0..=self.nodes.len() {
            match self
                .nodes
                .get(index)
                .ok_or_else(|| DomainError::inference("tree node index out of bounds"))?
            {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).ok_or_else(|| {
                        DomainError::inference(format!(
                            "split feature index {feature} exceeds input width {}",
                            features.len()
                        ))
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                TreeNode::Leaf { weights } => {
                    let total = weights[0] + weights[1];
                    if total <= 0.0 {
                        return Err(DomainError::inference("leaf with non-positive weight sum"));
                    }
                    return Ok(weights[1] / total);
                }
            }
        }

        Err(DomainError::inference("tree traversal did not reach a leaf"))
    }

    fn validate(&self, n_features: usize) -> Result<(), DomainError> {
        if self.nodes.is_empty() {
            return Err(DomainError::artifact("tree has no nodes"));
        }
        for node in &self.nodes {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(DomainError::artifact(format!(
                            "split on feature {feature} but model declares {n_features} features"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(DomainError::artifact("split threshold is non-finite"));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(DomainError::artifact("split child index out of bounds"));
                    }
                }
                TreeNode::Leaf { weights } => {
                    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(DomainError::artifact("leaf weights must be non-negative"));
                    }
                    if weights[0] + weights[1] <= 0.0 {
                        return Err(DomainError::artifact("leaf weight sum must be positive"));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Fitted tree-ensemble classifier persisted by the offline training run.
///
/// Inference averages the per-tree positive-class probabilities and takes
/// the argmax, with ties resolved to the negative class. That matches the
/// behavior of the ensemble the artifacts were exported from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestClassifier {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestClassifier {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, DomainError> {
        let forest = Self { n_features, trees };
        forest.validate()?;
        Ok(forest)
    }

    /// Checks internal well-formedness after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.n_features == 0 {
            return Err(DomainError::artifact("classifier declares zero features"));
        }
        if self.trees.is_empty() {
            return Err(DomainError::artifact("classifier has no trees"));
        }
        for tree in &self.trees {
            tree.validate(self.n_features)?;
        }
        Ok(())
    }
}

impl RiskClassifier for ForestClassifier {
    fn predict(&self, features: &[f64]) -> Result<ClassifierOutput, DomainError> {
        if features.len() != self.n_features {
            return Err(DomainError::inference(format!(
                "feature dimension mismatch: got {}, classifier fitted for {}",
                features.len(),
                self.n_features
            )));
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.positive_probability(features)?;
        }
        let probability = sum / self.trees.len() as f64;
        let class = u8::from(probability > 0.5);

        Ok(ClassifierOutput { class, probability })
    }
}
