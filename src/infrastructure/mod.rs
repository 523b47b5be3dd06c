//! Infrastructure layer wiring concrete adapters (model math, artifact I/O).

pub mod artifacts;
pub mod model;

pub use model::{DecisionTree, ForestClassifier, StandardScaler, TreeNode};
