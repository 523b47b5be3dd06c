//! Deserialized forms of the fitted model artifacts and their inference math.

pub mod forest;
pub mod scaler;

pub use forest::{DecisionTree, ForestClassifier, TreeNode};
pub use scaler::StandardScaler;
