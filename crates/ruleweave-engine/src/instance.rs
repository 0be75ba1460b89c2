//! Labeled instances and the target-kind decision.
//!
//! The target kind (discrete categories vs. a continuous `[min, max]` range)
//! is decided exactly once, when the dataset is formatted, and threaded
//! through the system as a [`TargetKind`] value. Components dispatch on the
//! variant instead of consulting a scattered runtime flag.

use serde::{Deserialize, Serialize};

/// Which dataset a pass operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
}

/// A predicted or true target value.
///
/// Discrete targets carry their category label; continuous targets carry the
/// numeric value. Comparison is ordinary value equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::Display)]
pub enum PhenotypeValue {
    /// A category label of a discrete target.
    #[display("{_0}")]
    Category(String),
    /// A numeric value of a continuous target.
    #[display("{_0}")]
    Value(f64),
}

impl PhenotypeValue {
    /// Interprets this value as a binary class, treating category `"1"` as
    /// positive and `"0"` as negative.
    ///
    /// Returns `None` for continuous values and for categories outside the
    /// binary {0, 1} label space; confusion-matrix bookkeeping is a
    /// binary-only statistic and skips such values.
    #[must_use]
    pub fn as_binary_class(&self) -> Option<bool> {
        match self {
            PhenotypeValue::Category(label) => match label.as_str() {
                "1" => Some(true),
                "0" => Some(false),
                _ => None,
            },
            PhenotypeValue::Value(_) => None,
        }
    }
}

/// The target variable's kind, decided once at initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetKind {
    /// A discrete target with its full category list, in dataset order.
    Discrete { categories: Vec<String> },
    /// A continuous target with its known `[min, max]` bounds.
    Continuous { min: f64, max: f64 },
}

impl TargetKind {
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, TargetKind::Discrete { .. })
    }

    /// Probability of guessing a discrete target correctly by chance
    /// (`1 / |categories|`). Returns 0.0 for an empty category list rather
    /// than dividing by zero.
    #[must_use]
    pub fn chance_rate(&self) -> f64 {
        match self {
            #[expect(clippy::cast_precision_loss)]
            TargetKind::Discrete { categories } if !categories.is_empty() => {
                1.0 / categories.len() as f64
            }
            _ => 0.0,
        }
    }
}

/// A single labeled data instance: feature vector plus true phenotype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub features: Vec<f64>,
    pub label: PhenotypeValue,
}

impl Instance {
    #[must_use]
    pub fn new(features: Vec<f64>, label: PhenotypeValue) -> Self {
        Self { features, label }
    }
}
