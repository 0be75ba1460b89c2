//! Numeric accuracy bookkeeping for the Ruleweave training loop.
//!
//! This crate provides the small, dependency-free statistics the controller
//! and the evaluation engine share:
//!
//! - [`tracking`]: the fixed-length circular correctness buffer behind the
//!   running-accuracy estimate
//! - [`confusion`]: 2×2 confusion counts and guarded balanced accuracy
//! - [`accuracy`]: coverage adjustment and RMSE-derived accuracy helpers
//!
//! Statistical degeneracies (zero covered instances, empty confusion-matrix
//! denominators) are expected under heavy overfitting or undercoverage, so
//! every ratio here is guarded to a defined default instead of raising.
//!
//! # Examples
//!
//! ```
//! use ruleweave_stats::confusion::ConfusionCounts;
//!
//! let mut counts = ConfusionCounts::default();
//! counts.record(true, true);
//! counts.record(false, false);
//! assert_eq!(counts.balanced_accuracy(), 1.0);
//! ```

pub mod accuracy;
pub mod confusion;
pub mod tracking;
