//! Per-category accuracy buckets for discrete evaluation.
//!
//! Every decided instance contributes to the bucket of every known category:
//! either as an in-class instance (the instance's true category is the
//! bucket's category) or as an out-of-class instance. The buckets feed the
//! macro-averaged standard and balanced accuracy statistics.

use ruleweave_stats::accuracy::guarded_ratio;

/// Accuracy bookkeeping for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassAccuracy {
    hits_in_class: u64,
    misses_in_class: u64,
    hits_out_of_class: u64,
    misses_out_of_class: u64,
}

impl ClassAccuracy {
    /// Records one decided instance against this category's bucket.
    ///
    /// `is_this_class` - the instance's true category is this bucket's
    /// category. `accurate` - the prediction matched the true category.
    pub fn update(&mut self, is_this_class: bool, accurate: bool) {
        match (is_this_class, accurate) {
            (true, true) => self.hits_in_class += 1,
            (true, false) => self.misses_in_class += 1,
            (false, true) => self.hits_out_of_class += 1,
            (false, false) => self.misses_out_of_class += 1,
        }
    }

    /// Decided in-class instances that were correctly classified.
    #[must_use]
    pub fn hits_in_class(&self) -> u64 {
        self.hits_in_class
    }

    #[must_use]
    pub fn correctly_classified(&self) -> u64 {
        self.hits_in_class + self.hits_out_of_class
    }

    #[must_use]
    pub fn incorrectly_classified(&self) -> u64 {
        self.misses_in_class + self.misses_out_of_class
    }

    /// Fraction of decided instances this bucket saw classified correctly,
    /// 0.0 when the bucket is empty.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn standard_accuracy(&self) -> f64 {
        guarded_ratio(
            self.correctly_classified() as f64,
            (self.correctly_classified() + self.incorrectly_classified()) as f64,
        )
    }

    /// In-class recall, 0.0 when no in-class instance was decided.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn sensitivity(&self) -> f64 {
        guarded_ratio(
            self.hits_in_class as f64,
            (self.hits_in_class + self.misses_in_class) as f64,
        )
    }

    /// Out-of-class recall, 0.0 when no out-of-class instance was decided.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn specificity(&self) -> f64 {
        guarded_ratio(
            self.hits_out_of_class as f64,
            (self.hits_out_of_class + self.misses_out_of_class) as f64,
        )
    }

    /// Mean of sensitivity and specificity, both guarded to 0.0.
    #[must_use]
    pub fn balanced_accuracy(&self) -> f64 {
        (self.sensitivity() + self.specificity()) / 2.0
    }
}
