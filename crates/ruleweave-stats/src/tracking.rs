//! Fixed-length circular buffer of per-instance correctness values.

/// Circular buffer holding one correctness value per learning iteration
/// within the current tracking window.
///
/// Discrete targets store 1.0/0.0 correctness; continuous targets store the
/// absolute prediction error. The value for iteration `i` lives at index
/// `i % window_len`, so a full window is overwritten exactly once per
/// `window_len` iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingWindow {
    values: Vec<f64>,
}

impl TrackingWindow {
    /// Creates a zero-filled window of length `window_len`.
    ///
    /// # Panics
    ///
    /// Panics if `window_len` is zero.
    #[must_use]
    pub fn new(window_len: usize) -> Self {
        assert!(window_len > 0, "tracking window length must be positive");
        Self {
            values: vec![0.0; window_len],
        }
    }

    /// Reconstructs a window from persisted values (resume path).
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "tracking window length must be positive");
        Self { values }
    }

    #[must_use]
    pub fn window_len(&self) -> usize {
        self.values.len()
    }

    /// Stores `value` at the slot for `iteration` (`iteration % window_len`).
    pub fn record(&mut self, iteration: usize, value: f64) {
        let index = iteration % self.values.len();
        self.values[index] = value;
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn sum_of_squares(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum()
    }

    /// Root-mean-square of the buffered values over the full window length.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        #[expect(clippy::cast_precision_loss)]
        let n = self.values.len() as f64;
        (self.sum_of_squares() / n).sqrt()
    }
}
