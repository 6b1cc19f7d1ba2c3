// crates/perf-pipeline-core/src/runtime/histogram.rs
// ============================================================================
// Module: Histogram Binning
// Description: Equal-width frequency bins for chart rendering.
// Purpose: Keep histogram math independent of the plotting backend.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`HistogramBins::compute`] splits `[min, max]` of the input into equal
//! width bins. Every bin is half-open except the last, which also includes
//! `max`. Degenerate inputs still produce a full set of bins:
//! - all values equal: the range widens to `[v - 0.5, v + 0.5]`,
//! - no values: the range is `[0, 1]` and every count is zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bin count used for department performance histograms.
pub const DEFAULT_BIN_COUNT: usize = 10;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (exclusive except for the last bin).
    pub upper: f64,
    /// Number of values in the bin.
    pub count: usize,
}

/// Equal-width histogram of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBins {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of values binned.
    pub total: usize,
}

impl HistogramBins {
    /// Bins `values` into `bin_count` equal-width bins (minimum one).
    #[must_use]
    pub fn compute(values: &[f64], bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        let (low, high) = value_range(values);
        let width = (high - low) / as_f64(bin_count);
        let mut bins: Vec<HistogramBin> = (0 .. bin_count)
            .map(|index| HistogramBin {
                lower: low + width * as_f64(index),
                upper: if index + 1 == bin_count {
                    high
                } else {
                    low + width * as_f64(index + 1)
                },
                count: 0,
            })
            .collect();
        for value in values {
            let index = bin_index(*value, low, width, bin_count);
            if let Some(bin) = bins.get_mut(index) {
                bin.count += 1;
            }
        }
        Self {
            bins,
            total: values.len(),
        }
    }

    /// Returns true when no values were binned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns the largest bin count.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Returns the lower edge of the first bin and upper edge of the last.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        let lower = self.bins.first().map_or(0.0, |bin| bin.lower);
        let upper = self.bins.last().map_or(1.0, |bin| bin.upper);
        (lower, upper)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a bin index to `f64`.
#[allow(clippy::cast_precision_loss, reason = "Bin indices are tiny.")]
const fn as_f64(value: usize) -> f64 {
    value as f64
}

/// Returns the binning range for a series.
fn value_range(values: &[f64]) -> (f64, f64) {
    let mut iter = values.iter().copied();
    let Some(first) = iter.next() else {
        return (0.0, 1.0);
    };
    let (min, max) =
        iter.fold((first, first), |(min, max), value| (min.min(value), max.max(value)));
    if min < max { (min, max) } else { (min - 0.5, max + 0.5) }
}

/// Returns the bin index for a value; the maximum lands in the last bin.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "The offset is clamped to [0, bin_count - 1] before conversion."
)]
fn bin_index(value: f64, low: f64, width: f64, bin_count: usize) -> usize {
    let offset = ((value - low) / width).floor();
    let last = as_f64(bin_count - 1);
    offset.clamp(0.0, last) as usize
}
