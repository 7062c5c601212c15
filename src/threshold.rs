//! Global threshold selection and two-level conversion.
//!
//! `select_threshold` scans all 256 candidate thresholds and maximizes the
//! between-class variance `wB · wF · (mB − mF)²` of the induced fore/background
//! split. Two running maxima are tracked: the last candidate that ties the
//! current maximum and the last candidate that strictly improved it. The
//! returned threshold is the integer midpoint of the two, which centers the
//! result on a plateau of equally-scoring candidates. Callers that need
//! bit-for-bit parity must keep both counters, not a single running max.
use crate::histogram::Histogram;
use crate::image::{GrayBuffer, ImageU8, ImageView, ImageViewMut};

/// Reasons why threshold selection may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    /// The histogram contains no samples at all.
    EmptyHistogram,
}

impl std::fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdError::EmptyHistogram => write!(f, "histogram contains no samples"),
        }
    }
}

impl std::error::Error for ThresholdError {}

/// Select a global threshold by maximizing between-class variance.
pub fn select_threshold(hist: &Histogram) -> Result<u8, ThresholdError> {
    let total = hist.total();
    if total == 0 {
        return Err(ThresholdError::EmptyHistogram);
    }
    let counts = hist.counts();

    let weighted_total: u64 = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| i as u64 * c as u64)
        .sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0u64;
    let mut max_score = 0.0f64;
    let mut last_at_max = 0usize;
    let mut first_at_max = 0usize;

    for (i, &c) in counts.iter().enumerate() {
        weight_bg += c as u64;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }

        sum_bg += i as u64 * c as u64;
        let mean_bg = sum_bg as f64 / weight_bg as f64;
        let mean_fg = (weighted_total - sum_bg) as f64 / weight_fg as f64;
        let diff = mean_bg - mean_fg;
        let score = weight_bg as f64 * weight_fg as f64 * diff * diff;

        if score >= max_score {
            last_at_max = i;
            if score > max_score {
                first_at_max = i;
            }
            max_score = score;
        }
    }

    Ok(((last_at_max + first_at_max) / 2) as u8)
}

/// Map a grayscale buffer to a two-level {0, 255} buffer.
///
/// A sample maps to 255 iff it is `>= threshold`; the output starts
/// zero-initialized so the else-branch is implicit.
pub fn binarize(gray: ImageU8<'_>, threshold: u8) -> GrayBuffer {
    let mut out = GrayBuffer::new(gray.w, gray.h);
    for (src, dst) in gray.rows().zip(out.rows_mut()) {
        for (&s, d) in src.iter().zip(dst.iter_mut()) {
            if s >= threshold {
                *d = 255;
            }
        }
    }
    out
}
