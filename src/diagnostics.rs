//! Serializable per-stage traces emitted by the pipeline drivers.
//!
//! Each detector's `process_with_trace` fills one of these structs with the
//! effective parameters, per-stage wall-clock timings and simple output
//! statistics; the demo tools dump them as JSON next to the result images.
use serde::Serialize;

/// Trace of one network edge-detection run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnTrace {
    pub width: usize,
    pub height: usize,
    /// Threshold the binarization actually used.
    pub threshold: u8,
    /// Whether the threshold came from the caller instead of the selector.
    pub threshold_overridden: bool,
    /// 255-valued pixels in the final buffer.
    pub edge_pixels: usize,
    pub threshold_ms: f64,
    pub binarize_ms: f64,
    pub classify_ms: f64,
    pub suppress_ms: f64,
    pub total_ms: f64,
}

/// Trace of one fuzzy edge-detection run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyTrace {
    pub width: usize,
    pub height: usize,
    pub low: i32,
    pub high: i32,
    pub weight: i32,
    /// Pixels assigned to each of the six classes, by prototype index.
    pub class_counts: [usize; 6],
    /// 255-valued pixels in the final buffer.
    pub edge_pixels: usize,
    pub classify_ms: f64,
    pub nms_ms: f64,
    pub suppress_ms: f64,
    pub total_ms: f64,
}

/// Trace of one contrast-enhancement run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceTrace {
    pub width: usize,
    pub height: usize,
    pub exponent: f64,
    /// Darkest input sample.
    pub min: u8,
    /// Brightest input sample.
    pub max: u8,
    /// Sample value whose membership is exactly 0.5.
    pub crossover: i32,
    /// Scale of the membership curve.
    pub denominator: f64,
    /// Lower membership clamp applied after intensification.
    pub alpha: f64,
    /// Output samples falling outside the conventional 0–255 range.
    pub out_of_range: usize,
    pub fuzzify_ms: f64,
    pub intensify_ms: f64,
    pub defuzzify_ms: f64,
    pub total_ms: f64,
}
