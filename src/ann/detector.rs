//! Network-based edge detection pipeline.
//!
//! The detector slides a 2×2 window over a two-level buffer with stride 1 and
//! classifies every fully-contained block with the fixed feedforward network.
//! Block outputs map positionally back onto the block's four cells; a cell is
//! only ever promoted to 255, never demoted, so overlapping evaluations
//! combine as a logical OR. Blocks that would stick out past the right or
//! bottom border are not visited.
//!
//! Typical usage:
//! ```no_run
//! use pixel_filters::ann::{AnnEdgeDetector, AnnParams, NetworkWeights};
//! use pixel_filters::image::ImageU8;
//!
//! # fn example(gray: ImageU8, weights: NetworkWeights) {
//! let detector = AnnEdgeDetector::new(weights, AnnParams::default());
//! let edges = detector.process(gray).expect("non-empty image");
//! println!("edge pixels: {}", edges.count_eq(255));
//! # }
//! ```
use super::network::EdgeNetwork;
use super::weights::NetworkWeights;
use crate::diagnostics::AnnTrace;
use crate::histogram::Histogram;
use crate::image::{GrayBuffer, ImageU8};
use crate::suppress::suppress_isolated;
use crate::threshold::{binarize, select_threshold, ThresholdError};
use log::debug;
use std::time::Instant;

/// Runtime parameters of the network edge pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnParams {
    /// Skip threshold selection and binarize with this value instead.
    pub threshold_override: Option<u8>,
}

/// Edge buffer plus the per-stage trace of the run that produced it.
#[derive(Clone, Debug)]
pub struct AnnDetection {
    pub edges: GrayBuffer,
    pub trace: AnnTrace,
}

/// Threshold → binarize → block classify → suppress pipeline.
pub struct AnnEdgeDetector {
    network: EdgeNetwork,
    params: AnnParams,
}

impl AnnEdgeDetector {
    /// Build a detector around fully-loaded weights.
    ///
    /// Weight loading happens strictly before construction; a detector can
    /// never exist with an unset or partial configuration.
    pub fn new(weights: NetworkWeights, params: AnnParams) -> Self {
        Self {
            network: EdgeNetwork::new(weights),
            params,
        }
    }

    /// Run the pipeline, returning only the final edge buffer.
    pub fn process(&self, gray: ImageU8<'_>) -> Result<GrayBuffer, ThresholdError> {
        Ok(self.process_with_trace(gray)?.edges)
    }

    /// Run the pipeline and keep the per-stage trace.
    pub fn process_with_trace(&self, gray: ImageU8<'_>) -> Result<AnnDetection, ThresholdError> {
        let (width, height) = (gray.w, gray.h);
        debug!(
            "AnnEdgeDetector::process start w={} h={} override={:?}",
            width, height, self.params.threshold_override
        );
        let total_start = Instant::now();

        let threshold_start = Instant::now();
        let hist = Histogram::from_image(&gray);
        if hist.total() == 0 {
            return Err(ThresholdError::EmptyHistogram);
        }
        let (threshold, overridden) = match self.params.threshold_override {
            Some(t) => (t, true),
            None => (select_threshold(&hist)?, false),
        };
        let threshold_ms = threshold_start.elapsed().as_secs_f64() * 1000.0;
        debug!("AnnEdgeDetector::process threshold={threshold} overridden={overridden}");

        let binarize_start = Instant::now();
        let binary = binarize(gray, threshold);
        let binarize_ms = binarize_start.elapsed().as_secs_f64() * 1000.0;

        let classify_start = Instant::now();
        let raw = self.classify_blocks(&binary);
        let classify_ms = classify_start.elapsed().as_secs_f64() * 1000.0;

        let suppress_start = Instant::now();
        let edges = suppress_isolated(raw.as_view());
        let suppress_ms = suppress_start.elapsed().as_secs_f64() * 1000.0;

        let edge_pixels = edges.count_eq(255);
        debug!("AnnEdgeDetector::process done edge_pixels={edge_pixels}");

        Ok(AnnDetection {
            edges,
            trace: AnnTrace {
                width,
                height,
                threshold,
                threshold_overridden: overridden,
                edge_pixels,
                threshold_ms,
                binarize_ms,
                classify_ms,
                suppress_ms,
                total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }

    /// Classify every fully-contained 2×2 block of a two-level buffer.
    fn classify_blocks(&self, binary: &GrayBuffer) -> GrayBuffer {
        let (w, h) = (binary.w, binary.h);
        let mut out = GrayBuffer::new(w, h);
        if w < 2 || h < 2 {
            return out;
        }

        // Output index k maps onto block cell (x + dx, y + dy).
        const CELLS: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

        for y in 0..h - 1 {
            for x in 0..w - 1 {
                let input = [
                    binary.get(x, y) as f64 / 255.0,
                    binary.get(x + 1, y) as f64 / 255.0,
                    binary.get(x, y + 1) as f64 / 255.0,
                    binary.get(x + 1, y + 1) as f64 / 255.0,
                ];
                let output = self.network.compute(input);
                for (value, (dx, dy)) in output.iter().zip(CELLS) {
                    // Promote only; earlier 255s survive later 0 outputs.
                    if value.round() as i32 == 1 {
                        out.set(x + dx, y + dy, 255);
                    }
                }
            }
        }
        out
    }
}
