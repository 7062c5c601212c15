//! Network-based block edge detection.
//!
//! A fixed 4→12→4 feedforward network, trained offline and loaded from a
//! text resource, classifies every overlapping 2×2 block of a thresholded
//! image. The pipeline:
//!
//! - [`weights`] – matrix shapes, the text-format parser and the
//!   [`WeightProvider`] seam for injecting the resource.
//! - `network` – the sigmoid feedforward evaluation.
//! - `detector` – the threshold → binarize → classify → suppress driver.

mod detector;
mod network;
pub mod weights;

pub use detector::{AnnDetection, AnnEdgeDetector, AnnParams};
pub use network::EdgeNetwork;
pub use weights::{
    FsWeightProvider, NetworkWeights, WeightError, WeightProvider, HIDDEN_UNITS, INPUT_UNITS,
    OUTPUT_UNITS,
};
