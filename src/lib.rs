#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod ann;
pub mod diagnostics;
pub mod enhance;
pub mod fuzzy;
pub mod image;

// Building blocks shared by the pipelines – public for tools and tests.
pub mod histogram;
pub mod suppress;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the three pipeline drivers and their parameter types.
pub use crate::ann::{AnnEdgeDetector, AnnParams, NetworkWeights};
pub use crate::enhance::{ContrastEnhancer, EnhanceParams};
pub use crate::fuzzy::{FuzzyEdgeDetector, FuzzyParams, PixelClass};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pixel_filters::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, data: &gray };
///
/// let detector = FuzzyEdgeDetector::new(FuzzyParams::default());
/// let edges = detector.process(img).expect("non-empty image");
/// println!("edge pixels: {}", edges.count_eq(255));
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{GrayBuffer, ImageU8};
    pub use crate::{
        AnnEdgeDetector, AnnParams, ContrastEnhancer, EnhanceParams, FuzzyEdgeDetector,
        FuzzyParams, NetworkWeights,
    };
}
