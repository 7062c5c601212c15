//! Prototype-based fuzzy edge detection.
//!
//! Each pixel's 3×3 neighborhood reduces to four directional difference
//! magnitudes which are matched against six prototype centers; directional
//! edge classes then pass a non-maximum comparison along their direction.
//!
//! - `prototypes` – [`PixelClass`], the centers and the membership function.
//! - `detector` – the classify → non-maximum → suppress driver.

mod detector;
mod prototypes;

pub use detector::{ClassifyError, FuzzyDetection, FuzzyEdgeDetector, FuzzyParams};
pub use prototypes::{PixelClass, PrototypeSet};
