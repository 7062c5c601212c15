//! Global 256-bin sample histogram.
//!
//! The threshold selector consumes a histogram instead of the raw image so
//! that hosts which already track intensity statistics can feed them in
//! directly. Invariant: the per-bin counts sum to `total`.
use crate::image::{ImageU8, ImageView};

/// Fixed 256-bin histogram of 8-bit samples plus the total sample count.
#[derive(Clone, Debug)]
pub struct Histogram {
    counts: [u32; 256],
    total: u64,
}

impl Histogram {
    /// Count every sample of a grayscale image.
    pub fn from_image(gray: &ImageU8<'_>) -> Self {
        let mut counts = [0u32; 256];
        for row in gray.rows() {
            for &v in row {
                counts[v as usize] += 1;
            }
        }
        Histogram {
            counts,
            total: (gray.w * gray.h) as u64,
        }
    }

    /// Build from raw counts; the total is derived so the invariant holds.
    pub fn from_counts(counts: [u32; 256]) -> Self {
        let total = counts.iter().map(|&c| c as u64).sum();
        Histogram { counts, total }
    }

    pub fn counts(&self) -> &[u32; 256] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Occurrences of one sample value.
    pub fn count(&self, sample: u8) -> u32 {
        self.counts[sample as usize]
    }
}
