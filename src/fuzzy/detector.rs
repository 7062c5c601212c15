//! Prototype-based fuzzy edge detection pipeline.
//!
//! Stage one summarizes every 3×3 neighborhood (edge-clamped at the borders)
//! into four directional difference magnitudes and classifies the vector
//! against the prototype set. Stage two applies a direction-specific
//! non-maximum rule: a directional edge pixel survives only if its difference
//! value strictly exceeds both neighbors along that direction, with missing
//! neighbors treated as minus infinity so the border never blocks an edge.
//! Stage three removes isolated positives.
use super::prototypes::{PixelClass, PrototypeSet};
use crate::diagnostics::FuzzyTrace;
use crate::image::{GrayBuffer, ImageU8};
use crate::suppress::suppress_isolated;
use log::debug;
use std::time::Instant;

/// Runtime parameters of the fuzzy edge pipeline.
#[derive(Clone, Copy, Debug)]
pub struct FuzzyParams {
    /// Center value for the low-variation components of the prototypes.
    pub low: i32,
    /// Center value for the high-variation components of the prototypes.
    pub high: i32,
    /// Distance normalizer of the membership function (> 0).
    pub weight: i32,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            low: 4,
            high: 48,
            weight: 240,
        }
    }
}

/// Reasons why fuzzy classification may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// The input buffer has no pixels.
    EmptyImage,
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::EmptyImage => write!(f, "input image has no pixels"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Edge buffer plus the per-stage trace of the run that produced it.
#[derive(Clone, Debug)]
pub struct FuzzyDetection {
    pub edges: GrayBuffer,
    pub trace: FuzzyTrace,
}

/// Per-pixel `(d1, d2, d3, d4)` difference vectors for a whole image.
///
/// Materialized before the non-maximum pass because that pass reads the
/// difference vectors of neighboring pixels, not just its own.
struct DifferenceField {
    w: usize,
    h: usize,
    data: Vec<[i32; 4]>,
}

impl DifferenceField {
    #[inline]
    fn get(&self, x: usize, y: usize) -> &[i32; 4] {
        &self.data[y * self.w + x]
    }

    /// Difference component at a neighbor, or `i32::MIN` when out of range.
    #[inline]
    fn component_at(&self, x: i32, y: i32, index: usize) -> i32 {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return i32::MIN;
        }
        self.data[y as usize * self.w + x as usize][index]
    }
}

/// Classify → directional NMS → suppress pipeline.
pub struct FuzzyEdgeDetector {
    params: FuzzyParams,
    prototypes: PrototypeSet,
}

impl FuzzyEdgeDetector {
    pub fn new(params: FuzzyParams) -> Self {
        let prototypes = PrototypeSet::new(params.low, params.high, params.weight);
        Self { params, prototypes }
    }

    /// Run the pipeline, returning only the final edge buffer.
    pub fn process(&self, gray: ImageU8<'_>) -> Result<GrayBuffer, ClassifyError> {
        Ok(self.process_with_trace(gray)?.edges)
    }

    /// Run the pipeline and keep the per-stage trace.
    pub fn process_with_trace(&self, gray: ImageU8<'_>) -> Result<FuzzyDetection, ClassifyError> {
        let (width, height) = (gray.w, gray.h);
        if width == 0 || height == 0 {
            return Err(ClassifyError::EmptyImage);
        }
        debug!(
            "FuzzyEdgeDetector::process start w={} h={} low={} high={} weight={}",
            width, height, self.params.low, self.params.high, self.params.weight
        );
        let total_start = Instant::now();

        let classify_start = Instant::now();
        let (field, classes) = self.classify_pixels(&gray);
        let classify_ms = classify_start.elapsed().as_secs_f64() * 1000.0;

        let mut class_counts = [0usize; 6];
        for class in &classes {
            class_counts[class.index()] += 1;
        }

        let nms_start = Instant::now();
        let raw = apply_direction_rule(&field, &classes);
        let nms_ms = nms_start.elapsed().as_secs_f64() * 1000.0;

        let suppress_start = Instant::now();
        let edges = suppress_isolated(raw.as_view());
        let suppress_ms = suppress_start.elapsed().as_secs_f64() * 1000.0;

        let edge_pixels = edges.count_eq(255);
        debug!("FuzzyEdgeDetector::process done edge_pixels={edge_pixels}");

        Ok(FuzzyDetection {
            edges,
            trace: FuzzyTrace {
                width,
                height,
                low: self.params.low,
                high: self.params.high,
                weight: self.params.weight,
                class_counts,
                edge_pixels,
                classify_ms,
                nms_ms,
                suppress_ms,
                total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }

    /// Build the difference field and classify every pixel.
    fn classify_pixels(&self, gray: &ImageU8<'_>) -> (DifferenceField, Vec<PixelClass>) {
        let (w, h) = (gray.w, gray.h);
        let mut data = Vec::with_capacity(w * h);
        let mut classes = Vec::with_capacity(w * h);

        for y in 0..h {
            // Out-of-range neighborhood rows clamp to the nearest valid row.
            let ym = y.saturating_sub(1);
            let yp = (y + 1).min(h - 1);
            for x in 0..w {
                let xm = x.saturating_sub(1);
                let xp = (x + 1).min(w - 1);

                let p1 = gray.get(xm, ym) as i32;
                let p2 = gray.get(x, ym) as i32;
                let p3 = gray.get(xp, ym) as i32;
                let p4 = gray.get(xm, y) as i32;
                let p5 = gray.get(x, y) as i32;
                let p6 = gray.get(xp, y) as i32;
                let p7 = gray.get(xm, yp) as i32;
                let p8 = gray.get(x, yp) as i32;
                let p9 = gray.get(xp, yp) as i32;

                let diffs = [
                    (p1 - p5).abs() + (p9 - p5).abs(),
                    (p2 - p5).abs() + (p8 - p5).abs(),
                    (p3 - p5).abs() + (p7 - p5).abs(),
                    (p4 - p5).abs() + (p6 - p5).abs(),
                ];
                classes.push(self.prototypes.classify(&diffs));
                data.push(diffs);
            }
        }

        (DifferenceField { w, h, data }, classes)
    }
}

/// Emit the two-level edge buffer from classes and difference vectors.
fn apply_direction_rule(field: &DifferenceField, classes: &[PixelClass]) -> GrayBuffer {
    let (w, h) = (field.w, field.h);
    let mut out = GrayBuffer::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let class = classes[y * w + x];
            let value = match class.nms_rule() {
                None => {
                    if class == PixelClass::NoisyEdge {
                        255
                    } else {
                        0
                    }
                }
                Some(rule) => {
                    let own = field.get(x, y)[rule.diff_index];
                    let survives = rule.offsets.iter().all(|&(dx, dy)| {
                        own > field.component_at(x as i32 + dx, y as i32 + dy, rule.diff_index)
                    });
                    if survives {
                        255
                    } else {
                        0
                    }
                }
            };
            if value == 255 {
                out.set(x, y, 255);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayBuffer;

    #[test]
    fn empty_image_is_rejected() {
        let buffer = GrayBuffer::new(0, 3);
        assert_eq!(
            FuzzyEdgeDetector::new(FuzzyParams::default()).process(buffer.as_view()),
            Err(ClassifyError::EmptyImage)
        );
    }

    #[test]
    fn uniform_image_is_all_background() {
        let buffer = GrayBuffer::from_vec(4, 4, vec![77; 16]);
        let detection = FuzzyEdgeDetector::new(FuzzyParams::default())
            .process_with_trace(buffer.as_view())
            .unwrap();
        assert!(detection.edges.data.iter().all(|&v| v == 0));
        assert_eq!(detection.trace.class_counts[0], 16);
    }

    #[test]
    fn single_pixel_image_clamps_to_itself() {
        let buffer = GrayBuffer::from_vec(1, 1, vec![200]);
        let edges = FuzzyEdgeDetector::new(FuzzyParams::default())
            .process(buffer.as_view())
            .unwrap();
        assert_eq!(edges.data, vec![0]);
    }

    #[test]
    fn bright_column_survives_the_direction_rule() {
        // Column 2 carries a moderate impulse; its horizontal difference pair
        // peaks there and the flanking columns lose the strict comparison.
        let mut buffer = GrayBuffer::new(4, 4);
        for y in 0..4 {
            buffer.set(2, y, 60);
        }
        let detection = FuzzyEdgeDetector::new(FuzzyParams::default())
            .process_with_trace(buffer.as_view())
            .unwrap();
        for y in 0..4 {
            assert_eq!(detection.edges.get(2, y), 255, "row {y}");
        }
        assert_eq!(detection.edges.count_eq(255), 4);
    }

    #[test]
    fn noisy_and_background_classes_skip_the_comparison() {
        // The unconditional classes do not consult neighbors at all.
        let field = DifferenceField {
            w: 2,
            h: 1,
            data: vec![[48, 48, 48, 48], [0, 0, 0, 0]],
        };
        let classes = [PixelClass::NoisyEdge, PixelClass::Background];
        let out = apply_direction_rule(&field, &classes);
        assert_eq!(out.data, vec![255, 0]);
    }

    #[test]
    fn isolated_noisy_pixel_is_classified_then_suppressed() {
        // A lone dot of amplitude `high/2` puts every difference at `high`,
        // an exact match for the noisy-edge center. The unconditional 255 it
        // earns is then removed by the isolation pass.
        let mut buffer = GrayBuffer::new(3, 3);
        buffer.set(1, 1, 24);
        let detection = FuzzyEdgeDetector::new(FuzzyParams::default())
            .process_with_trace(buffer.as_view())
            .unwrap();
        assert_eq!(detection.trace.class_counts[5], 1);
        assert!(detection.edges.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn saturated_step_collapses_to_background() {
        // A full-range step saturates every prototype distance past the
        // default membership radius: all memberships hit zero and the
        // classifier falls back to the background class everywhere.
        let mut buffer = GrayBuffer::new(4, 4);
        for y in 0..4 {
            for x in 2..4 {
                buffer.set(x, y, 255);
            }
        }
        let detection = FuzzyEdgeDetector::new(FuzzyParams::default())
            .process_with_trace(buffer.as_view())
            .unwrap();
        assert!(detection.edges.data.iter().all(|&v| v == 0));
        assert_eq!(detection.trace.class_counts[0], 16);
    }
}
