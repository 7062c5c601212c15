//! Fuzzy-set contrast enhancement by fuzziness minimization.
//!
//! Three passes over the image: fuzzification maps every sample to a
//! membership value in [0, 1] anchored at the global min/max, the
//! intensification step stretches contrast in membership space (clamped below
//! by `alpha`, the membership of the darkest sample), and defuzzification
//! inverts the mapping back to intensity space.
//!
//! Defuzzified samples are truncated to integers but NOT clamped to the 0–255
//! range; the inverse mapping can land a hair outside it and the output buffer
//! preserves that faithfully. `EnhanceTrace::out_of_range` counts the affected
//! samples so callers can observe the excursion instead of silently losing it.
use crate::diagnostics::EnhanceTrace;
use crate::image::{ImageF64, ImageI32, ImageU8, ImageView, ImageViewMut};
use log::debug;
use std::time::Instant;

/// Runtime parameters of the contrast enhancer.
#[derive(Clone, Copy, Debug)]
pub struct EnhanceParams {
    /// Fuzzifier exponent (> 0) steering the steepness of the membership
    /// curve.
    pub exponent: f64,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self { exponent: 2.0 }
    }
}

/// Reasons why contrast enhancement may fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnhanceError {
    /// The input buffer has no pixels.
    EmptyImage,
    /// The intensity spread is too small to anchor the membership curve:
    /// `max == min`, or `max - min == 1` which puts the crossover point on
    /// `max` and zeroes the denominator.
    NoDynamicRange { min: u8, max: u8 },
}

impl std::fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnhanceError::EmptyImage => write!(f, "input image has no pixels"),
            EnhanceError::NoDynamicRange { min, max } => {
                write!(f, "intensity range [{min}, {max}] is too narrow to enhance")
            }
        }
    }
}

impl std::error::Error for EnhanceError {}

/// Enhanced buffer plus the trace of the run that produced it.
#[derive(Clone, Debug)]
pub struct Enhancement {
    pub enhanced: ImageI32,
    pub trace: EnhanceTrace,
}

/// Fuzzification → intensification → defuzzification pipeline.
pub struct ContrastEnhancer {
    params: EnhanceParams,
}

impl ContrastEnhancer {
    pub fn new(params: EnhanceParams) -> Self {
        assert!(
            params.exponent.is_finite() && params.exponent > 0.0,
            "fuzzy exponent must be a positive finite number"
        );
        Self { params }
    }

    /// Run the pipeline, returning only the re-mapped buffer.
    pub fn enhance(&self, gray: ImageU8<'_>) -> Result<ImageI32, EnhanceError> {
        Ok(self.enhance_with_trace(gray)?.enhanced)
    }

    /// Run the pipeline and keep the trace.
    pub fn enhance_with_trace(&self, gray: ImageU8<'_>) -> Result<Enhancement, EnhanceError> {
        let (width, height) = (gray.w, gray.h);
        if width == 0 || height == 0 {
            return Err(EnhanceError::EmptyImage);
        }
        let exponent = self.params.exponent;
        debug!("ContrastEnhancer::enhance start w={width} h={height} exponent={exponent}");
        let total_start = Instant::now();

        let mut min = u8::MAX;
        let mut max = u8::MIN;
        for row in gray.rows() {
            for &v in row {
                min = min.min(v);
                max = max.max(v);
            }
        }

        // Integer arithmetic on purpose: the crossover sits on the sample grid.
        let crossover = min as i32 + (max as i32 - min as i32 + 1) / 2;
        let denominator =
            (max as i32 - crossover) as f64 / ((2.0f64).powf(1.0 / exponent) - 1.0);
        if !denominator.is_finite() || denominator == 0.0 {
            return Err(EnhanceError::NoDynamicRange { min, max });
        }
        // Membership of the darkest sample; the lower clamp of intensification.
        let alpha = (1.0 + (max - min) as f64 / denominator).powf(-exponent);
        debug!(
            "ContrastEnhancer::enhance min={min} max={max} crossover={crossover} \
             denominator={denominator:.3} alpha={alpha:.6}"
        );

        let fuzzify_start = Instant::now();
        let mut membership = ImageF64::new(width, height);
        for (src, dst) in gray.rows().zip(membership.rows_mut()) {
            for (&v, m) in src.iter().zip(dst.iter_mut()) {
                *m = (1.0 + (max - v) as f64 / denominator).powf(-exponent);
            }
        }
        let fuzzify_ms = fuzzify_start.elapsed().as_secs_f64() * 1000.0;

        let intensify_start = Instant::now();
        for row in membership.rows_mut() {
            for m in row.iter_mut() {
                *m = if *m <= 0.5 {
                    2.0 * *m * *m
                } else {
                    1.0 - 2.0 * (1.0 - *m) * (1.0 - *m)
                };
                if *m < alpha {
                    *m = alpha;
                }
            }
        }
        let intensify_ms = intensify_start.elapsed().as_secs_f64() * 1000.0;

        let defuzzify_start = Instant::now();
        let mut enhanced = ImageI32::new(width, height);
        let mut out_of_range = 0usize;
        for (src, dst) in membership.rows().zip(enhanced.rows_mut()) {
            for (&m, out) in src.iter().zip(dst.iter_mut()) {
                // Truncation, not rounding, and no clamp to the sample range.
                let value =
                    (max as f64 - denominator * (m.powf(-1.0 / exponent) - 1.0)) as i32;
                if !(0..=255).contains(&value) {
                    out_of_range += 1;
                }
                *out = value;
            }
        }
        let defuzzify_ms = defuzzify_start.elapsed().as_secs_f64() * 1000.0;

        debug!("ContrastEnhancer::enhance done out_of_range={out_of_range}");

        Ok(Enhancement {
            enhanced,
            trace: EnhanceTrace {
                width,
                height,
                exponent,
                min,
                max,
                crossover,
                denominator,
                alpha,
                out_of_range,
                fuzzify_ms,
                intensify_ms,
                defuzzify_ms,
                total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayBuffer;

    fn enhancer() -> ContrastEnhancer {
        ContrastEnhancer::new(EnhanceParams::default())
    }

    #[test]
    fn empty_image_is_rejected() {
        let buffer = GrayBuffer::new(0, 0);
        assert_eq!(
            enhancer().enhance(buffer.as_view()),
            Err(EnhanceError::EmptyImage)
        );
    }

    #[test]
    fn flat_image_is_rejected() {
        let buffer = GrayBuffer::from_vec(3, 3, vec![128; 9]);
        assert_eq!(
            enhancer().enhance(buffer.as_view()),
            Err(EnhanceError::NoDynamicRange { min: 128, max: 128 })
        );
    }

    #[test]
    fn unit_range_puts_crossover_on_max_and_is_rejected() {
        let buffer = GrayBuffer::from_vec(2, 1, vec![100, 101]);
        assert_eq!(
            enhancer().enhance(buffer.as_view()),
            Err(EnhanceError::NoDynamicRange { min: 100, max: 101 })
        );
    }

    #[test]
    fn crossover_sample_round_trips() {
        // With min 0 and max 200 the crossover lands on 100, whose membership
        // is exactly 0.5 — the fixed point of intensification. Defuzzification
        // must undo fuzzification there, up to truncation.
        let buffer = GrayBuffer::from_vec(2, 2, vec![0, 100, 200, 100]);
        let result = enhancer().enhance_with_trace(buffer.as_view()).unwrap();
        assert_eq!(result.trace.crossover, 100);
        let out = result.enhanced.get(1, 0);
        assert!((99..=100).contains(&out), "expected ~100, got {out}");
    }

    #[test]
    fn midtones_stretch_away_from_the_crossover() {
        let buffer = GrayBuffer::from_vec(2, 2, vec![50, 75, 125, 150]);
        let result = enhancer().enhance_with_trace(buffer.as_view()).unwrap();
        let trace = &result.trace;
        assert_eq!(trace.crossover, 100);

        let darkest = result.enhanced.get(0, 0);
        let dark = result.enhanced.get(1, 0);
        let bright = result.enhanced.get(0, 1);
        let brightest = result.enhanced.get(1, 1);

        // Endpoints are fixed points of the mapping (up to truncation).
        assert!((49..=50).contains(&darkest), "darkest became {darkest}");
        assert_eq!(brightest, 150);
        // Contrast increases: below the crossover darkens, above brightens.
        assert!(dark < 75, "below-crossover sample became {dark}");
        assert!(bright > 125, "above-crossover sample became {bright}");
        assert_eq!(trace.out_of_range, 0);
    }

    #[test]
    fn output_is_never_range_clamped() {
        // The i32 output type exists so that excursions outside 0–255 would
        // survive; for in-range results the counter stays at zero.
        let buffer = GrayBuffer::from_vec(4, 1, vec![10, 60, 110, 210]);
        let result = enhancer().enhance_with_trace(buffer.as_view()).unwrap();
        assert_eq!(
            result.trace.out_of_range,
            result
                .enhanced
                .data
                .iter()
                .filter(|v| !(0..=255).contains(*v))
                .count()
        );
    }

    #[test]
    #[should_panic(expected = "fuzzy exponent")]
    fn non_positive_exponent_is_rejected_at_construction() {
        ContrastEnhancer::new(EnhanceParams { exponent: 0.0 });
    }
}
