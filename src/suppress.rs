//! Isolated-pixel suppression for two-level edge buffers.
//!
//! Shared post-processing stage of both edge detectors: an edge pixel with no
//! 8-neighborhood support is demoted to background. Out-of-range neighbors are
//! skipped, not clamped, so border pixels are judged on their in-range
//! neighbors only.
use crate::image::{GrayBuffer, ImageU8};

/// Remove 255-valued pixels whose in-range 8-neighbors are all non-255.
///
/// Reads only from `edges` and writes a fresh buffer; pixels valued 0 stay 0.
pub fn suppress_isolated(edges: ImageU8<'_>) -> GrayBuffer {
    let (w, h) = (edges.w, edges.h);
    let mut out = GrayBuffer::new(w, h);

    for y in 0..h {
        for x in 0..w {
            if edges.get(x, y) != 255 {
                continue;
            }
            let mut supported = false;
            'neighbors: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                        continue;
                    }
                    if edges.get(nx as usize, ny as usize) == 255 {
                        supported = true;
                        break 'neighbors;
                    }
                }
            }
            if supported {
                out.set(x, y, 255);
            }
        }
    }

    out
}
