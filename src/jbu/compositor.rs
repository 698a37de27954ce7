//! Bilateral compositing of an initial dense estimate under a guide.
//!
//! For every output pixel the spatial kernel is multiplied by a range kernel
//! `exp(-(g - g_center)² / 2σr²)` taken from the guide window, the product is
//! renormalized, and the co-located window of the initial estimate is averaged
//! with those weights.
//!
//! Both inputs are padded once by edge replication, so every window is a set
//! of plain row slices and borders need no special path. Rows are independent
//! and, with the `parallel` feature, are filled concurrently.
use super::params::validate_sigma_range;
use crate::error::UpsampleError;
use crate::image::{clamp_index, pad_edge, ImageF32, ImageView};
use crate::kernel::SpatialKernel;

/// Added to every weight denominator so a fully-zero weight set cannot divide
/// by zero.
pub const WEIGHT_EPSILON: f32 = 1e-10;

/// Range weight for intensity difference `diff`.
///
/// Written as `(diff / σ)²` so that a subnormal `σ` or `σ = +inf` never forms
/// `0 · inf`.
#[inline]
fn range_weight(diff: f32, sigma_range: f32) -> f32 {
    let z = diff / sigma_range;
    (-0.5 * z * z).exp()
}

struct RowContext<'a> {
    guide: &'a ImageF32,
    padded_guide: ImageF32,
    padded_initial: ImageF32,
    kernel: &'a SpatialKernel,
    sigma_range: f32,
}

impl RowContext<'_> {
    fn fill_row(&self, y: usize, out: &mut [f32]) {
        let size = self.kernel.size();
        let centers = self.guide.row(y);
        for (x, (dst, &center)) in out.iter_mut().zip(centers).enumerate() {
            let mut weight_sum = 0.0f64;
            let mut value_sum = 0.0f64;
            for ky in 0..size {
                let g_win = &self.padded_guide.row(y + ky)[x..x + size];
                let v_win = &self.padded_initial.row(y + ky)[x..x + size];
                let k_row = self.kernel.row(ky);
                for ((&g, &v), &s) in g_win.iter().zip(v_win).zip(k_row) {
                    let w = (s * range_weight(g - center, self.sigma_range)) as f64;
                    weight_sum += w;
                    value_sum += w * v as f64;
                }
            }
            *dst = (value_sum / (weight_sum + WEIGHT_EPSILON as f64)) as f32;
        }
    }
}

/// Filter `initial` with weights steered by `guide`.
///
/// Weight and value sums are accumulated in f64 per pixel; rows are written in
/// any order but each row's result does not depend on the others.
///
/// Fails with [`UpsampleError::InvalidParameter`] if `sigma_range` is not
/// positive, or [`UpsampleError::ShapeMismatch`] if the grids differ in size.
pub fn composite(
    initial: &ImageF32,
    guide: &ImageF32,
    kernel: &SpatialKernel,
    sigma_range: f32,
) -> Result<ImageF32, UpsampleError> {
    validate_sigma_range(sigma_range)?;
    if initial.dims() != guide.dims() {
        return Err(UpsampleError::ShapeMismatch {
            expected: guide.dims(),
            got: initial.dims(),
        });
    }

    let mut out = ImageF32::new(guide.w, guide.h);
    if guide.is_empty() {
        return Ok(out);
    }

    let radius = kernel.radius();
    let ctx = RowContext {
        guide,
        padded_guide: pad_edge(guide, radius),
        padded_initial: pad_edge(initial, radius),
        kernel,
        sigma_range,
    };

    let width = guide.w;
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.data
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| ctx.fill_row(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in out.data.chunks_mut(width).enumerate() {
            ctx.fill_row(y, row);
        }
    }
    Ok(out)
}

/// Normalized combined weights used for output pixel `(x, y)`, laid out as a
/// `size × size` grid centered on the pixel.
///
/// # Panics
/// Panics if `(x, y)` lies outside `guide`.
pub fn combined_weights(
    guide: &ImageF32,
    kernel: &SpatialKernel,
    sigma_range: f32,
    x: usize,
    y: usize,
) -> Result<ImageF32, UpsampleError> {
    validate_sigma_range(sigma_range)?;
    assert!(
        x < guide.w && y < guide.h,
        "pixel ({x}, {y}) outside {}x{} guide",
        guide.w,
        guide.h
    );

    let size = kernel.size();
    let r = kernel.radius() as isize;
    let center = guide.get(x, y);
    let mut weights = ImageF32::new(size, size);
    let mut total = 0.0f64;
    for ky in 0..size {
        let sy = clamp_index(y as isize + ky as isize - r, guide.h);
        for kx in 0..size {
            let sx = clamp_index(x as isize + kx as isize - r, guide.w);
            let w = kernel.row(ky)[kx] * range_weight(guide.get(sx, sy) - center, sigma_range);
            weights.set(kx, ky, w);
            total += w as f64;
        }
    }
    let norm = total + WEIGHT_EPSILON as f64;
    for w in &mut weights.data {
        *w = (*w as f64 / norm) as f32;
    }
    Ok(weights)
}
