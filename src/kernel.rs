//! Normalized 2D Gaussian spatial kernel.
//!
//! The kernel depends only on `sigma_spatial`: `radius = ceil(3σ)`,
//! `size = 2·radius + 1`, and the weight at offset `(dx, dy)` is
//! `exp(-(dx² + dy²) / 2σ²)`, scaled so that all weights sum to 1. It is built
//! once per upsampling call and shared read-only by every output pixel.
//!
//! Weights are evaluated and normalized in f64, then stored as f32.
//!
//! The radius is capped at [`MAX_KERNEL_RADIUS`], i.e. `sigma_spatial` may not
//! exceed `MAX_KERNEL_RADIUS / 3`.
use crate::error::UpsampleError;
use crate::image::{pad_edge, ImageF32, ImageView, ImageViewMut};

/// Largest supported window radius (a `2049 × 2049` window).
pub const MAX_KERNEL_RADIUS: usize = 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialKernel {
    radius: usize,
    /// Row-major `size × size` weights.
    weights: Vec<f32>,
}

/// Window radius for `sigma_spatial`, or `InvalidParameter` if sigma is not a
/// positive finite number or the window would exceed [`MAX_KERNEL_RADIUS`].
pub(crate) fn kernel_radius(sigma_spatial: f32) -> Result<usize, UpsampleError> {
    let invalid = UpsampleError::InvalidParameter {
        name: "sigma_spatial",
        value: sigma_spatial,
    };
    // Also rejects NaN and infinity; an infinite sigma has no finite window.
    if !(sigma_spatial > 0.0 && sigma_spatial.is_finite()) {
        return Err(invalid);
    }
    let radius = (3.0 * sigma_spatial as f64).ceil();
    if radius > MAX_KERNEL_RADIUS as f64 {
        return Err(invalid);
    }
    Ok(radius as usize)
}

/// Build the spatial Gaussian for `sigma_spatial`.
pub fn build_spatial_kernel(sigma_spatial: f32) -> Result<SpatialKernel, UpsampleError> {
    let radius = kernel_radius(sigma_spatial)?;
    let sigma = sigma_spatial as f64;
    let size = 2 * radius + 1;
    let cells = size
        .checked_mul(size)
        .ok_or(UpsampleError::InvalidParameter {
            name: "sigma_spatial",
            value: sigma_spatial,
        })?;
    let denom = 2.0 * sigma * sigma;

    let mut raw = Vec::with_capacity(cells);
    for ky in 0..size {
        let dy = ky as f64 - radius as f64;
        for kx in 0..size {
            let dx = kx as f64 - radius as f64;
            raw.push((-(dx * dx + dy * dy) / denom).exp());
        }
    }
    // The center weight is exp(0) = 1, so the sum is never below 1.
    let total: f64 = raw.iter().sum();
    let weights = raw.into_iter().map(|w| (w / total) as f32).collect();

    Ok(SpatialKernel { radius, weights })
}

impl SpatialKernel {
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Side length of the square window, always `2·radius + 1`.
    #[inline]
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weights of kernel row `ky` (0 is the top row, `radius` the center).
    #[inline]
    pub fn row(&self, ky: usize) -> &[f32] {
        let size = self.size();
        &self.weights[ky * size..(ky + 1) * size]
    }

    /// Weight at signed offset `(dx, dy)` from the center.
    ///
    /// # Panics
    /// Panics if the offset lies outside the window.
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let r = self.radius as isize;
        assert!(
            dx.abs() <= r && dy.abs() <= r,
            "offset ({dx}, {dy}) outside kernel radius {r}"
        );
        let size = self.size();
        self.weights[(dy + r) as usize * size + (dx + r) as usize]
    }

    /// Sum of all weights, accumulated in f64.
    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|&w| w as f64).sum()
    }

    /// Plain Gaussian blur of `src` with edge-replicated borders.
    ///
    /// This is what the bilateral compositor reduces to when every range
    /// weight is 1.
    pub fn convolve(&self, src: &ImageF32) -> ImageF32 {
        let mut out = ImageF32::new(src.w, src.h);
        if src.is_empty() {
            return out;
        }
        let size = self.size();
        let padded = pad_edge(src, self.radius);
        for y in 0..src.h {
            let dst_row = out.row_mut(y);
            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let mut acc = 0.0f64;
                for ky in 0..size {
                    let window = &padded.row(y + ky)[x..x + size];
                    for (&v, &k) in window.iter().zip(self.row(ky)) {
                        acc += (v * k) as f64;
                    }
                }
                *dst_px = acc as f32;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_and_size_follow_three_sigma_rule() {
        let k = build_spatial_kernel(1.0).unwrap();
        assert_eq!(k.radius(), 3);
        assert_eq!(k.size(), 7);
        assert_eq!(k.weights().len(), 49);

        let small = build_spatial_kernel(0.1).unwrap();
        assert_eq!(small.radius(), 1);
        assert_eq!(small.size(), 3);

        let frac = build_spatial_kernel(1.5).unwrap();
        assert_eq!(frac.radius(), 5);
        assert_eq!(frac.size(), 11);
    }

    #[test]
    fn weights_sum_to_one_for_many_sigmas() {
        for sigma in [0.05f32, 0.3, 0.5, 1.0, 2.5, 5.0, 10.0] {
            let k = build_spatial_kernel(sigma).unwrap();
            assert!(
                (k.sum() - 1.0).abs() < 1e-6,
                "sigma={sigma} sum={}",
                k.sum()
            );
            assert!(k.weights().iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn kernel_is_symmetric_and_peaks_at_center() {
        let k = build_spatial_kernel(2.0).unwrap();
        let r = k.radius() as isize;
        let center = k.weight(0, 0);
        for dy in -r..=r {
            for dx in -r..=r {
                let w = k.weight(dx, dy);
                assert_eq!(w, k.weight(-dx, dy));
                assert_eq!(w, k.weight(dx, -dy));
                assert_eq!(w, k.weight(dy, dx));
                assert!(w <= center);
            }
        }
    }

    #[test]
    fn weight_ratio_matches_gaussian() {
        let sigma = 1.5f32;
        let k = build_spatial_kernel(sigma).unwrap();
        let ratio = k.weight(1, 1) / k.weight(0, 0);
        let expected = (-2.0f32 / (2.0 * sigma * sigma)).exp();
        assert!((ratio - expected).abs() < 1e-5);
    }

    #[test]
    fn non_positive_sigma_is_rejected() {
        for sigma in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
            let err = build_spatial_kernel(sigma).unwrap_err();
            assert!(matches!(
                err,
                UpsampleError::InvalidParameter {
                    name: "sigma_spatial",
                    ..
                }
            ));
        }
    }

    #[test]
    fn oversized_window_is_rejected() {
        for sigma in [1e9f32, f32::MAX, 342.0] {
            assert_eq!(
                build_spatial_kernel(sigma).unwrap_err(),
                UpsampleError::InvalidParameter {
                    name: "sigma_spatial",
                    value: sigma
                }
            );
        }
        // ceil(3 * 341) = 1023 is still inside the cap.
        assert_eq!(kernel_radius(341.0), Ok(1023));
        assert_eq!(kernel_radius(341.3), Ok(MAX_KERNEL_RADIUS));
    }

    #[test]
    fn convolve_preserves_constant_image() {
        let k = build_spatial_kernel(1.0).unwrap();
        let src = ImageF32::filled(5, 4, 0.75);
        let out = k.convolve(&src);
        for &v in &out.data {
            assert!((v - 0.75).abs() < 1e-5);
        }
    }
}
