use crate::error::UpsampleError;
use crate::image::{ImageF32, ImageView, ImageViewMut};
use log::debug;

/// Interpolation tap along one axis: blend `i0` and `i1` with weight `frac`
/// on `i1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AxisTap {
    pub i0: usize,
    pub i1: usize,
    pub frac: f32,
}

/// Map every destination index onto the source axis using pixel centers,
/// `s = (d + 0.5)·(src_len / dst_len) − 0.5`, clamped to `[0, src_len − 1]`.
pub(crate) fn axis_taps(src_len: usize, dst_len: usize) -> Vec<AxisTap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f64 + 0.5) * scale - 0.5).max(0.0);
            let i0 = s.floor() as usize;
            if i0 >= last {
                AxisTap {
                    i0: last,
                    i1: last,
                    frac: 0.0,
                }
            } else {
                AxisTap {
                    i0,
                    i1: i0 + 1,
                    frac: (s - i0 as f64) as f32,
                }
            }
        })
        .collect()
}

/// Resample `coarse` to `target_w × target_h` with bilinear interpolation.
///
/// Fails with [`UpsampleError::InvalidDimensions`] if any dimension is zero or
/// the target is smaller than the source along either axis. Arbitrary
/// (non-integer) ratios are accepted here; ratio policy is enforced by the
/// engine.
pub fn upscale(
    coarse: &ImageF32,
    target_w: usize,
    target_h: usize,
) -> Result<ImageF32, UpsampleError> {
    if coarse.is_empty()
        || target_w == 0
        || target_h == 0
        || target_w < coarse.w
        || target_h < coarse.h
    {
        return Err(UpsampleError::InvalidDimensions {
            source: coarse.dims(),
            target: (target_w, target_h),
        });
    }

    let x_taps = axis_taps(coarse.w, target_w);
    let y_taps = axis_taps(coarse.h, target_h);
    let mut out = ImageF32::new(target_w, target_h);
    for (y, ty) in y_taps.iter().enumerate() {
        let r0 = coarse.row(ty.i0);
        let r1 = coarse.row(ty.i1);
        let dst = out.row_mut(y);
        for (px, tx) in dst.iter_mut().zip(&x_taps) {
            let top = r0[tx.i0] + (r0[tx.i1] - r0[tx.i0]) * tx.frac;
            let bottom = r1[tx.i0] + (r1[tx.i1] - r1[tx.i0]) * tx.frac;
            *px = top + (bottom - top) * ty.frac;
        }
    }
    debug!(
        "upscale: {}x{} -> {}x{}",
        coarse.w, coarse.h, target_w, target_h
    );
    Ok(out)
}
