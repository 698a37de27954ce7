use crate::error::UpsampleError;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Shrink `src` by an integer `factor` by averaging each `factor × factor`
/// block. Trailing rows/columns that do not fill a whole block are dropped.
pub fn downscale_area(src: &ImageF32, factor: usize) -> Result<ImageF32, UpsampleError> {
    if factor == 0 {
        return Err(UpsampleError::InvalidParameter {
            name: "factor",
            value: 0.0,
        });
    }
    let (nw, nh) = (src.w / factor, src.h / factor);
    if nw == 0 || nh == 0 {
        return Err(UpsampleError::InvalidDimensions {
            source: src.dims(),
            target: (nw, nh),
        });
    }

    let inv_area = 1.0 / (factor * factor) as f32;
    let mut out = ImageF32::new(nw, nh);
    let mut acc = vec![0.0f32; nw];
    for y in 0..nh {
        acc.fill(0.0);
        for sy in y * factor..(y + 1) * factor {
            let row = src.row(sy);
            for (a, block) in acc.iter_mut().zip(row.chunks_exact(factor)) {
                *a += block.iter().sum::<f32>();
            }
        }
        for (dst, &a) in out.row_mut(y).iter_mut().zip(&acc) {
            *dst = a * inv_area;
        }
    }
    Ok(out)
}
