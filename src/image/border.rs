//! Border handling shared by the resampling and filtering stages.
//!
//! Everything here replicates edge samples: reads outside the grid return the
//! nearest valid sample, as if the outermost row/column repeated forever.
use super::{ImageF32, ImageView, ImageViewMut};

/// Clamp a signed index into `[0, upper)`. Returns 0 for an empty axis.
#[inline]
pub fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

/// Copy `src` into a new grid grown by `radius` samples on every side, filling
/// the margin by edge replication.
///
/// Window reads around any source pixel `(x, y)` then become plain slices of
/// the padded rows `y..y + 2·radius + 1`, columns `x..x + 2·radius + 1`.
pub fn pad_edge(src: &ImageF32, radius: usize) -> ImageF32 {
    let pw = src.w + 2 * radius;
    let ph = src.h + 2 * radius;
    let mut out = ImageF32::new(pw, ph);
    if src.is_empty() {
        return out;
    }
    for py in 0..ph {
        let sy = clamp_index(py as isize - radius as isize, src.h);
        let src_row = src.row(sy);
        let dst_row = out.row_mut(py);
        let first = src_row[0];
        let last = src_row[src.w - 1];
        dst_row[..radius].fill(first);
        dst_row[radius..radius + src.w].copy_from_slice(src_row);
        dst_row[radius + src.w..].fill(last);
    }
    out
}
