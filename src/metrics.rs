//! Error metrics between two co-located grids.
//!
//! Used by tools to compare an upsampled result against a reference image:
//! mean squared error and a histogram of signed differences `a - b`.
use crate::error::UpsampleError;
use crate::image::{ImageF32, ImageView};
use serde::Serialize;

/// Histogram of `a - b` over `bins` equal-width bins spanning `[lo, hi]`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferenceHistogram {
    pub lo: f32,
    pub hi: f32,
    pub bin_width: f32,
    pub counts: Vec<usize>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetrics {
    pub mse: f64,
    pub max_abs_diff: f32,
    pub histogram: DifferenceHistogram,
}

fn check_shapes(a: &ImageF32, b: &ImageF32) -> Result<(), UpsampleError> {
    if a.dims() != b.dims() {
        return Err(UpsampleError::ShapeMismatch {
            expected: a.dims(),
            got: b.dims(),
        });
    }
    Ok(())
}

fn differences<'a>(a: &'a ImageF32, b: &'a ImageF32) -> impl Iterator<Item = f32> + 'a {
    a.rows()
        .zip(b.rows())
        .flat_map(|(ra, rb)| ra.iter().zip(rb).map(|(&x, &y)| x - y))
}

/// Mean of `(a - b)²`, accumulated in f64. Empty grids give 0.
pub fn mean_squared_error(a: &ImageF32, b: &ImageF32) -> Result<f64, UpsampleError> {
    check_shapes(a, b)?;
    let n = a.w * a.h;
    if n == 0 {
        return Ok(0.0);
    }
    let sum: f64 = differences(a, b).map(|d| (d as f64) * (d as f64)).sum();
    Ok(sum / n as f64)
}

/// Bin the signed differences `a - b`.
///
/// The range is the observed `[min, max]`; when all differences are equal it
/// is widened to `[d - 0.5, d + 0.5]` so the bin width stays positive.
pub fn difference_histogram(
    a: &ImageF32,
    b: &ImageF32,
    bins: usize,
) -> Result<DifferenceHistogram, UpsampleError> {
    check_shapes(a, b)?;
    if bins == 0 {
        return Err(UpsampleError::InvalidParameter {
            name: "bins",
            value: 0.0,
        });
    }
    let (mut lo, mut hi) = differences(a, b)
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });
    if lo > hi {
        lo = 0.0;
        hi = 0.0;
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let bin_width = (hi - lo) / bins as f32;
    let mut counts = vec![0usize; bins];
    for d in differences(a, b) {
        let idx = (((d - lo) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Ok(DifferenceHistogram {
        lo,
        hi,
        bin_width,
        counts,
    })
}

/// MSE, worst-case absolute difference and a difference histogram in one go.
pub fn compare(a: &ImageF32, b: &ImageF32, bins: usize) -> Result<ErrorMetrics, UpsampleError> {
    let mse = mean_squared_error(a, b)?;
    let histogram = difference_histogram(a, b, bins)?;
    let max_abs_diff = differences(a, b).fold(0.0f32, |m, d| m.max(d.abs()));
    Ok(ErrorMetrics {
        mse,
        max_abs_diff,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_of_known_offsets() {
        let a = ImageF32::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = ImageF32::from_rows(&[[1.0, 0.0], [3.0, 8.0]]).unwrap();
        // squared diffs: 0, 4, 0, 16
        assert_eq!(mean_squared_error(&a, &b).unwrap(), 5.0);
        assert_eq!(mean_squared_error(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn histogram_counts_every_sample() {
        let a = ImageF32::from_rows(&[[0.0, 1.0, 2.0, 3.0]]).unwrap();
        let b = ImageF32::new(4, 1);
        let h = difference_histogram(&a, &b, 3).unwrap();
        assert_eq!((h.lo, h.hi), (0.0, 3.0));
        assert_eq!(h.counts, vec![1, 1, 2]);
        assert_eq!(h.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn constant_difference_uses_unit_range() {
        let a = ImageF32::filled(3, 3, 2.0);
        let b = ImageF32::filled(3, 3, 1.5);
        let h = difference_histogram(&a, &b, 4).unwrap();
        assert_eq!((h.lo, h.hi), (0.0, 1.0));
        assert_eq!(h.counts, vec![0, 0, 9, 0]);
    }

    #[test]
    fn compare_reports_worst_case() {
        let a = ImageF32::from_rows(&[[0.0, -3.0]]).unwrap();
        let b = ImageF32::from_rows(&[[1.0, 0.0]]).unwrap();
        let m = compare(&a, &b, 10).unwrap();
        assert_eq!(m.max_abs_diff, 3.0);
        assert_eq!(m.mse, 5.0);
    }

    #[test]
    fn shape_and_bin_errors() {
        let a = ImageF32::new(2, 2);
        let b = ImageF32::new(2, 3);
        assert!(matches!(
            mean_squared_error(&a, &b),
            Err(UpsampleError::ShapeMismatch { .. })
        ));
        assert!(difference_histogram(&a, &a, 0).is_err());
    }
}
