#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod jbu;
pub mod kernel;
pub mod metrics;
pub mod resample;

// Tool support: JSON configs and argument parsing for the bundled binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::UpsampleError;
pub use crate::image::ImageF32;
pub use crate::jbu::{filter, JbuParams, JointBilateralUpsampler, RatioPolicy};
pub use crate::kernel::{build_spatial_kernel, SpatialKernel, MAX_KERNEL_RADIUS};
pub use crate::resample::upscale;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use joint_upsample::prelude::*;
///
/// # fn main() -> Result<(), UpsampleError> {
/// let coarse = ImageF32::from_rows(&[[0.0, 10.0], [20.0, 30.0]])?;
/// let mut guide = ImageF32::new(4, 4);
/// for y in 0..4 {
///     for x in 2..4 {
///         guide.set(x, y, 100.0);
///     }
/// }
///
/// let out = filter(&coarse, &guide, 1.0, 10.0)?;
/// assert_eq!((out.w, out.h), (4, 4));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageView, ImageViewMut};
    pub use crate::{filter, JbuParams, JointBilateralUpsampler, UpsampleError};
}
