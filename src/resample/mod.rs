//! Grid resampling: bilinear upscaling (the initial dense estimate for the
//! bilateral stage) and integer-factor area downscaling (to derive coarse
//! inputs from full-resolution images).

mod area;
mod bilinear;

pub use area::downscale_area;
pub use bilinear::upscale;
