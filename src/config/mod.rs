//! Configuration for the bundled command-line tools.

pub mod downscale;
pub mod upsample;
