//! Structured description of an upsampling run, serializable for tools.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::image::ImageF32;
use crate::jbu::JbuParams;
use serde::Serialize;

/// Output grid plus the geometry and timings that produced it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsampleReport {
    #[serde(skip)]
    pub output: ImageF32,
    pub params: JbuParams,
    pub coarse_width: usize,
    pub coarse_height: usize,
    pub width: usize,
    pub height: usize,
    /// Guide width divided by coarse width.
    pub scale_x: f32,
    /// Guide height divided by coarse height.
    pub scale_y: f32,
    pub kernel_radius: usize,
    pub kernel_size: usize,
    pub timing: TimingBreakdown,
}
