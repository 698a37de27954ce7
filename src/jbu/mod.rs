//! Joint bilateral upsampling engine.
//!
//! Pipeline, strictly forward:
//! 1. bilinear upscale of the coarse grid to the guide resolution,
//! 2. spatial Gaussian kernel from `sigma_spatial` (built once),
//! 3. bilateral compositing of the upscaled estimate under the guide.
//!
//! All inputs are validated before any stage runs, so a failing call never
//! does partial work. The engine keeps no state between calls.

mod compositor;
mod params;

pub use compositor::{combined_weights, composite, WEIGHT_EPSILON};
pub use params::{JbuParams, RatioPolicy};

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{TimingBreakdown, UpsampleReport};
use crate::error::UpsampleError;
use crate::image::{ImageF32, ImageView};
use crate::kernel::build_spatial_kernel;
use crate::resample::upscale;
use log::{debug, warn};
use std::time::Instant;

/// Upsample `coarse` to the resolution of `guide`, preserving the guide's
/// edges. Uses the exact ratio policy.
pub fn filter(
    coarse: &ImageF32,
    guide: &ImageF32,
    sigma_spatial: f32,
    sigma_range: f32,
) -> Result<ImageF32, UpsampleError> {
    JointBilateralUpsampler::new(JbuParams::new(sigma_spatial, sigma_range)).run(coarse, guide)
}

/// Reusable handle around a parameter set.
#[derive(Clone, Debug, Default)]
pub struct JointBilateralUpsampler {
    params: JbuParams,
}

impl JointBilateralUpsampler {
    pub fn new(params: JbuParams) -> Self {
        Self { params }
    }

    pub fn run(&self, coarse: &ImageF32, guide: &ImageF32) -> Result<ImageF32, UpsampleError> {
        self.run_with_diagnostics(coarse, guide)
            .map(|report| report.output)
    }

    /// Run the full pipeline and report geometry and per-stage timings.
    pub fn run_with_diagnostics(
        &self,
        coarse: &ImageF32,
        guide: &ImageF32,
    ) -> Result<UpsampleReport, UpsampleError> {
        let t0 = Instant::now();
        self.params.validate()?;
        check_dimensions(coarse, guide, self.params.ratio_policy)?;

        let mut timing = TimingBreakdown::default();
        let initial = timing.measure("upscale", || upscale(coarse, guide.w, guide.h))?;
        let kernel = timing.measure("spatial_kernel", || {
            build_spatial_kernel(self.params.sigma_spatial)
        })?;
        if kernel.size() > guide.w.max(guide.h) {
            warn!(
                "spatial kernel {}x{} exceeds guide {}x{}; borders dominate the result",
                kernel.size(),
                kernel.size(),
                guide.w,
                guide.h
            );
        }
        let output = timing.measure("composite", || {
            composite(&initial, guide, &kernel, self.params.sigma_range)
        })?;
        timing.total_ms = elapsed_ms(t0);

        debug!(
            "JointBilateralUpsampler: {}x{} -> {}x{} kernel={} total={:.3}ms",
            coarse.w,
            coarse.h,
            guide.w,
            guide.h,
            kernel.size(),
            timing.total_ms
        );

        Ok(UpsampleReport {
            output,
            params: self.params,
            coarse_width: coarse.w,
            coarse_height: coarse.h,
            width: guide.w,
            height: guide.h,
            scale_x: guide.w as f32 / coarse.w as f32,
            scale_y: guide.h as f32 / coarse.h as f32,
            kernel_radius: kernel.radius(),
            kernel_size: kernel.size(),
            timing,
        })
    }
}

fn check_dimensions(
    coarse: &ImageF32,
    guide: &ImageF32,
    policy: RatioPolicy,
) -> Result<(), UpsampleError> {
    let invalid = UpsampleError::InvalidDimensions {
        source: coarse.dims(),
        target: guide.dims(),
    };
    if coarse.is_empty() || guide.is_empty() || guide.w < coarse.w || guide.h < coarse.h {
        return Err(invalid);
    }
    if policy == RatioPolicy::Exact && (guide.w % coarse.w != 0 || guide.h % coarse.h != 0) {
        return Err(invalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_policy_rejects_fractional_ratio() {
        let coarse = ImageF32::new(3, 3);
        let guide = ImageF32::new(7, 6);
        assert!(matches!(
            filter(&coarse, &guide, 1.0, 0.1),
            Err(UpsampleError::InvalidDimensions {
                source: (3, 3),
                target: (7, 6)
            })
        ));

        let any = JointBilateralUpsampler::new(
            JbuParams::new(1.0, 0.1).with_ratio_policy(RatioPolicy::Any),
        );
        let out = any.run(&coarse, &guide).unwrap();
        assert_eq!(out.dims(), (7, 6));
    }

    #[test]
    fn axes_may_use_different_factors() {
        let coarse = ImageF32::filled(2, 3, 0.5);
        let guide = ImageF32::new(8, 6);
        let out = filter(&coarse, &guide, 0.5, 0.1).unwrap();
        assert_eq!(out.dims(), (8, 6));
        assert!(out.data.iter().all(|&v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn parameters_are_checked_before_dimensions() {
        let coarse = ImageF32::new(3, 3);
        let guide = ImageF32::new(2, 2);
        assert!(matches!(
            filter(&coarse, &guide, -1.0, 0.1),
            Err(UpsampleError::InvalidParameter { .. })
        ));
        assert!(matches!(
            filter(&coarse, &guide, 1.0, 0.1),
            Err(UpsampleError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn report_describes_geometry_and_stages() {
        let coarse = ImageF32::filled(2, 2, 1.0);
        let guide = ImageF32::new(6, 4);
        let upsampler = JointBilateralUpsampler::new(JbuParams::new(1.0, 0.2));
        let report = upsampler.run_with_diagnostics(&coarse, &guide).unwrap();
        assert_eq!((report.width, report.height), (6, 4));
        assert_eq!((report.scale_x, report.scale_y), (3.0, 2.0));
        assert_eq!((report.kernel_radius, report.kernel_size), (3, 7));
        for stage in ["upscale", "spatial_kernel", "composite"] {
            assert!(report.timing.stage_ms(stage).is_some(), "missing {stage}");
        }
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kernelSize"], 7);
        assert_eq!(json["params"]["sigma_range"].as_f64().unwrap() as f32, 0.2);
        assert!(json.get("output").is_none());
    }
}
