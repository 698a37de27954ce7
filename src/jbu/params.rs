//! Parameters for one joint bilateral upsampling call.
//!
//! Defaults match an interactive starting point for guides normalized to
//! `[0, 1]`: a wide spatial window and a tight range sigma.

use crate::error::UpsampleError;
use crate::kernel::kernel_radius;
use serde::{Deserialize, Serialize};

/// How the guide/coarse size ratio is checked before upsampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioPolicy {
    /// Guide dimensions must be integer multiples of the coarse dimensions
    /// (each axis may use its own factor).
    #[default]
    Exact,
    /// Any guide at least as large as the coarse grid; the bilinear mapping
    /// handles fractional ratios.
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JbuParams {
    /// Standard deviation of the spatial Gaussian, in guide pixels.
    pub sigma_spatial: f32,
    /// Standard deviation of the range Gaussian, in guide intensity units.
    /// May be `+inf`, which disables edge awareness.
    pub sigma_range: f32,
    pub ratio_policy: RatioPolicy,
}

impl Default for JbuParams {
    fn default() -> Self {
        Self {
            sigma_spatial: 5.0,
            sigma_range: 0.1,
            ratio_policy: RatioPolicy::Exact,
        }
    }
}

impl JbuParams {
    pub fn new(sigma_spatial: f32, sigma_range: f32) -> Self {
        Self {
            sigma_spatial,
            sigma_range,
            ..Default::default()
        }
    }

    pub fn with_ratio_policy(mut self, ratio_policy: RatioPolicy) -> Self {
        self.ratio_policy = ratio_policy;
        self
    }

    /// Check both sigmas without touching any grid. `sigma_spatial` must also
    /// keep the window within [`crate::kernel::MAX_KERNEL_RADIUS`].
    pub fn validate(&self) -> Result<(), UpsampleError> {
        kernel_radius(self.sigma_spatial)?;
        validate_sigma_range(self.sigma_range)
    }
}

pub(crate) fn validate_sigma_range(sigma_range: f32) -> Result<(), UpsampleError> {
    // `!(x > 0)` also catches NaN.
    if !(sigma_range > 0.0) {
        return Err(UpsampleError::InvalidParameter {
            name: "sigma_range",
            value: sigma_range,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let params: JbuParams = serde_json::from_str(r#"{"sigma_range": 0.25}"#).unwrap();
        assert_eq!(params.sigma_spatial, 5.0);
        assert_eq!(params.sigma_range, 0.25);
        assert_eq!(params.ratio_policy, RatioPolicy::Exact);

        let any: JbuParams = serde_json::from_str(r#"{"ratio_policy": "any"}"#).unwrap();
        assert_eq!(any.ratio_policy, RatioPolicy::Any);
    }

    #[test]
    fn validate_flags_each_sigma() {
        assert!(JbuParams::new(1.0, 0.1).validate().is_ok());
        assert!(JbuParams::new(1.0, f32::INFINITY).validate().is_ok());
        assert!(matches!(
            JbuParams::new(0.0, 0.1).validate(),
            Err(UpsampleError::InvalidParameter {
                name: "sigma_spatial",
                ..
            })
        ));
        assert!(matches!(
            JbuParams::new(1.0, -2.0).validate(),
            Err(UpsampleError::InvalidParameter {
                name: "sigma_range",
                ..
            })
        ));
        assert!(JbuParams::new(1.0, f32::NAN).validate().is_err());
        assert_eq!(
            JbuParams::new(1e9, 0.1).validate(),
            Err(UpsampleError::InvalidParameter {
                name: "sigma_spatial",
                value: 1e9
            })
        );
    }
}
