//! JSON configuration for the `jbu_demo` tool.
//!
//! ```json
//! {
//!   "guide": "guide.png",
//!   "coarse": "coarse.png",
//!   "params": { "sigma_spatial": 2.0, "sigma_range": 0.1 },
//!   "output": { "image": "out/jbu.png", "report_json": "out/report.json" },
//!   "metrics": { "reference": "truth.png", "histogram_bins": 50 }
//! }
//! ```
//!
//! When `coarse` is omitted the coarse input is derived from the guide by area
//! downscaling with `derive_factor`.
use crate::jbu::JbuParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct UpsampleToolConfig {
    pub guide: PathBuf,
    #[serde(default)]
    pub coarse: Option<PathBuf>,
    #[serde(default = "default_derive_factor")]
    pub derive_factor: usize,
    #[serde(default)]
    pub params: JbuParams,
    pub output: UpsampleOutputConfig,
    #[serde(default)]
    pub metrics: Option<MetricsConfig>,
}

fn default_derive_factor() -> usize {
    4
}

#[derive(Debug, Deserialize)]
pub struct UpsampleOutputConfig {
    pub image: PathBuf,
    /// Plain bilinear upscale, written for side-by-side comparison.
    #[serde(default)]
    pub bilinear_image: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Image to compare against. `None` compares against the guide.
    pub reference: Option<PathBuf>,
    pub histogram_bins: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            reference: None,
            histogram_bins: 50,
        }
    }
}

pub fn parse_config(data: &str) -> Result<UpsampleToolConfig, String> {
    let config: UpsampleToolConfig =
        serde_json::from_str(data).map_err(|e| format!("Failed to parse config: {e}"))?;
    config
        .params
        .validate()
        .map_err(|e| format!("Invalid params: {e}"))?;
    if config.coarse.is_none() && config.derive_factor == 0 {
        return Err("derive_factor must be >= 1 when no coarse image is given".to_string());
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<UpsampleToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("{} ({})", e, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jbu::RatioPolicy;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg = parse_config(r#"{"guide": "g.png", "output": {"image": "o.png"}}"#).unwrap();
        assert_eq!(cfg.guide, PathBuf::from("g.png"));
        assert!(cfg.coarse.is_none());
        assert_eq!(cfg.derive_factor, 4);
        assert_eq!(cfg.params, JbuParams::default());
        assert!(cfg.metrics.is_none());
        assert!(cfg.output.report_json.is_none());
    }

    #[test]
    fn full_config_parses() {
        let cfg = parse_config(
            r#"{
                "guide": "g.png",
                "coarse": "c.png",
                "params": {"sigma_spatial": 2.0, "sigma_range": 0.05, "ratio_policy": "any"},
                "output": {"image": "o.png", "bilinear_image": "b.png", "report_json": "r.json"},
                "metrics": {"histogram_bins": 20}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.coarse, Some(PathBuf::from("c.png")));
        assert_eq!(cfg.params.sigma_spatial, 2.0);
        assert_eq!(cfg.params.ratio_policy, RatioPolicy::Any);
        let metrics = cfg.metrics.unwrap();
        assert!(metrics.reference.is_none());
        assert_eq!(metrics.histogram_bins, 20);
    }

    #[test]
    fn invalid_sigma_is_reported() {
        let err = parse_config(
            r#"{"guide": "g.png", "params": {"sigma_spatial": 0.0}, "output": {"image": "o.png"}}"#,
        )
        .unwrap_err();
        assert!(err.contains("sigma_spatial"), "{err}");
    }
}
