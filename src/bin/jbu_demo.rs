use joint_upsample::config::upsample::{load_config, UpsampleToolConfig};
use joint_upsample::diagnostics::UpsampleReport;
use joint_upsample::image::io::{load_grayscale_f32, save_grayscale_f32, write_json_file};
use joint_upsample::image::ImageF32;
use joint_upsample::metrics::{compare, ErrorMetrics};
use joint_upsample::resample::{downscale_area, upscale};
use joint_upsample::JointBilateralUpsampler;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let guide = load_grayscale_f32(&config.guide)?;
    let coarse = load_coarse(&config, &guide)?;

    let upsampler = JointBilateralUpsampler::new(config.params);
    let report = upsampler
        .run_with_diagnostics(&coarse, &guide)
        .map_err(|e| format!("Upsampling failed: {e}"))?;

    save_grayscale_f32(&report.output, &config.output.image)?;
    println!("Saved JBU result to {}", config.output.image.display());

    if let Some(path) = &config.output.bilinear_image {
        let bilinear = upscale(&coarse, guide.w, guide.h).map_err(|e| e.to_string())?;
        save_grayscale_f32(&bilinear, path)?;
        println!("Saved bilinear upscale to {}", path.display());
    }

    let metrics = match &config.metrics {
        Some(m) => {
            let reference = match &m.reference {
                Some(path) => load_grayscale_f32(path)?,
                None => guide.clone(),
            };
            Some(compare(&report.output, &reference, m.histogram_bins).map_err(|e| e.to_string())?)
        }
        None => None,
    };

    print_text_summary(&report, metrics.as_ref());

    if let Some(path) = &config.output.report_json {
        let summary = DemoSummary {
            report: &report,
            metrics: metrics.as_ref(),
        };
        write_json_file(path, &summary)?;
        println!("JSON report written to {}", path.display());
    }

    Ok(())
}

fn load_coarse(config: &UpsampleToolConfig, guide: &ImageF32) -> Result<ImageF32, String> {
    match &config.coarse {
        Some(path) => load_grayscale_f32(path),
        None => downscale_area(guide, config.derive_factor)
            .map_err(|e| format!("Failed to derive coarse input: {e}")),
    }
}

fn print_text_summary(report: &UpsampleReport, metrics: Option<&ErrorMetrics>) {
    println!("Upsampling summary");
    println!(
        "  {}x{} -> {}x{} (scale {:.2} x {:.2})",
        report.coarse_width,
        report.coarse_height,
        report.width,
        report.height,
        report.scale_x,
        report.scale_y
    );
    println!(
        "  sigma_spatial={:.3} sigma_range={:.3} kernel={}x{}",
        report.params.sigma_spatial,
        report.params.sigma_range,
        report.kernel_size,
        report.kernel_size
    );
    let stages: Vec<String> = report
        .timing
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!(
        "  timings (ms): {} total={:.3}",
        stages.join(" "),
        report.timing.total_ms
    );
    if let Some(m) = metrics {
        println!(
            "  mean squared error: {:.6} (max |diff| {:.4})",
            m.mse, m.max_abs_diff
        );
    }
}

fn usage() -> String {
    "Usage: jbu_demo <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoSummary<'a> {
    report: &'a UpsampleReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a ErrorMetrics>,
}
