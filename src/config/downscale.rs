//! Command-line arguments for the `downscale` tool.
//!
//! `downscale <input> [--output|-o <path>] [--factor|-f <n>]`
use clap::Parser;
use std::path::{Path, PathBuf};

/// Box-average a grayscale image by an integer factor.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "downscale", about, long_about = None)]
pub struct DownscaleArgs {
    /// Image to shrink.
    pub input: PathBuf,
    /// Where to write the result. Defaults to `downscaled_<name>` next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Integer shrink factor applied to both axes.
    #[arg(short, long, default_value_t = 2, value_parser = parse_factor)]
    pub factor: usize,
}

impl DownscaleArgs {
    /// The explicit `--output`, or `downscaled_<name>` beside the input.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.input))
    }
}

fn parse_factor(val: &str) -> Result<usize, String> {
    let parsed = val
        .parse::<usize>()
        .map_err(|e| format!("Invalid factor '{val}': {e}"))?;
    if parsed == 0 {
        Err("factor must be >= 1".to_string())
    } else {
        Ok(parsed)
    }
}

fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("downscaled_{name}"))
}
