use clap::Parser;
use joint_upsample::config::downscale::DownscaleArgs;
use joint_upsample::image::io::{load_grayscale_f32, save_grayscale_f32};
use joint_upsample::resample::downscale_area;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = DownscaleArgs::parse();
    let output = args.output_path();

    let image = load_grayscale_f32(&args.input)?;
    println!("Original size: {}x{}", image.w, image.h);

    let small = downscale_area(&image, args.factor).map_err(|e| e.to_string())?;
    save_grayscale_f32(&small, &output)?;

    println!("New size: {}x{}", small.w, small.h);
    println!("Saved to: {}", output.display());
    Ok(())
}
