use joint_upsample::ImageF32;

/// Vertical step edge: columns `< split` hold `lo`, the rest `hi`.
pub fn step_f32(width: usize, height: usize, split: usize, lo: f32, hi: f32) -> ImageF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, if x < split { lo } else { hi });
        }
    }
    img
}

/// High-contrast checkerboard with values `0.125` and `0.875`.
pub fn checkerboard_f32(width: usize, height: usize, cell: usize) -> ImageF32 {
    assert!(cell > 0, "cell size must be positive");
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / cell) + (y / cell)) & 1 == 0 {
                0.125
            } else {
                0.875
            };
            img.set(x, y, v);
        }
    }
    img
}

/// Smooth diagonal gradient in `[0, 1]`.
pub fn gradient_f32(width: usize, height: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    let denom = (width + height).saturating_sub(2).max(1) as f32;
    for y in 0..height {
        for x in 0..width {
            img.set(x, y, (x + y) as f32 / denom);
        }
    }
    img
}
