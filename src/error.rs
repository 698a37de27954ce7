//! Error type shared by the upsampling stages.

/// Reasons why an upsampling call may be rejected.
///
/// All variants are raised before any output is produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpsampleError {
    /// A filter parameter is non-positive or not a number.
    InvalidParameter { name: &'static str, value: f32 },
    /// Target dimensions are zero, smaller than the source, or (under the
    /// exact ratio policy) not an integer multiple of the source.
    InvalidDimensions {
        source: (usize, usize),
        target: (usize, usize),
    },
    /// Two grids that must be co-located have different dimensions.
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// A caller buffer does not hold `width * height` samples.
    BufferLength { expected: usize, got: usize },
}

impl std::fmt::Display for UpsampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsampleError::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name}={value} (must be > 0)")
            }
            UpsampleError::InvalidDimensions { source, target } => write!(
                f,
                "invalid dimensions: cannot upsample {}x{} to {}x{}",
                source.0, source.1, target.0, target.1
            ),
            UpsampleError::ShapeMismatch { expected, got } => write!(
                f,
                "shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, got.0, got.1
            ),
            UpsampleError::BufferLength { expected, got } => {
                write!(f, "buffer length: expected {expected} samples, got {got}")
            }
        }
    }
}

impl std::error::Error for UpsampleError {}
