pub mod border;
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::border::{clamp_index, pad_edge};
pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
