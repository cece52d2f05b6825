//! Image containers shared by the pipeline stages.
//!
//! - [`PixelBuffer`]: owned 8-bit buffer (1-channel intensity or 3-channel RGB).
//! - [`EdgeMap`]: binary 0/255 buffer emitted by the edge stage.
//! - [`ImageF32`]: float scratch image for gradients.
//! - [`ImageU8`]: borrowed strided view over a camera plane.
pub mod buffer;
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::buffer::{EdgeMap, PixelBuffer};
pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
