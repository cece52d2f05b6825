//! Frame buffer adapter: camera frames in, dense pixel buffers out.
//!
//! A [`RawFrame`] is a lease on producer-owned sensor data in planar
//! YUV 4:2:0. The adapter turns it into
//!
//! - a 1-channel intensity buffer, read straight from the luma plane
//!   (chroma is never touched on this path), and
//! - a 3-channel RGB buffer for overlay and display, converted with the
//!   full-range BT.601 transform and nearest-neighbour chroma lookup.
//!
//! Both conversions are pure; neither keeps a reference to the frame.

mod convert;
mod raw;

pub use convert::{to_color_buffer, to_intensity_buffer};
pub use raw::{chroma_dims, PixelFormat, Plane, RawFrame};
