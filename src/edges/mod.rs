//! Edge extractor: intensity buffer → binary edge map (Canny).
//!
//! Steps
//! - Sobel gradients with border replication (`grad`).
//! - Direction-aligned non-maximum suppression (`nms`).
//! - Hysteresis linking with 8-connectivity (`hysteresis`).
//!
//! Magnitudes stay in f32 on the 0..255-derived Sobel scale; thresholds are
//! compared on that scale and the output is quantized to {0, 255}. The whole
//! chain is deterministic, and raising either threshold can only remove edge
//! pixels.

pub mod canny;
pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use canny::{detect_edges, detect_edges_timed, detect_edges_with, CannyOptions, CannyOutput};
pub use grad::{sobel_gradients, Grad};
