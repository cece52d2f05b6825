//! Segment detector: binary edge map → candidate line segments.
//!
//! Implements the probabilistic Hough transform:
//!
//! - Edge pixels are shuffled with a seeded RNG and visited once each.
//! - Each visited pixel votes in a discretized (ρ, θ) accumulator.
//! - When a bin reaches the vote threshold, the edge run along that line is
//!   traced through the sampled pixel in both directions, bridging gaps up to
//!   `max_line_gap`; the result is kept when at least `min_line_length` long.
//! - Traced pixels are removed from the pool (and their votes withdrawn for
//!   accepted lines) so one physical line is not reported repeatedly.
//!
//! Output order is discovery order. It carries no spatial or confidence
//! meaning and callers must not rely on it. An edge map without edge pixels
//! yields an empty result.
//!
//! Endpoints always lie inside the edge map.

mod hough;
mod options;
mod segment;

pub use hough::HoughResult;
pub use options::HoughOptions;
pub use segment::LineSegment;

use crate::image::EdgeMap;

/// Run the probabilistic Hough transform with full options.
pub fn detect_segments(edges: &EdgeMap, options: &HoughOptions) -> HoughResult {
    hough::probabilistic_hough(edges, options)
}

/// Positional form of [`detect_segments`] with the default seed and no budget.
pub fn detect_segments_with(
    edges: &EdgeMap,
    rho: f32,
    theta: f32,
    threshold: u32,
    min_line_length: f32,
    max_line_gap: f32,
) -> Vec<LineSegment> {
    let options = HoughOptions::new(rho, theta, threshold, min_line_length, max_line_gap);
    detect_segments(edges, &options).segments
}

#[cfg(test)]
mod tests;
