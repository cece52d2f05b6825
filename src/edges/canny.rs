use super::grad::sobel_gradients;
use super::hysteresis::hysteresis;
use super::nms::suppress_non_maxima;
use crate::error::{LaneError, LaneResult};
use crate::image::{EdgeMap, ImageF32, PixelBuffer};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Hysteresis thresholds on the Sobel magnitude scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl CannyOptions {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }

    /// Thresholds as `(low, high)` with `low <= high`.
    pub fn ordered(&self) -> (f32, f32) {
        if self.low_threshold > self.high_threshold {
            (self.high_threshold, self.low_threshold)
        } else {
            (self.low_threshold, self.high_threshold)
        }
    }
}

/// Edge map plus per-step timings.
pub struct CannyOutput {
    pub edges: EdgeMap,
    pub gradient_ms: f64,
    pub nms_ms: f64,
    pub hysteresis_ms: f64,
}

/// Canny edge detection on a 1-channel intensity buffer.
pub fn detect_edges(intensity: &PixelBuffer, low: f32, high: f32) -> LaneResult<EdgeMap> {
    detect_edges_with(intensity, &CannyOptions::new(low, high))
}

pub fn detect_edges_with(intensity: &PixelBuffer, options: &CannyOptions) -> LaneResult<EdgeMap> {
    detect_edges_timed(intensity, options).map(|out| out.edges)
}

/// Like [`detect_edges_with`] but also reports how long each step took.
pub fn detect_edges_timed(
    intensity: &PixelBuffer,
    options: &CannyOptions,
) -> LaneResult<CannyOutput> {
    let (w, h) = (intensity.width(), intensity.height());
    if w == 0 || h == 0 {
        return Err(LaneError::invalid_dimensions(w, h, "intensity buffer has zero area"));
    }
    if intensity.channels() != 1 {
        return Err(LaneError::invalid_dimensions(
            w,
            h,
            format!("edge detection needs 1 channel, got {}", intensity.channels()),
        ));
    }
    if options.low_threshold > options.high_threshold {
        debug!(
            "Canny thresholds given as low={} > high={}, swapping",
            options.low_threshold, options.high_threshold
        );
    }
    let (low, high) = options.ordered();

    let gradient_start = Instant::now();
    let grad = sobel_gradients(&ImageF32::from_u8(intensity));
    let gradient_ms = gradient_start.elapsed().as_secs_f64() * 1000.0;

    let nms_start = Instant::now();
    let thin = suppress_non_maxima(&grad, low);
    let nms_ms = nms_start.elapsed().as_secs_f64() * 1000.0;

    let hysteresis_start = Instant::now();
    let edges = hysteresis(&thin, low, high);
    let hysteresis_ms = hysteresis_start.elapsed().as_secs_f64() * 1000.0;

    Ok(CannyOutput {
        edges,
        gradient_ms,
        nms_ms,
        hysteresis_ms,
    })
}
