//! Exponentially weighted lane tracker.
//!
//! Sits above the stateless per-frame detector: it consumes each frame's
//! segments, summarizes them into at most one left and one right lane line,
//! and blends those with the previous estimate. The detector itself never
//! sees this state.
use crate::segments::LineSegment;
use crate::types::FrameGeometry;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Lane boundary spanning from the bottom row up to the horizon row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LaneLine {
    /// Column where the lane meets the bottom row.
    pub x_bottom: f32,
    /// Column where the lane meets the horizon row.
    pub x_horizon: f32,
    pub y_bottom: f32,
    pub y_horizon: f32,
}

impl LaneLine {
    pub fn to_segment(&self) -> LineSegment {
        LineSegment::new(
            self.x_bottom.round() as i32,
            self.y_bottom.round() as i32,
            self.x_horizon.round() as i32,
            self.y_horizon.round() as i32,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TrackedLanes {
    pub left: Option<LaneLine>,
    pub right: Option<LaneLine>,
}

impl TrackedLanes {
    pub fn segments(&self) -> Vec<LineSegment> {
        [self.left, self.right]
            .iter()
            .flatten()
            .map(LaneLine::to_segment)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Weight of the newest measurement, `(0, 1]`.
    pub alpha: f32,
    /// Frames a side may go unseen before it is dropped.
    pub max_missed: u32,
    /// Horizon row as a fraction of the frame height.
    pub horizon_fraction: f32,
    /// Segments flatter than this (degrees from horizontal) are ignored.
    pub min_inclination_deg: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            max_missed: 5,
            horizon_fraction: 0.6,
            min_inclination_deg: 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Side {
    // (x_bottom, x_horizon)
    estimate: Option<Vector2<f32>>,
    missed: u32,
}

impl Side {
    fn update(&mut self, measurement: Option<Vector2<f32>>, options: &TrackerOptions) {
        // A non-finite measurement counts as no support.
        match measurement.filter(|m| m.iter().all(|v| v.is_finite())) {
            Some(m) => {
                let alpha = options.alpha.clamp(f32::EPSILON, 1.0);
                self.estimate = Some(match self.estimate {
                    Some(prev) => prev.lerp(&m, alpha),
                    None => m,
                });
                self.missed = 0;
            }
            None => {
                self.missed = self.missed.saturating_add(1);
                if self.missed > options.max_missed {
                    self.estimate = None;
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct LaneTracker {
    options: TrackerOptions,
    left: Side,
    right: Side,
}

impl LaneTracker {
    /// Tracker with default options and the given EWMA weight.
    pub fn new(alpha: f32) -> Self {
        Self::with_options(TrackerOptions {
            alpha,
            ..TrackerOptions::default()
        })
    }

    pub fn with_options(options: TrackerOptions) -> Self {
        Self {
            options,
            left: Side::default(),
            right: Side::default(),
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Fold one frame's detections into the running estimate.
    pub fn update(&mut self, segments: &[LineSegment], geometry: FrameGeometry) -> TrackedLanes {
        let y_bottom = geometry.height.saturating_sub(1) as f32;
        let y_horizon = geometry.height as f32 * self.options.horizon_fraction;

        let mut sums = [(Vector2::<f32>::zeros(), 0.0f32); 2];
        for seg in segments {
            let angle = seg.angle_deg();
            if angle.min(180.0 - angle) < self.options.min_inclination_deg {
                continue;
            }
            let d = seg.delta();
            if d.y.abs() < f32::EPSILON {
                continue;
            }
            // Columns per row; left lanes lean right going up the image (x grows as y shrinks).
            let k = d.x / d.y;
            let start = seg.start();
            let at = |y: f32| start.x + k * (y - start.y);
            let side = if k < 0.0 { 0 } else { 1 };
            let weight = seg.length();
            sums[side].0 += Vector2::new(at(y_bottom), at(y_horizon)) * weight;
            sums[side].1 += weight;
        }
        let measure = |(sum, weight): (Vector2<f32>, f32)| (weight > 0.0).then(|| sum / weight);

        self.left.update(measure(sums[0]), &self.options);
        self.right.update(measure(sums[1]), &self.options);

        let line = |v: Vector2<f32>| LaneLine {
            x_bottom: v.x,
            x_horizon: v.y,
            y_bottom,
            y_horizon,
        };
        TrackedLanes {
            left: self.left.estimate.map(line),
            right: self.right.estimate.map(line),
        }
    }

    pub fn reset(&mut self) {
        self.left = Side::default();
        self.right = Side::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> FrameGeometry {
        FrameGeometry::new(1000, 500)
    }

    #[test]
    fn splits_left_and_right_lanes() {
        let mut tracker = LaneTracker::new(0.3);
        let left = LineSegment::new(100, 499, 400, 300);
        let right = LineSegment::new(900, 499, 600, 300);
        let lanes = tracker.update(&[left, right], geometry());
        let l = lanes.left.expect("left lane");
        let r = lanes.right.expect("right lane");
        assert!((l.x_bottom - 100.0).abs() < 1e-3, "{l:?}");
        assert!((r.x_bottom - 900.0).abs() < 1e-3, "{r:?}");
        assert!(l.x_horizon > l.x_bottom && r.x_horizon < r.x_bottom);
        assert_eq!(lanes.segments().len(), 2);
    }

    #[test]
    fn estimate_moves_by_alpha() {
        let mut tracker = LaneTracker::new(0.5);
        tracker.update(&[LineSegment::new(100, 499, 400, 300)], geometry());
        let lanes = tracker.update(&[LineSegment::new(200, 499, 500, 300)], geometry());
        let l = lanes.left.expect("left lane");
        assert!((l.x_bottom - 150.0).abs() < 1e-3, "{l:?}");
    }

    #[test]
    fn horizontal_segments_are_ignored_and_stale_sides_expire() {
        let mut tracker = LaneTracker::with_options(TrackerOptions {
            max_missed: 1,
            ..TrackerOptions::default()
        });
        tracker.update(&[LineSegment::new(100, 499, 400, 300)], geometry());
        let flat = [LineSegment::new(0, 450, 900, 460)];
        assert!(tracker.update(&flat, geometry()).left.is_some());
        assert!(tracker.update(&flat, geometry()).left.is_none());
    }

    #[test]
    fn flat_segments_never_poison_the_estimate() {
        let mut tracker = LaneTracker::with_options(TrackerOptions {
            min_inclination_deg: 0.0,
            ..TrackerOptions::default()
        });
        let flat = LineSegment::new(100, 400, 500, 400);
        let point = LineSegment::new(300, 300, 300, 300);
        let lanes = tracker.update(&[flat, point], geometry());
        assert_eq!(lanes, TrackedLanes::default());

        let right = LineSegment::new(900, 499, 600, 300);
        let lanes = tracker.update(&[flat, right], geometry());
        let r = lanes.right.expect("right lane");
        assert!(r.x_bottom.is_finite() && r.x_horizon.is_finite(), "{r:?}");
        assert!((r.x_bottom - 900.0).abs() < 1e-3, "{r:?}");
    }

    #[test]
    fn reset_forgets_everything() {
        let mut tracker = LaneTracker::new(0.3);
        tracker.update(&[LineSegment::new(100, 499, 400, 300)], geometry());
        tracker.reset();
        assert_eq!(tracker.update(&[], geometry()), TrackedLanes::default());
    }
}
