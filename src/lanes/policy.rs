use crate::segments::LineSegment;
use crate::types::FrameGeometry;
use serde::{Deserialize, Serialize};

/// Decides which detected segments are drawn as lane markings.
pub trait LanePolicy: Send {
    fn select(&self, segments: Vec<LineSegment>, geometry: FrameGeometry) -> Vec<LineSegment>;
}

impl<F> LanePolicy for F
where
    F: Fn(Vec<LineSegment>, FrameGeometry) -> Vec<LineSegment> + Send,
{
    fn select(&self, segments: Vec<LineSegment>, geometry: FrameGeometry) -> Vec<LineSegment> {
        self(segments, geometry)
    }
}

/// Treat every detected segment as a lane marking.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl LanePolicy for AcceptAll {
    fn select(&self, segments: Vec<LineSegment>, _geometry: FrameGeometry) -> Vec<LineSegment> {
        segments
    }
}

/// Keep segments whose inclination looks like a lane seen from the driver's
/// seat and that reach below the horizon.
///
/// Inclination is measured from the image horizontal in degrees, `[0, 90]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeRoiPolicy {
    pub min_abs_slope_deg: f32,
    pub max_abs_slope_deg: f32,
    /// Horizon row as a fraction of the frame height from the top.
    pub horizon_fraction: f32,
}

impl Default for SlopeRoiPolicy {
    fn default() -> Self {
        Self {
            min_abs_slope_deg: 20.0,
            max_abs_slope_deg: 85.0,
            horizon_fraction: 0.5,
        }
    }
}

impl SlopeRoiPolicy {
    fn keeps(&self, seg: &LineSegment, horizon_y: f32) -> bool {
        let angle = seg.angle_deg();
        let inclination = angle.min(180.0 - angle);
        let lowest = seg.p0[1].max(seg.p1[1]) as f32;
        seg.length() > 0.0
            && inclination >= self.min_abs_slope_deg
            && inclination <= self.max_abs_slope_deg
            && lowest >= horizon_y
    }
}

impl LanePolicy for SlopeRoiPolicy {
    fn select(&self, segments: Vec<LineSegment>, geometry: FrameGeometry) -> Vec<LineSegment> {
        let horizon_y = geometry.height as f32 * self.horizon_fraction;
        segments
            .into_iter()
            .filter(|seg| self.keeps(seg, horizon_y))
            .collect()
    }
}
