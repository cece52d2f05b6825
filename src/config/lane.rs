use crate::edges::CannyOptions;
use crate::lanes::{AcceptAll, LanePolicy, SlopeRoiPolicy, TrackerOptions};
use crate::overlay::OverlayStyle;
use crate::pipeline::PipelineParams;
use crate::segments::{HoughOptions, LineSegment};
use crate::types::FrameGeometry;
use serde::{Deserialize, Serialize};

/// Every tunable of the lane pipeline. Missing sections fall back to the
/// stock values (1280×720, Canny 50/150, Hough 1/1°/50/50/10, green 2 px).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    pub frame: FrameGeometry,
    pub edges: CannyOptions,
    pub hough: HoughConfig,
    pub overlay: OverlayStyle,
    pub policy: PolicyConfig,
    pub tracker: TrackerOptions,
}

impl LaneConfig {
    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            canny: self.edges,
            hough: self.hough.to_hough_options(),
            overlay: self.overlay,
        }
    }
}

/// Hough settings with the angle step in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    pub rho: f32,
    pub theta_deg: f32,
    pub threshold: u32,
    pub min_line_length: f32,
    pub max_line_gap: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
    pub seed: u64,
}

impl Default for HoughConfig {
    fn default() -> Self {
        let base = HoughOptions::default();
        Self {
            rho: base.rho,
            theta_deg: base.theta.to_degrees(),
            threshold: base.threshold,
            min_line_length: base.min_line_length,
            max_line_gap: base.max_line_gap,
            max_samples: base.max_samples,
            seed: base.seed,
        }
    }
}

impl HoughConfig {
    pub fn to_hough_options(&self) -> HoughOptions {
        HoughOptions {
            rho: self.rho,
            theta: self.theta_deg.to_radians(),
            threshold: self.threshold,
            min_line_length: self.min_line_length,
            max_line_gap: self.max_line_gap,
            max_samples: self.max_samples.filter(|&n| n > 0),
            seed: self.seed,
        }
    }
}

/// Lane policy selection, tagged by `kind`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    #[default]
    AcceptAll,
    SlopeRoi(SlopeRoiPolicy),
}

impl LanePolicy for PolicyConfig {
    fn select(&self, segments: Vec<LineSegment>, geometry: FrameGeometry) -> Vec<LineSegment> {
        match self {
            PolicyConfig::AcceptAll => AcceptAll.select(segments, geometry),
            PolicyConfig::SlopeRoi(policy) => policy.select(segments, geometry),
        }
    }
}
