#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod image;
pub mod lanes;
pub mod overlay;
pub mod pipeline;
pub mod types;

// Stage implementations – public for tools and tests, but considered internals.
pub mod edges;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: controller + its inputs and outputs.
pub use crate::error::{LaneError, LaneResult};
pub use crate::frame::{PixelFormat, Plane, RawFrame};
pub use crate::pipeline::{FrameOutput, FrameState, PipelineController, PipelineParams};
pub use crate::types::FrameGeometry;

// Per-frame diagnostics kept by the controller.
pub use crate::diagnostics::{FrameReport, TimingBreakdown};

// Single-stage entry points.
pub use crate::edges::detect_edges;
pub use crate::frame::{to_color_buffer, to_intensity_buffer};
pub use crate::overlay::draw_segments;
pub use crate::segments::{detect_segments, LineSegment};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_overlay::prelude::*;
///
/// # fn main() {
/// let (w, h) = (1280usize, 720usize);
/// let frame = RawFrame::from_luma(0, w, h, vec![0u8; w * h]);
///
/// let mut controller = PipelineController::new(PipelineParams::default())
///     .with_sink(|rgb: &PixelBuffer, segments: &[LineSegment]| {
///         println!("{}x{} frame, {} lane segments", rgb.width(), rgb.height(), segments.len());
///     });
///
/// controller.on_frame(frame);
/// let report = controller.last_report().expect("frame report");
/// println!("edges={} latency_ms={:.3}", report.edge_pixels, report.timing.total_ms);
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{EdgeMap, PixelBuffer};
    pub use crate::lanes::{AcceptAll, LanePolicy, LaneTracker, SlopeRoiPolicy};
    pub use crate::pipeline::{
        latest_frame_channel, spawn_pipeline_worker, DisplaySink, FrameSource, PipelineStats,
    };
    pub use crate::{
        FrameGeometry, FrameReport, FrameState, LaneError, LineSegment, PipelineController,
        PipelineParams, RawFrame,
    };
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::edges::{detect_edges_timed, detect_edges_with, CannyOptions, CannyOutput};
    pub use crate::frame::chroma_dims;
    pub use crate::overlay::{draw_overlay, OverlayStyle, LANE_GREEN};
    pub use crate::segments::{detect_segments_with, HoughOptions, HoughResult};
}
