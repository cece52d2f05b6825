//! Pipeline controller and the plumbing around it.
//!
//! [`PipelineController`] runs one frame at a time through
//! conversion → edges → segments → lane policy → overlay, keeps a report of
//! the last frame and releases every frame it is given exactly once.
//! [`latest_frame_channel`] and [`spawn_pipeline_worker`] move that work onto
//! a dedicated thread with keep-only-latest backpressure.

mod controller;
pub mod latest;
mod sink;
mod source;
mod state;

pub use controller::{FrameOutput, PipelineController, PipelineParams, PipelineStats};
pub use latest::{
    latest_frame_channel, spawn_pipeline_worker, LatestFrameReceiver, LatestFrameSender,
    PipelineWorker,
};
pub use sink::{DisplaySink, PngSink};
pub use source::{FrameSource, SyntheticStripeSource};
pub use state::FrameState;
