//! Per-frame diagnostics: stage timings and the frame report kept by the
//! pipeline controller. Everything here serializes to JSON for the tools.

pub mod report;
pub mod timing;

pub use report::FrameReport;
pub use timing::{StageTiming, TimingBreakdown};
