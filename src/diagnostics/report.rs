use super::timing::TimingBreakdown;
use crate::pipeline::FrameState;
use serde::Serialize;

/// Summary of one frame's trip through the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame_id: u64,
    pub width: usize,
    pub height: usize,
    /// States entered, starting at `Acquired` and ending at `Released`.
    pub transitions: Vec<FrameState>,
    pub edge_pixels: usize,
    pub segments_detected: usize,
    pub segments_accepted: usize,
    /// Edge points the segment detector drew before stopping.
    pub sampled: usize,
    pub budget_exhausted: bool,
    pub timing: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameReport {
    pub fn new(frame_id: u64, width: usize, height: usize) -> Self {
        Self {
            frame_id,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn final_state(&self) -> Option<FrameState> {
        self.transitions.last().copied()
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}
