use serde::Serialize;

/// Lifecycle of one frame inside the controller.
///
/// Frames move forward only. A failing stage jumps straight to `Released`,
/// and frames processed without a display sink skip `Rendered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameState {
    Acquired,
    Converted,
    EdgeDetected,
    SegmentsDetected,
    Rendered,
    Released,
}
