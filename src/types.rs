use serde::{Deserialize, Serialize};

/// Frame size handed to lane policies and trackers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
}

impl FrameGeometry {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
