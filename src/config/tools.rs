use super::lane::LaneConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// `lane_overlay`: one still image through the whole pipeline.
#[derive(Debug, Deserialize)]
pub struct OverlayToolConfig {
    pub input: PathBuf,
    #[serde(flatten)]
    pub lane: LaneConfig,
    pub output: OverlayOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct OverlayOutputConfig {
    pub overlay_image: PathBuf,
    #[serde(default)]
    pub edges_image: Option<PathBuf>,
    pub report_json: PathBuf,
}

/// `edge_map`: conversion and edge extraction only.
#[derive(Debug, Deserialize)]
pub struct EdgeToolConfig {
    pub input: PathBuf,
    #[serde(flatten)]
    pub lane: LaneConfig,
    pub output: EdgeOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct EdgeOutputConfig {
    pub edges_image: PathBuf,
    pub edges_json: PathBuf,
}

/// `lane_stream`: synthetic camera into the threaded pipeline.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StreamToolConfig {
    #[serde(flatten)]
    pub lane: LaneConfig,
    pub stream: StreamConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Frames the source produces before the run ends.
    pub frames: u64,
    /// Source cadence.
    pub fps: f32,
    /// Where overlay frames go; nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Write every n-th presented frame.
    pub png_every: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            fps: 30.0,
            output_dir: None,
            png_every: 30,
        }
    }
}
