//! JSON configuration for the pipeline and its command line tools.
//!
//! Loaders return `Result<_, String>` with the offending path in the message;
//! every section is optional and defaults to the stock pipeline settings.

pub mod lane;
pub mod tools;

pub use lane::{HoughConfig, LaneConfig, PolicyConfig};
pub use tools::{EdgeToolConfig, OverlayToolConfig, StreamConfig, StreamToolConfig};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read and parse any JSON config type.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn load_config(path: &Path) -> Result<LaneConfig, String> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::SlopeRoiPolicy;
    use std::fs;

    #[test]
    fn empty_object_gives_stock_settings() {
        let config: LaneConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, LaneConfig::default());
        let params = config.pipeline_params();
        assert_eq!(params.canny.low_threshold, 50.0);
        assert_eq!(params.hough.threshold, 50);
        assert!((params.hough.theta - std::f32::consts::PI / 180.0).abs() < 1e-6);
        assert_eq!(params.overlay.thickness, 2);
        assert_eq!((config.frame.width, config.frame.height), (1280, 720));
    }

    #[test]
    fn partial_sections_and_policy_are_read() {
        let json = r#"{
            "edges": { "high_threshold": 120 },
            "hough": { "theta_deg": 2.0, "max_samples": 0 },
            "policy": { "kind": "slope_roi", "horizon_fraction": 0.4 },
            "tracker": { "alpha": 0.5 }
        }"#;
        let config: LaneConfig = serde_json::from_str(json).expect("parse");
        assert_eq!(config.edges.low_threshold, 50.0);
        assert_eq!(config.edges.high_threshold, 120.0);
        let hough = config.hough.to_hough_options();
        assert!((hough.theta - 2.0f32.to_radians()).abs() < 1e-6);
        assert_eq!(hough.max_samples, None);
        assert_eq!(
            config.policy,
            PolicyConfig::SlopeRoi(SlopeRoiPolicy {
                horizon_fraction: 0.4,
                ..SlopeRoiPolicy::default()
            })
        );
        assert_eq!(config.tracker.alpha, 0.5);
    }

    #[test]
    fn tool_config_loads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("overlay.json");
        fs::write(
            &path,
            r#"{ "input": "road.png",
                 "overlay": { "thickness": 3 },
                 "output": {
                     "overlay_image": "out/overlay.png",
                     "report_json": "out/report.json"
                 } }"#,
        )
        .expect("write config");
        let config: OverlayToolConfig = load_json(&path).expect("load");
        assert_eq!(config.input, Path::new("road.png"));
        assert_eq!(config.lane.overlay.thickness, 3);
        assert!(config.output.edges_image.is_none());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Path::new("/nonexistent/lane.json")).expect_err("missing file");
        assert!(err.contains("/nonexistent/lane.json"), "{err}");
    }
}
