use lane_overlay::config::{load_json, EdgeToolConfig};
use lane_overlay::edges::detect_edges_timed;
use lane_overlay::image::io::{load_rgb_image, save_pixel_buffer, write_json_file};
use lane_overlay::{to_intensity_buffer, RawFrame, TimingBreakdown};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: EdgeToolConfig = load_json(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let frame = RawFrame::from_rgb(0, &rgb)
        .map_err(|e| format!("Failed to encode {}: {e}", config.input.display()))?;
    let mut timing = TimingBreakdown::default();
    let intensity = timing
        .time("intensity", || to_intensity_buffer(&frame))
        .map_err(|e| e.to_string())?;
    frame.close();

    let canny = detect_edges_timed(&intensity, &config.lane.edges).map_err(|e| e.to_string())?;
    timing.push("gradient", canny.gradient_ms);
    timing.push("nms", canny.nms_ms);
    timing.push("hysteresis", canny.hysteresis_ms);
    timing.total_ms = timing.stages.iter().map(|s| s.elapsed_ms).sum();

    let (low, high) = config.lane.edges.ordered();
    let summary = EdgeMapSummary {
        width: canny.edges.width(),
        height: canny.edges.height(),
        low_threshold: low,
        high_threshold: high,
        edge_count: canny.edges.edge_count(),
        timing,
    };

    save_pixel_buffer(canny.edges.as_buffer(), &config.output.edges_image)?;
    write_json_file(&config.output.edges_json, &summary)?;

    println!(
        "Saved {} edge pixels to {}",
        summary.edge_count,
        config.output.edges_image.display()
    );
    println!("Saved summary to {}", config.output.edges_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: edge_map <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeMapSummary {
    width: usize,
    height: usize,
    low_threshold: f32,
    high_threshold: f32,
    edge_count: usize,
    timing: TimingBreakdown,
}
