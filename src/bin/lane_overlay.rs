use lane_overlay::config::{load_json, OverlayToolConfig, PolicyConfig};
use lane_overlay::image::io::{load_rgb_image, save_pixel_buffer, write_json_file};
use lane_overlay::{FrameReport, LineSegment, PipelineController, RawFrame};
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
    let config: OverlayToolConfig = load_json(Path::new(&config_path))?;

    let rgb = load_rgb_image(&config.input)?;
    let frame = RawFrame::from_rgb(0, &rgb)
        .map_err(|e| format!("Failed to encode {}: {e}", config.input.display()))?;

    let mut controller =
        PipelineController::new(config.lane.pipeline_params()).with_policy(config.lane.policy);
    let output = controller.process(&frame).map_err(|e| e.to_string())?;
    frame.close();

    let rendered = output.rendered.as_ref().ok_or("Pipeline produced no overlay")?;
    save_pixel_buffer(rendered, &config.output.overlay_image)?;
    if let Some(path) = &config.output.edges_image {
        save_pixel_buffer(output.edges.as_buffer(), path)?;
    }

    let report = OverlayReport {
        policy: config.lane.policy,
        frame: controller.last_report().cloned().unwrap_or_default(),
        segments: output.segments,
    };
    write_json_file(&config.output.report_json, &report)?;

    println!(
        "Saved overlay with {} of {} segments to {}",
        report.segments.len(),
        output.detected.len(),
        config.output.overlay_image.display()
    );
    println!("Saved report to {}", config.output.report_json.display());
    Ok(())
}

fn usage() -> String {
    "Usage: lane_overlay <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OverlayReport {
    policy: PolicyConfig,
    frame: FrameReport,
    segments: Vec<LineSegment>,
}
