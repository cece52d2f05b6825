use lane_overlay::config::{load_json, StreamToolConfig};
use lane_overlay::image::PixelBuffer;
use lane_overlay::lanes::{LaneTracker, TrackedLanes};
use lane_overlay::overlay::draw_overlay;
use lane_overlay::pipeline::{
    latest_frame_channel, spawn_pipeline_worker, DisplaySink, FrameSource, PngSink,
    SyntheticStripeSource,
};
use lane_overlay::{LineSegment, PipelineController};
use log::{info, warn};
use std::env;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config: StreamToolConfig = match env::args().nth(1) {
        Some(path) => load_json(Path::new(&path))?,
        None => StreamToolConfig::default(),
    };
    let lane = &config.lane;
    let stream = &config.stream;

    let mut tracker = LaneTracker::with_options(lane.tracker);
    let mut png = stream
        .output_dir
        .as_ref()
        .map(|dir| PngSink::new(dir).with_prefix("lanes").with_every(stream.png_every));
    let latest_lanes = Arc::new(Mutex::new(TrackedLanes::default()));
    let shared_lanes = latest_lanes.clone();
    let geometry = lane.frame;
    let tracked_style = lane.overlay;

    // Smooth the per-frame segments and draw the tracked lanes on a copy.
    let sink = move |frame: &PixelBuffer, segments: &[LineSegment]| {
        let lanes = tracker.update(segments, geometry);
        if let Ok(mut slot) = shared_lanes.lock() {
            *slot = lanes;
        }
        if let Some(png) = png.as_mut() {
            let mut annotated = frame.clone();
            draw_overlay(&mut annotated, &lanes.segments(), &tracked_style);
            png.present(&annotated, segments);
        }
    };

    let controller = PipelineController::new(lane.pipeline_params())
        .with_policy(lane.policy)
        .with_sink(sink);
    let (sender, receiver) = latest_frame_channel();
    let worker = spawn_pipeline_worker(controller, receiver);

    let mut source = SyntheticStripeSource::new(geometry).with_limit(stream.frames);
    let released = source.released_counter();
    let period = Duration::from_secs_f32(1.0 / stream.fps.max(1.0));
    let started = Instant::now();
    while let Some(frame) = source.next_frame() {
        let due = started + period.mul_f64(frame.id() as f64);
        if let Some(wait) = due.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
        if !sender.push(frame) {
            warn!("Pipeline worker stopped early");
            break;
        }
    }
    let dropped = sender.dropped();
    drop(sender);

    let controller = worker.join().map_err(|_| "Pipeline worker panicked".to_string())?;
    let stats = controller.stats();
    info!(
        "produced={} processed={} failed={} dropped={} released={} elapsed={:.2}s",
        source.produced(),
        stats.processed,
        stats.failed,
        dropped,
        released.load(Ordering::SeqCst),
        started.elapsed().as_secs_f64()
    );
    if let Some(report) = controller.last_report() {
        info!(
            "last frame {}: {} edge px, {} segments, {:.2} ms",
            report.frame_id, report.edge_pixels, report.segments_accepted, report.timing.total_ms
        );
    }
    if let Ok(lanes) = latest_lanes.lock() {
        info!("tracked lanes: left={:?} right={:?}", lanes.left, lanes.right);
    }
    Ok(())
}
