use super::sink::DisplaySink;
use super::state::FrameState;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::FrameReport;
use crate::edges::{detect_edges_timed, CannyOptions};
use crate::error::{LaneError, LaneResult};
use crate::frame::{to_color_buffer, to_intensity_buffer, RawFrame};
use crate::image::{EdgeMap, PixelBuffer};
use crate::lanes::{AcceptAll, LanePolicy};
use crate::overlay::{draw_overlay, OverlayStyle};
use crate::segments::{detect_segments, HoughOptions, LineSegment};
use crate::types::FrameGeometry;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Stage parameters. Defaults reproduce the stock lane overlay:
/// Canny 50/150, Hough (1 px, 1°, 50 votes, 50 px, 10 px gap), green 2 px pen.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub canny: CannyOptions,
    pub hough: HoughOptions,
    pub overlay: OverlayStyle,
}

/// Everything the stage chain produced for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub edges: EdgeMap,
    /// Segments found by the detector before the lane policy ran.
    pub detected: Vec<LineSegment>,
    /// Segments the policy kept; these are the ones drawn.
    pub segments: Vec<LineSegment>,
    /// Color frame with the overlay, when rendering ran.
    pub rendered: Option<PixelBuffer>,
    pub budget_exhausted: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub processed: u64,
    pub failed: u64,
    /// Frames whose segment detector hit its sample budget.
    pub timeouts: u64,
}

/// Drives one frame at a time through conversion, edge extraction, segment
/// detection, lane selection and rendering.
pub struct PipelineController {
    params: PipelineParams,
    policy: Box<dyn LanePolicy>,
    sink: Option<Box<dyn DisplaySink>>,
    last_report: Option<FrameReport>,
    stats: PipelineStats,
}

impl PipelineController {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            params,
            policy: Box::new(AcceptAll),
            sink: None,
            last_report: None,
            stats: PipelineStats::default(),
        }
    }

    pub fn with_sink<S: DisplaySink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_policy<P: LanePolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Process one camera frame and release it.
    ///
    /// Stage failures are logged and recorded in [`last_report`]; they never
    /// escape. The frame is closed exactly once whatever happens.
    ///
    /// [`last_report`]: PipelineController::last_report
    pub fn on_frame(&mut self, frame: RawFrame) {
        // Without a sink nobody looks at the picture, so color work is skipped.
        let present = self.sink.is_some();
        let mut report = FrameReport::new(frame.id(), frame.width(), frame.height());
        // Outcome is already logged and counted.
        let _ = self.run(&frame, present, present, &mut report);
        frame.close();
        report.transitions.push(FrameState::Released);
        self.last_report = Some(report);
    }

    /// Run the stage chain on a frame the caller keeps ownership of.
    ///
    /// Always renders and returns the overlaid color buffer; the display sink
    /// is not involved and the frame is not released.
    pub fn process(&mut self, frame: &RawFrame) -> LaneResult<FrameOutput> {
        let mut report = FrameReport::new(frame.id(), frame.width(), frame.height());
        let result = self.run(frame, true, false, &mut report);
        self.last_report = Some(report);
        result
    }

    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    fn run(
        &mut self,
        frame: &RawFrame,
        render: bool,
        present: bool,
        report: &mut FrameReport,
    ) -> LaneResult<FrameOutput> {
        let start = Instant::now();
        report.transitions.push(FrameState::Acquired);
        let result = self.stages(frame, render, present, report);
        report.timing.total_ms = elapsed_ms(start);

        match &result {
            Ok(output) => {
                self.stats.processed += 1;
                if output.budget_exhausted {
                    self.stats.timeouts += 1;
                }
                debug!(
                    "frame {}: {} edge px, {} segments ({} kept) in {:.2} ms",
                    frame.id(),
                    report.edge_pixels,
                    report.segments_detected,
                    report.segments_accepted,
                    report.timing.total_ms
                );
            }
            Err(err) => {
                self.stats.failed += 1;
                warn!("frame {} dropped: {err}", frame.id());
                report.error = Some(err.to_string());
            }
        }
        result
    }

    fn stages(
        &mut self,
        frame: &RawFrame,
        render: bool,
        present: bool,
        report: &mut FrameReport,
    ) -> LaneResult<FrameOutput> {
        let intensity = report.timing.time("intensity", || to_intensity_buffer(frame))?;
        let color = if render {
            Some(report.timing.time("color", || to_color_buffer(frame))?)
        } else {
            None
        };
        report.transitions.push(FrameState::Converted);

        let canny = detect_edges_timed(&intensity, &self.params.canny)?;
        report.timing.push("gradient", canny.gradient_ms);
        report.timing.push("nms", canny.nms_ms);
        report.timing.push("hysteresis", canny.hysteresis_ms);
        report.edge_pixels = canny.edges.edge_count();
        report.transitions.push(FrameState::EdgeDetected);

        let hough = detect_segments(&canny.edges, &self.params.hough);
        report.timing.push("hough", hough.elapsed_ms);
        report.sampled = hough.sampled;
        report.budget_exhausted = hough.budget_exhausted;
        if hough.budget_exhausted {
            let timeout = LaneError::DetectorTimeout {
                sampled: hough.sampled,
            };
            warn!(
                "frame {}: {timeout}, keeping {} partial segments",
                frame.id(),
                hough.segments.len()
            );
        }
        let detected = hough.segments;
        let geometry = FrameGeometry::new(frame.width(), frame.height());
        let segments = report
            .timing
            .time("policy", || self.policy.select(detected.clone(), geometry));
        report.segments_detected = detected.len();
        report.segments_accepted = segments.len();
        report.transitions.push(FrameState::SegmentsDetected);

        let rendered = match color {
            Some(mut buffer) => {
                let style = self.params.overlay;
                report
                    .timing
                    .time("render", || draw_overlay(&mut buffer, &segments, &style));
                if present {
                    if let Some(sink) = self.sink.as_mut() {
                        report.timing.time("present", || sink.present(&buffer, &segments));
                    }
                }
                report.transitions.push(FrameState::Rendered);
                Some(buffer)
            }
            None => None,
        };

        Ok(FrameOutput {
            edges: canny.edges,
            detected,
            segments,
            rendered,
            budget_exhausted: report.budget_exhausted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{PixelFormat, Plane};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn gray_frame(id: u64, width: usize, height: usize, value: u8) -> RawFrame {
        RawFrame::from_luma(id, width, height, vec![value; width * height])
    }

    #[test]
    fn blank_frame_without_sink_skips_rendering() {
        let mut controller = PipelineController::new(PipelineParams::default());
        controller.on_frame(gray_frame(3, 64, 48, 0));
        let report = controller.last_report().expect("report");
        assert_eq!(report.frame_id, 3);
        assert_eq!(
            report.transitions,
            [
                FrameState::Acquired,
                FrameState::Converted,
                FrameState::EdgeDetected,
                FrameState::SegmentsDetected,
                FrameState::Released,
            ]
        );
        assert_eq!(report.edge_pixels, 0);
        assert!(report.error.is_none());
        assert_eq!(controller.stats().processed, 1);
    }

    #[test]
    fn failing_frame_is_released_and_counted() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let plane = || Plane::packed(vec![0; 16], 4);
        let frame = RawFrame::new(9, 4, 4, PixelFormat::Jpeg, [plane(), plane(), plane()])
            .with_release(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let mut controller = PipelineController::new(PipelineParams::default());
        controller.on_frame(frame);

        assert_eq!(released.load(Ordering::SeqCst), 1);
        let report = controller.last_report().expect("report");
        assert_eq!(report.transitions, [FrameState::Acquired, FrameState::Released]);
        assert!(report.failed());
        assert_eq!(controller.stats().failed, 1);
    }

    #[test]
    fn process_renders_without_sink() {
        let mut controller = PipelineController::new(PipelineParams::default());
        let frame = gray_frame(1, 32, 16, 90);
        let output = controller.process(&frame).expect("process");
        let rendered = output.rendered.expect("rendered buffer");
        assert_eq!((rendered.width(), rendered.height(), rendered.channels()), (32, 16, 3));
        assert!(output.segments.is_empty());
        assert_eq!(
            controller.last_report().and_then(FrameReport::final_state),
            Some(FrameState::Rendered)
        );
    }
}
