mod common;

use common::synthetic_image::{black_frame, diagonal_stripes_frame, stripe_distance, STRIPE_OFFSETS};
use lane_overlay::overlay::LANE_GREEN;
use lane_overlay::{to_color_buffer, PipelineController, PipelineParams};

const WIDTH: usize = 1280;
const HEIGHT: usize = 720;

#[test]
fn diagonal_stripes_are_detected_and_drawn() {
    common::init_logger();
    let frame = diagonal_stripes_frame(0, WIDTH, HEIGHT);
    let mut controller = PipelineController::new(PipelineParams::default());
    let output = controller.process(&frame).expect("pipeline should accept a YUV420 frame");
    frame.close();

    assert!(
        output.segments.len() >= 2,
        "expected at least two segments, got {:?}",
        output.segments
    );
    for seg in &output.segments {
        let angle = seg.angle_deg();
        assert!(
            (angle - 45.0).abs() < 3.0,
            "segment {seg:?} not parallel to the stripes (angle {angle:.1})"
        );
        for p in [seg.p0, seg.p1] {
            let d = stripe_distance(p[0] as i64, p[1] as i64);
            assert!(d <= 3, "endpoint {p:?} is {d} px away from the stripes");
        }
    }
    for offset in STRIPE_OFFSETS {
        assert!(
            output.segments.iter().any(|s| {
                let m = s.midpoint();
                ((m.x - m.y) as i64 - offset).abs() <= 5
            }),
            "no segment along the stripe at x - y = {offset}"
        );
    }

    let rendered = output.rendered.expect("process() renders");
    let mut green_on_stripes = 0usize;
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if rendered.pixel(x, y) == LANE_GREEN {
                assert!(
                    stripe_distance(x as i64, y as i64) <= 4,
                    "green pixel at ({x}, {y}) away from the stripes"
                );
                green_on_stripes += 1;
            }
        }
    }
    assert!(green_on_stripes >= 100, "only {green_on_stripes} green pixels drawn");

    let report = controller.last_report().expect("report");
    assert!(report.edge_pixels > 0);
    assert_eq!(report.segments_detected, output.detected.len());
    assert!(report.error.is_none());
}

#[test]
fn black_frame_passes_through_unchanged() {
    common::init_logger();
    let frame = black_frame(1, WIDTH, HEIGHT);
    let converted = to_color_buffer(&frame).expect("convert");
    let mut controller = PipelineController::new(PipelineParams::default());
    let output = controller.process(&frame).expect("pipeline");

    assert_eq!(output.edges.edge_count(), 0);
    assert!(output.detected.is_empty());
    assert!(output.segments.is_empty());
    assert_eq!(output.rendered.as_ref(), Some(&converted));
}
