use super::*;
use crate::image::EdgeMap;

fn map_with(
    width: usize,
    height: usize,
    points: impl IntoIterator<Item = (usize, usize)>,
) -> EdgeMap {
    let mut map = EdgeMap::new(width, height);
    for (x, y) in points {
        map.set_edge(x, y);
    }
    map
}

#[test]
fn empty_map_yields_no_segments() {
    let map = EdgeMap::new(64, 48);
    let result = detect_segments(&map, &HoughOptions::default());
    assert!(result.segments.is_empty());
    assert_eq!(result.sampled, 0);
    assert!(!result.budget_exhausted);
}

#[test]
fn horizontal_line_is_recovered() {
    let map = map_with(640, 480, (100..400).map(|x| (x, 100)));
    let result = detect_segments(&map, &HoughOptions::default());
    assert!(!result.segments.is_empty(), "expected a segment on a 300 px line");
    for seg in &result.segments {
        assert_eq!(seg.p0[1], 100, "{seg:?}");
        assert_eq!(seg.p1[1], 100, "{seg:?}");
        assert!((100..400).contains(&seg.p0[0]) && (100..400).contains(&seg.p1[0]));
    }
    let longest = result
        .segments
        .iter()
        .map(LineSegment::length)
        .fold(0.0f32, f32::max);
    assert!(longest >= 50.0, "longest={longest}");
}

#[test]
fn diagonal_line_is_recovered() {
    let map = map_with(300, 300, (50..250).map(|x| (x, x)));
    let segs = detect_segments_with(&map, 1.0, std::f32::consts::PI / 180.0, 50, 50.0, 10.0);
    assert!(!segs.is_empty(), "expected a segment on the diagonal");
    for seg in &segs {
        assert!(seg.length() >= 50.0, "{seg:?}");
        for p in [seg.p0, seg.p1] {
            assert!((p[0] - p[1]).abs() <= 1, "endpoint {p:?} off the diagonal");
            assert!((50..250).contains(&p[0]));
        }
    }
}

#[test]
fn short_lines_are_rejected() {
    let map = map_with(200, 200, (20..50).map(|x| (x, 60)));
    let options = HoughOptions {
        threshold: 10,
        ..HoughOptions::default()
    };
    let result = detect_segments(&map, &options);
    assert!(result.segments.is_empty(), "{:?}", result.segments);
}

#[test]
fn gaps_up_to_the_limit_are_bridged() {
    // 20 px dashes separated by 5 px holes.
    let dashed: Vec<(usize, usize)> = (0..300)
        .filter(|x| x % 25 < 20)
        .map(|x| (x + 10, 40))
        .collect();
    let map = map_with(400, 100, dashed.iter().copied());

    let bridged = detect_segments(&map, &HoughOptions::default());
    let longest = bridged
        .segments
        .iter()
        .map(LineSegment::length)
        .fold(0.0f32, f32::max);
    assert!(longest >= 250.0, "longest={longest}");

    let strict = HoughOptions {
        max_line_gap: 2.0,
        ..HoughOptions::default()
    };
    assert!(detect_segments(&map, &strict).segments.is_empty());
}

#[test]
fn sample_budget_stops_early() {
    let map = map_with(640, 480, (100..400).map(|x| (x, 100)));
    let result = detect_segments(&map, &HoughOptions::default().with_max_samples(10));
    assert!(result.budget_exhausted);
    assert_eq!(result.sampled, 10);
    assert!(result.segments.is_empty());
}

#[test]
fn same_seed_same_segments() {
    let mut points: Vec<(usize, usize)> = (0..200).map(|x| (x + 20, 30 + x / 2)).collect();
    points.extend((0..150).map(|y| (120, y + 10)));
    let map = map_with(320, 240, points);
    let options = HoughOptions::default().with_seed(7);
    let a = detect_segments(&map, &options);
    let b = detect_segments(&map, &options);
    assert_eq!(a.segments, b.segments);
    assert!(a.segments.iter().all(|s| s.within(320, 240)));
}

#[test]
fn invalid_resolution_yields_nothing() {
    let map = map_with(64, 64, (0..64).map(|x| (x, 10)));
    let options = HoughOptions {
        rho: 0.0,
        ..HoughOptions::default()
    };
    assert!(detect_segments(&map, &options).segments.is_empty());
}

#[test]
fn oversized_accumulator_is_refused() {
    let map = map_with(1280, 720, (100..400).map(|x| (x, 100)));
    for options in [
        HoughOptions {
            theta: 1e-6,
            ..HoughOptions::default()
        },
        HoughOptions {
            rho: 1e-4,
            ..HoughOptions::default()
        },
    ] {
        let result = detect_segments(&map, &options);
        assert!(result.segments.is_empty());
        assert_eq!(result.sampled, 0);
    }
}
