//! Probabilistic Hough transform over a binary edge map.
//!
//! Edge pixels are visited in a seeded random order. Every visited pixel adds
//! one vote to each θ bin of a (ρ, θ) accumulator. As soon as the pixel's best
//! bin reaches the vote threshold, the line through the pixel at that angle is
//! traced in both directions with 16-bit fixed-point stepping, bridging gaps of
//! up to `max_line_gap` missing pixels. Traced pixels leave the sampling pool;
//! if the traced segment is long enough it is emitted and the votes its pixels
//! cast are withdrawn, so the same line is not found twice.
use super::options::HoughOptions;
use super::segment::LineSegment;
use crate::image::EdgeMap;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

const SHIFT: u32 = 16;

// Per-pixel sampling state.
const ABSENT: u8 = 0;
const PENDING: u8 = 1;
const VOTED: u8 = 2;

/// Segments in discovery order plus sampling statistics.
#[derive(Clone, Debug, Default)]
pub struct HoughResult {
    pub segments: Vec<LineSegment>,
    /// Edge pixels that cast votes.
    pub sampled: usize,
    /// `max_samples` ran out before every edge pixel was visited.
    pub budget_exhausted: bool,
    pub elapsed_ms: f64,
}

struct Accumulator {
    num_rho: usize,
    votes: Vec<i32>,
    /// `(cos θ / ρ, sin θ / ρ)` per angle bin.
    trig: Vec<(f32, f32)>,
}

impl Accumulator {
    fn new((num_angle, num_rho): (usize, usize), options: &HoughOptions) -> Self {
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f32 * options.theta;
                (angle.cos() / options.rho, angle.sin() / options.rho)
            })
            .collect();
        Self {
            num_rho,
            votes: vec![0; num_angle * num_rho],
            trig,
        }
    }

    #[inline]
    fn rho_bin(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i64 + ((self.num_rho - 1) / 2) as i64;
        r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    /// Vote for every line through (x, y); returns the best bin's count and angle index.
    fn vote(&mut self, x: usize, y: usize) -> (i32, usize) {
        let mut best = (0, 0);
        for n in 0..self.trig.len() {
            let idx = n * self.num_rho + self.rho_bin(n, x, y);
            self.votes[idx] += 1;
            if self.votes[idx] > best.0 {
                best = (self.votes[idx], n);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            let idx = n * self.num_rho + self.rho_bin(n, x, y);
            self.votes[idx] -= 1;
        }
    }
}

/// Fixed-point walker along a line direction.
#[derive(Clone, Copy)]
struct Walk {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    /// Major axis is x: `x` is an integer column, `y` is fixed-point.
    x_major: bool,
}

impl Walk {
    fn new(x: usize, y: usize, cos_t: f32, sin_t: f32) -> Self {
        // Direction along the line is perpendicular to its normal (cos θ, sin θ).
        let a = -sin_t;
        let b = cos_t;
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x: x as i64,
                y: ((y as i64) << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x: ((x as i64) << SHIFT) + half,
                y: y as i64,
                dx: (a * one / b.abs()).round() as i64,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..self
        }
    }

    /// Current pixel, or `None` once outside `w × h`.
    fn pixel(&self, w: usize, h: usize) -> Option<(usize, usize)> {
        let (px, py) = if self.x_major {
            (self.x, self.y >> SHIFT)
        } else {
            (self.x >> SHIFT, self.y)
        };
        (px >= 0 && py >= 0 && (px as usize) < w && (py as usize) < h)
            .then_some((px as usize, py as usize))
    }

    fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}

pub(super) fn probabilistic_hough(edges: &EdgeMap, options: &HoughOptions) -> HoughResult {
    let start = Instant::now();
    let (w, h) = (edges.width(), edges.height());
    let mut result = HoughResult::default();

    let Some(shape) = options.accumulator_shape(w, h) else {
        warn!(
            "Hough options rejected (rho={}, theta={}), returning no segments",
            options.rho, options.theta
        );
        return result;
    };

    let mut points = edges.edge_points();
    if points.is_empty() {
        result.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        return result;
    }

    let mut state = vec![ABSENT; w * h];
    for &(x, y) in &points {
        state[y * w + x] = PENDING;
    }
    let mut rng = StdRng::seed_from_u64(options.seed);
    points.shuffle(&mut rng);

    let mut acc = Accumulator::new(shape, options);
    let threshold = options.threshold as i32;
    let min_len_sq = options.min_line_length * options.min_line_length;

    for &(x, y) in &points {
        if state[y * w + x] != PENDING {
            continue;
        }
        if options.max_samples.is_some_and(|budget| result.sampled >= budget) {
            result.budget_exhausted = true;
            break;
        }
        result.sampled += 1;
        state[y * w + x] = VOTED;

        let (max_val, max_n) = acc.vote(x, y);
        if max_val < threshold {
            continue;
        }

        let (cos_t, sin_t) = acc.trig[max_n];
        let origin = Walk::new(x, y, cos_t, sin_t);
        let walks = [origin, origin.reversed()];

        let mut ends = [(x, y); 2];
        for (end, walk) in ends.iter_mut().zip(walks) {
            let mut walk = walk;
            let mut gap = 0usize;
            while let Some((px, py)) = walk.pixel(w, h) {
                if state[py * w + px] != ABSENT {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap as f32 > options.max_line_gap {
                        break;
                    }
                }
                walk.advance();
            }
        }

        let dx = ends[1].0 as f32 - ends[0].0 as f32;
        let dy = ends[1].1 as f32 - ends[0].1 as f32;
        let good_line = dx * dx + dy * dy >= min_len_sq;

        for (end, walk) in ends.iter().zip(walks) {
            let mut walk = walk;
            while let Some((px, py)) = walk.pixel(w, h) {
                let idx = py * w + px;
                if good_line && state[idx] == VOTED {
                    acc.unvote(px, py);
                }
                state[idx] = ABSENT;
                if (px, py) == *end {
                    break;
                }
                walk.advance();
            }
        }

        if good_line {
            result.segments.push(LineSegment::new(
                ends[0].0 as i32,
                ends[0].1 as i32,
                ends[1].0 as i32,
                ends[1].1 as i32,
            ));
        }
    }

    result.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "Hough: {} edge pixels, {} sampled, {} segments{} in {:.2} ms",
        points.len(),
        result.sampled,
        result.segments.len(),
        if result.budget_exhausted {
            " (budget exhausted)"
        } else {
            ""
        },
        result.elapsed_ms
    );
    result
}
