//! Two-threshold edge linking.
//!
//! Pixels with suppressed magnitude `>= high` seed edges; pixels `>= low` are
//! promoted when they are 8-connected, possibly through other promoted pixels,
//! to a seed. Everything else stays off.
use crate::image::{EdgeMap, ImageF32, ImageView};

pub fn hysteresis(thin: &ImageF32, low: f32, high: f32) -> EdgeMap {
    let (w, h) = (thin.w, thin.h);
    let mut edges = EdgeMap::new(w, h);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    let is_candidate = |m: f32, t: f32| m > 0.0 && m >= t;

    for y in 0..h {
        for (x, &m) in thin.row(y).iter().enumerate() {
            if is_candidate(m, high) && !edges.is_edge(x, y) {
                edges.set_edge(x, y);
                stack.push((x, y));
            }
            while let Some((cx, cy)) = stack.pop() {
                for ny in cy.saturating_sub(1)..=(cy + 1).min(h - 1) {
                    for nx in cx.saturating_sub(1)..=(cx + 1).min(w - 1) {
                        if !edges.is_edge(nx, ny) && is_candidate(thin.get(nx, ny), low) {
                            edges.set_edge(nx, ny);
                            stack.push((nx, ny));
                        }
                    }
                }
            }
        }
    }

    edges
}
