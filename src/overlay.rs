//! Lane overlay renderer: draws segments onto a caller-owned color buffer.
//!
//! Segments are clipped against the buffer (grown by the pen radius) before
//! rasterization, so endpoints far outside the image cost nothing and never
//! touch memory outside the buffer. Drawing is unconditional; choosing which
//! segments count as lane markings happens upstream in [`crate::lanes`].
use crate::image::PixelBuffer;
use crate::segments::LineSegment;
use serde::{Deserialize, Serialize};

pub const LANE_GREEN: [u8; 3] = [0, 255, 0];

/// Widest pen ever used, whatever the requested thickness.
const MAX_THICKNESS: u32 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// RGB pen color.
    pub color: [u8; 3],
    /// Pen width in pixels.
    pub thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: LANE_GREEN,
            thickness: 2,
        }
    }
}

/// Draw every segment as a solid line of the given color and thickness.
///
/// On buffers with fewer than three channels the leading color components are
/// used. Thickness is capped at the larger buffer side (and at 255 px).
pub fn draw_segments(
    buffer: &mut PixelBuffer,
    segments: &[LineSegment],
    color: [u8; 3],
    thickness: u32,
) {
    if buffer.is_empty() {
        return;
    }
    let widest = buffer.width().max(buffer.height()).min(MAX_THICKNESS as usize) as u32;
    let pen = Pen::new(thickness.min(widest));
    for seg in segments {
        draw_line(buffer, seg, color, &pen);
    }
}

pub fn draw_overlay(buffer: &mut PixelBuffer, segments: &[LineSegment], style: &OverlayStyle) {
    draw_segments(buffer, segments, style.color, style.thickness);
}

/// Disk-shaped stamp, precomputed as pixel offsets.
struct Pen {
    radius: f32,
    offsets: Vec<(i64, i64)>,
}

impl Pen {
    fn new(thickness: u32) -> Self {
        let radius = thickness.max(1) as f32 / 2.0;
        if thickness <= 1 {
            return Self {
                radius,
                offsets: vec![(0, 0)],
            };
        }
        let reach = radius.ceil() as i64;
        let mut offsets = Vec::new();
        for oy in -reach..=reach {
            for ox in -reach..=reach {
                if ((ox * ox + oy * oy) as f32) <= radius * radius {
                    offsets.push((ox, oy));
                }
            }
        }
        Self { radius, offsets }
    }
}

fn draw_line(buffer: &mut PixelBuffer, seg: &LineSegment, color: [u8; 3], pen: &Pen) {
    let margin = pen.radius.ceil();
    let bounds = [
        -margin,
        -margin,
        (buffer.width() - 1) as f32 + margin,
        (buffer.height() - 1) as f32 + margin,
    ];
    let p0 = [seg.p0[0] as f32, seg.p0[1] as f32];
    let p1 = [seg.p1[0] as f32, seg.p1[1] as f32];
    let Some((a, b)) = clip_segment(p0, p1, bounds) else {
        return;
    };

    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (a[0] + t * dx).round() as i64;
        let y = (a[1] + t * dy).round() as i64;
        stamp(buffer, x, y, color, pen);
    }
}

fn stamp(buffer: &mut PixelBuffer, x: i64, y: i64, color: [u8; 3], pen: &Pen) {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    for &(ox, oy) in &pen.offsets {
        let (px, py) = (x + ox, y + oy);
        if px < 0 || py < 0 || px >= w || py >= h {
            continue;
        }
        let pixel = buffer.pixel_mut(px as usize, py as usize);
        for (c, v) in pixel.iter_mut().enumerate() {
            *v = color[c.min(2)];
        }
    }
}

/// Liang–Barsky clipping against `[xmin, ymin, xmax, ymax]`.
fn clip_segment(p0: [f32; 2], p1: [f32; 2], bounds: [f32; 4]) -> Option<([f32; 2], [f32; 2])> {
    let [xmin, ymin, xmax, ymax] = bounds;
    let dx = p1[0] - p0[0];
    let dy = p1[1] - p0[1];
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-dx, p0[0] - xmin),
        (dx, xmax - p0[0]),
        (-dy, p0[1] - ymin),
        (dy, ymax - p0[1]),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        [p0[0] + t0 * dx, p0[1] + t0 * dy],
        [p0[0] + t1 * dx, p0[1] + t1 * dy],
    ))
}
