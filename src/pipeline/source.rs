use crate::frame::RawFrame;
use crate::types::FrameGeometry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Produces camera frames, one at a time. `None` ends the stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<RawFrame>;
}

/// Road-like test pattern: two bright lane stripes converging towards the
/// horizon on a dark background, swaying slowly from frame to frame.
///
/// Every frame carries a release hook that bumps a shared counter, so callers
/// can check that each frame was handed back.
#[derive(Debug)]
pub struct SyntheticStripeSource {
    geometry: FrameGeometry,
    stripe_width: usize,
    limit: Option<u64>,
    next_id: u64,
    released: Arc<AtomicU64>,
}

impl SyntheticStripeSource {
    pub fn new(geometry: FrameGeometry) -> Self {
        Self {
            geometry,
            stripe_width: 4,
            limit: None,
            next_id: 0,
            released: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Stop after `frames` frames.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    pub fn released_counter(&self) -> Arc<AtomicU64> {
        self.released.clone()
    }

    pub fn produced(&self) -> u64 {
        self.next_id
    }

    /// Luma plane for frame `id`.
    pub fn render_luma(&self, id: u64) -> Vec<u8> {
        let FrameGeometry { width, height } = self.geometry;
        let mut luma = vec![16u8; width * height];
        if width == 0 || height == 0 {
            return luma;
        }
        let sway = (id as f32 * 0.15).sin() * width as f32 * 0.02;
        let horizon = height as f32 * 0.6;
        let bottom = (height - 1) as f32;
        let w = width as f32;
        let lanes = [
            (w * 0.15 + sway, w * 0.45 + sway * 0.3),
            (w * 0.85 + sway, w * 0.55 + sway * 0.3),
        ];
        let half = self.stripe_width as f32 / 2.0;
        for y in (horizon.ceil() as usize)..height {
            let t = (bottom - y as f32) / (bottom - horizon).max(1.0);
            let row = &mut luma[y * width..(y + 1) * width];
            for &(x_bottom, x_horizon) in &lanes {
                let center = x_bottom + t * (x_horizon - x_bottom);
                let x0 = (center - half).round().max(0.0) as usize;
                let x1 = ((center + half).round().max(0.0) as usize).min(width);
                for v in row.iter_mut().take(x1).skip(x0) {
                    *v = 235;
                }
            }
        }
        luma
    }
}

impl FrameSource for SyntheticStripeSource {
    fn next_frame(&mut self) -> Option<RawFrame> {
        if self.limit.is_some_and(|limit| self.next_id >= limit) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        let FrameGeometry { width, height } = self.geometry;
        let released = self.released.clone();
        let frame = RawFrame::from_luma(id, width, height, self.render_luma(id))
            .with_release(move |_| {
                released.fetch_add(1, Ordering::SeqCst);
            });
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_honours_limit_and_counts_releases() {
        let mut source = SyntheticStripeSource::new(FrameGeometry::new(64, 48)).with_limit(2);
        let released = source.released_counter();
        let a = source.next_frame().expect("first frame");
        let b = source.next_frame().expect("second frame");
        assert!(source.next_frame().is_none());
        assert_eq!((a.id(), b.id()), (0, 1));
        a.close();
        drop(b);
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stripes_are_below_the_horizon() {
        let source = SyntheticStripeSource::new(FrameGeometry::new(200, 100));
        let luma = source.render_luma(0);
        assert!(luma[..60 * 200].iter().all(|&v| v == 16));
        let bottom = &luma[99 * 200..];
        assert!(bottom.iter().filter(|&&v| v == 235).count() >= 6);
    }
}
