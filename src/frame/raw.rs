use crate::error::{LaneError, LaneResult};
use crate::image::{ImageView, PixelBuffer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel layouts a camera can hand over. Only [`PixelFormat::Yuv420`] is
/// processed; the others exist so a source can describe what it got.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Planar luma plus two 2×2-subsampled chroma planes. The chroma planes
    /// may be fully planar (pixel stride 1) or interleaved (pixel stride 2).
    Yuv420,
    Rgba8888,
    Jpeg,
}

/// One byte plane of a camera frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    pub data: Vec<u8>,
    /// Bytes between the starts of consecutive rows.
    pub row_stride: usize,
    /// Bytes between consecutive samples within a row.
    pub pixel_stride: usize,
}

impl Plane {
    pub fn packed(data: Vec<u8>, width: usize) -> Self {
        Self {
            data,
            row_stride: width,
            pixel_stride: 1,
        }
    }

    /// Byte offset of sample (x, y), or `None` when it falls outside `data`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> Option<usize> {
        let off = y.checked_mul(self.row_stride)? + x.checked_mul(self.pixel_stride)?;
        (off < self.data.len()).then_some(off)
    }
}

type ReleaseHook = Box<dyn FnOnce(u64) + Send>;

/// Camera frame lent to the pipeline for one processing call.
///
/// The frame carries an optional release hook that tells the producer the
/// frame's memory may be reused. The hook runs exactly once: on [`close`]
/// or, if the frame is dropped without being closed, on drop.
///
/// [`close`]: RawFrame::close
pub struct RawFrame {
    id: u64,
    width: usize,
    height: usize,
    format: PixelFormat,
    planes: [Plane; 3],
    release: Option<ReleaseHook>,
}

impl RawFrame {
    pub fn new(
        id: u64,
        width: usize,
        height: usize,
        format: PixelFormat,
        planes: [Plane; 3],
    ) -> Self {
        Self {
            id,
            width,
            height,
            format,
            planes,
            release: None,
        }
    }

    /// Attach the producer's "done" signal. Replaces any previous hook.
    pub fn with_release<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.release = Some(Box::new(hook));
        self
    }

    /// Grayscale frame with neutral chroma, tightly packed.
    pub fn from_luma(id: u64, width: usize, height: usize, luma: Vec<u8>) -> Self {
        let (cw, ch) = chroma_dims(width, height);
        Self::new(
            id,
            width,
            height,
            PixelFormat::Yuv420,
            [
                Plane::packed(luma, width),
                Plane::packed(vec![128; cw * ch], cw),
                Plane::packed(vec![128; cw * ch], cw),
            ],
        )
    }

    /// Encode a 3-channel RGB buffer into a planar I420 frame (full-range
    /// BT.601, chroma averaged over each 2×2 block).
    pub fn from_rgb(id: u64, rgb: &PixelBuffer) -> LaneResult<Self> {
        if rgb.channels() != 3 {
            return Err(LaneError::invalid_dimensions(
                rgb.width(),
                rgb.height(),
                format!("expected 3 channels, got {}", rgb.channels()),
            ));
        }
        let (w, h) = (rgb.width(), rgb.height());
        let (cw, ch) = chroma_dims(w, h);

        let mut y_plane = vec![0u8; w * h];
        for (y, row) in rgb.rows().enumerate() {
            for (x, px) in row.chunks_exact(3).enumerate() {
                let [r, g, b] = [px[0], px[1], px[2]].map(f32::from);
                y_plane[y * w + x] = clamp_u8(0.299 * r + 0.587 * g + 0.114 * b);
            }
        }

        let mut u_plane = vec![128u8; cw * ch];
        let mut v_plane = vec![128u8; cw * ch];
        for cy in 0..ch {
            for cx in 0..cw {
                let mut sum = [0.0f32; 3];
                let mut n = 0.0f32;
                for y in (2 * cy)..(2 * cy + 2).min(h) {
                    for x in (2 * cx)..(2 * cx + 2).min(w) {
                        let px = rgb.pixel(x, y);
                        sum[0] += f32::from(px[0]);
                        sum[1] += f32::from(px[1]);
                        sum[2] += f32::from(px[2]);
                        n += 1.0;
                    }
                }
                let [r, g, b] = sum.map(|s| s / n);
                u_plane[cy * cw + cx] = clamp_u8(-0.168_736 * r - 0.331_264 * g + 0.5 * b + 128.0);
                v_plane[cy * cw + cx] = clamp_u8(0.5 * r - 0.418_688 * g - 0.081_312 * b + 128.0);
            }
        }

        Ok(Self::new(
            id,
            w,
            h,
            PixelFormat::Yuv420,
            [
                Plane::packed(y_plane, w),
                Plane::packed(u_plane, cw),
                Plane::packed(v_plane, cw),
            ],
        ))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn planes(&self) -> &[Plane; 3] {
        &self.planes
    }

    pub fn luma(&self) -> &Plane {
        &self.planes[0]
    }

    /// Signal the producer that this frame is done.
    pub fn close(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(hook) = self.release.take() {
            hook(self.id);
        }
    }
}

impl Drop for RawFrame {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFrame")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("pending_release", &self.release.is_some())
            .finish()
    }
}

/// Chroma plane size for 4:2:0 subsampling (odd sizes round up).
pub fn chroma_dims(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(2), height.div_ceil(2))
}

#[inline]
pub(crate) fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted(frame: RawFrame, counter: &Arc<AtomicUsize>) -> RawFrame {
        let counter = Arc::clone(counter);
        frame.with_release(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn close_releases_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        let frame = counted(RawFrame::from_luma(1, 4, 4, vec![0; 16]), &releases);
        frame.close();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_unclosed_frame() {
        let releases = Arc::new(AtomicUsize::new(0));
        {
            let _frame = counted(RawFrame::from_luma(2, 4, 4, vec![0; 16]), &releases);
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn odd_sizes_round_chroma_up() {
        assert_eq!(chroma_dims(5, 3), (3, 2));
        let frame = RawFrame::from_luma(0, 5, 3, vec![0; 15]);
        assert_eq!(frame.planes()[1].data.len(), 6);
    }

    #[test]
    fn plane_offset_respects_strides() {
        let plane = Plane {
            data: vec![0; 10],
            row_stride: 6,
            pixel_stride: 2,
        };
        assert_eq!(plane.offset(1, 1), Some(8));
        assert_eq!(plane.offset(2, 1), None);
    }
}
