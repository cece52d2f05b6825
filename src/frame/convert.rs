//! RawFrame → PixelBuffer conversion.
//!
//! The intensity path copies the luma plane and never reads chroma. The color
//! path converts full-range BT.601 YUV to RGB, looking chroma up at
//! `(x / 2, y / 2)`. Rows are converted in parallel; each output row depends
//! only on its own source rows, so the result does not depend on scheduling.
use super::raw::{chroma_dims, clamp_u8, PixelFormat, Plane, RawFrame};
use crate::error::{LaneError, LaneResult};
use crate::image::{ImageU8, ImageView, ImageViewMut, PixelBuffer};
use rayon::prelude::*;

/// Copy the luma plane into a tightly packed 1-channel buffer.
pub fn to_intensity_buffer(frame: &RawFrame) -> LaneResult<PixelBuffer> {
    let luma = luma_view(frame)?;
    let mut out = PixelBuffer::gray(frame.width(), frame.height());
    for (y, src) in luma.rows().enumerate() {
        out.row_mut(y).copy_from_slice(src);
    }
    Ok(out)
}

/// Convert the frame to a 3-channel RGB buffer.
pub fn to_color_buffer(frame: &RawFrame) -> LaneResult<PixelBuffer> {
    let luma = luma_view(frame)?;
    let (w, h) = (frame.width(), frame.height());
    let [_, u_plane, v_plane] = frame.planes();
    check_chroma_plane(u_plane, w, h, "U")?;
    check_chroma_plane(v_plane, w, h, "V")?;

    let mut out = PixelBuffer::rgb(w, h);
    let stride = out.stride();
    out.as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, dst)| {
            let src = luma.row(y);
            let cy = y / 2;
            for (x, px) in dst[..w * 3].chunks_exact_mut(3).enumerate() {
                let cx = x / 2;
                let u = f32::from(chroma_sample(u_plane, cx, cy)) - 128.0;
                let v = f32::from(chroma_sample(v_plane, cx, cy)) - 128.0;
                let yv = f32::from(src[x]);
                px[0] = clamp_u8(yv + 1.402 * v);
                px[1] = clamp_u8(yv - 0.344_136 * u - 0.714_136 * v);
                px[2] = clamp_u8(yv + 1.772 * u);
            }
        });
    Ok(out)
}

fn luma_view(frame: &RawFrame) -> LaneResult<ImageU8<'_>> {
    if frame.format() != PixelFormat::Yuv420 {
        return Err(LaneError::UnsupportedFormat {
            format: frame.format(),
        });
    }
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return Err(LaneError::invalid_dimensions(w, h, "frame has zero area"));
    }
    let luma = frame.luma();
    if luma.pixel_stride != 1 {
        return Err(LaneError::invalid_dimensions(
            w,
            h,
            format!("luma pixel stride {} (expected 1)", luma.pixel_stride),
        ));
    }
    ImageU8::try_new(w, h, luma.row_stride, &luma.data).ok_or_else(|| {
        LaneError::invalid_dimensions(
            w,
            h,
            format!(
                "luma plane of {} bytes with row stride {} is too small",
                luma.data.len(),
                luma.row_stride
            ),
        )
    })
}

fn check_chroma_plane(plane: &Plane, width: usize, height: usize, name: &str) -> LaneResult<()> {
    let (cw, ch) = chroma_dims(width, height);
    if plane.pixel_stride == 0 || plane.row_stride < (cw - 1) * plane.pixel_stride + 1 {
        return Err(LaneError::invalid_dimensions(
            width,
            height,
            format!(
                "{name} plane strides row={} pixel={} cannot hold {cw} samples",
                plane.row_stride, plane.pixel_stride
            ),
        ));
    }
    if plane.offset(cw - 1, ch - 1).is_none() {
        return Err(LaneError::invalid_dimensions(
            width,
            height,
            format!("{name} plane of {} bytes is too small for {cw}x{ch}", plane.data.len()),
        ));
    }
    Ok(())
}

#[inline]
fn chroma_sample(plane: &Plane, cx: usize, cy: usize) -> u8 {
    plane.data[cy * plane.row_stride + cx * plane.pixel_stride]
}
