//! Owned 8-bit pixel buffers: 1-channel intensity, 3-channel RGB, and the
//! binary [`EdgeMap`] produced by the edge stage.
use super::traits::{ImageView, ImageViewMut};
use crate::error::{LaneError, LaneResult};

/// Dense row-major 8-bit image with interleaved channels.
///
/// Invariant: `stride >= width * channels` and `data.len() == stride * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled (black) buffer with tightly packed rows.
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        let stride = width * channels;
        Self {
            width,
            height,
            channels,
            stride,
            data: vec![0; stride * height],
        }
    }

    pub fn gray(width: usize, height: usize) -> Self {
        Self::new(width, height, 1)
    }

    pub fn rgb(width: usize, height: usize) -> Self {
        Self::new(width, height, 3)
    }

    /// Adopt tightly packed bytes.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> LaneResult<Self> {
        if channels == 0 {
            return Err(LaneError::invalid_dimensions(width, height, "zero channels"));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(LaneError::invalid_dimensions(
                width,
                height,
                format!("expected {expected} bytes, got {}", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            stride: width * channels,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = y * self.stride + x * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let start = y * self.stride + x * self.channels;
        &mut self.data[start..start + self.channels]
    }

    /// Whole backing store including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl ImageView for PixelBuffer {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * self.channels]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        self.is_contiguous().then_some(&self.data[..])
    }
}

impl ImageViewMut for PixelBuffer {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.width * self.channels;
        &mut self.data[start..end]
    }
}

/// Binary edge image: every sample is either [`EdgeMap::OFF`] or [`EdgeMap::ON`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    buffer: PixelBuffer,
}

impl EdgeMap {
    pub const OFF: u8 = 0;
    pub const ON: u8 = 255;

    /// Empty map (no edges).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: PixelBuffer::gray(width, height),
        }
    }

    /// Build from arbitrary 1-channel bytes; any non-zero sample becomes an edge.
    pub fn from_mask(width: usize, height: usize, mask: &[u8]) -> LaneResult<Self> {
        let data = mask
            .iter()
            .map(|&v| if v != 0 { Self::ON } else { Self::OFF })
            .collect();
        let buffer = PixelBuffer::from_raw(width, height, 1, data)?;
        Ok(Self { buffer })
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.buffer.data[y * self.buffer.stride + x] != Self::OFF
    }

    #[inline]
    pub fn set_edge(&mut self, x: usize, y: usize) {
        let idx = y * self.buffer.stride + x;
        self.buffer.data[idx] = Self::ON;
    }

    pub fn edge_count(&self) -> usize {
        self.buffer
            .rows()
            .map(|row| row.iter().filter(|&&v| v != Self::OFF).count())
            .sum()
    }

    /// Coordinates of every edge pixel in raster order.
    pub fn edge_points(&self) -> Vec<(usize, usize)> {
        let mut points = Vec::new();
        for (y, row) in self.buffer.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != Self::OFF {
                    points.push((x, y));
                }
            }
        }
        points
    }

    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_rows_span_all_channels() {
        let mut buf = PixelBuffer::rgb(4, 2);
        buf.pixel_mut(3, 1).copy_from_slice(&[1, 2, 3]);
        assert_eq!(buf.row(1).len(), 12);
        assert_eq!(&buf.row(1)[9..], &[1, 2, 3]);
        assert!(buf.stride() >= buf.width() * buf.channels());
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 11]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, 0, vec![]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 12]).is_ok());
    }

    #[test]
    fn edge_map_is_binary() {
        let map = EdgeMap::from_mask(3, 1, &[0, 7, 255]).expect("valid mask");
        assert_eq!(map.as_buffer().as_bytes(), &[0, 255, 255]);
        assert_eq!(map.edge_count(), 2);
        assert_eq!(map.edge_points(), vec![(1, 0), (2, 0)]);
    }
}
