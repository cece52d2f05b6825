//! Per-frame error kinds reported by the analysis stages.
//!
//! Every variant is local to a single frame: the controller logs it, releases
//! the frame and moves on to the next one.
use crate::frame::PixelFormat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    /// The frame is not in the planar luma/chroma layout the adapter expects.
    #[error("unsupported frame format {format:?}, expected planar YUV 4:2:0")]
    UnsupportedFormat { format: PixelFormat },
    /// Zero or inconsistent geometry (plane sizes, strides, channel count).
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: String,
    },
    /// The Hough sampling budget ran out; the segments found so far are kept.
    #[error("segment detector stopped after {sampled} samples (budget exhausted)")]
    DetectorTimeout { sampled: usize },
}

impl LaneError {
    pub(crate) fn invalid_dimensions(
        width: usize,
        height: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

pub type LaneResult<T> = Result<T, LaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = LaneError::UnsupportedFormat {
            format: PixelFormat::Jpeg,
        };
        assert!(err.to_string().contains("Jpeg"), "got {err}");

        let err = LaneError::invalid_dimensions(0, 720, "width is zero");
        assert_eq!(err.to_string(), "invalid dimensions 0x720: width is zero");

        let err = LaneError::DetectorTimeout { sampled: 42 };
        assert!(err.to_string().contains("42"), "got {err}");
    }
}
