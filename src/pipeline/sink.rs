use crate::image::io::save_pixel_buffer;
use crate::image::PixelBuffer;
use crate::segments::LineSegment;
use log::warn;
use std::path::PathBuf;

/// Receives each finished overlay frame. The buffer is only borrowed for the
/// duration of the call.
pub trait DisplaySink: Send {
    fn present(&mut self, frame: &PixelBuffer, segments: &[LineSegment]);
}

impl<F> DisplaySink for F
where
    F: FnMut(&PixelBuffer, &[LineSegment]) + Send,
{
    fn present(&mut self, frame: &PixelBuffer, segments: &[LineSegment]) {
        self(frame, segments)
    }
}

/// Writes every `every`-th presented frame as `<prefix>_<n>.png` into a
/// directory.
#[derive(Debug)]
pub struct PngSink {
    dir: PathBuf,
    prefix: String,
    every: usize,
    presented: usize,
    written: Vec<PathBuf>,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame".to_string(),
            every: 1,
            presented: 0,
            written: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySink for PngSink {
    fn present(&mut self, frame: &PixelBuffer, _segments: &[LineSegment]) {
        let n = self.presented;
        self.presented += 1;
        if n % self.every != 0 {
            return;
        }
        let path = self.dir.join(format!("{}_{n:05}.png", self.prefix));
        match save_pixel_buffer(frame, &path) {
            Ok(()) => self.written.push(path),
            Err(err) => warn!("{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_sink_writes_numbered_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = PngSink::new(dir.path()).with_prefix("lane").with_every(2);
        let frame = PixelBuffer::rgb(4, 3);
        for _ in 0..3 {
            sink.present(&frame, &[]);
        }
        let names: Vec<_> = sink
            .written()
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_owned))
            .collect();
        assert_eq!(names, ["lane_00000.png", "lane_00002.png"]);
        assert!(sink.written().iter().all(|p| p.exists()));
    }
}
