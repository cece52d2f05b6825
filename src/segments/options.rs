use serde::{Deserialize, Serialize};

/// Upper bound on (ρ, θ) accumulator cells.
const MAX_ACCUMULATOR_BINS: f64 = (1u64 << 24) as f64;

/// Parameters of the probabilistic Hough transform.
///
/// - `rho`: distance resolution of the accumulator in pixels.
/// - `theta`: angle resolution in radians.
/// - `threshold`: votes a bin needs before a line is traced.
/// - `min_line_length`: shortest accepted segment (Euclidean, pixels).
/// - `max_line_gap`: longest run of missing edge pixels bridged while tracing.
/// - `max_samples`: optional cap on visited edge pixels; `None` visits all.
/// - `seed`: RNG seed for the sampling order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    pub rho: f32,
    pub theta: f32,
    pub threshold: u32,
    pub min_line_length: f32,
    pub max_line_gap: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_samples: Option<usize>,
    pub seed: u64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f32::consts::PI / 180.0,
            threshold: 50,
            min_line_length: 50.0,
            max_line_gap: 10.0,
            max_samples: None,
            seed: 0x1A4E,
        }
    }
}

impl HoughOptions {
    pub fn new(
        rho: f32,
        theta: f32,
        threshold: u32,
        min_line_length: f32,
        max_line_gap: f32,
    ) -> Self {
        Self {
            rho,
            theta,
            threshold,
            min_line_length,
            max_line_gap,
            ..Self::default()
        }
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Accumulator size `(angle bins, rho bins)` for a `width × height` map,
    /// or `None` when the resolutions are unusable or the table would be huge.
    pub(crate) fn accumulator_shape(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.rho) || !usable(self.theta) {
            return None;
        }
        let num_angle = (std::f64::consts::PI / f64::from(self.theta)).round().max(1.0);
        let num_rho = (((width + height) * 2 + 1) as f64 / f64::from(self.rho))
            .round()
            .max(1.0);
        (num_angle * num_rho <= MAX_ACCUMULATOR_BINS)
            .then_some((num_angle as usize, num_rho as usize))
    }
}
