use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one named stage of a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Per-frame timing trace, stages in execution order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, recording its duration under `label`.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push(label, elapsed_ms(start));
        out
    }

    pub fn stage(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_keep_execution_order() {
        let mut timing = TimingBreakdown::default();
        let v = timing.time("first", || 41 + 1);
        timing.push("second", 2.5);
        assert_eq!(v, 42);
        let labels: Vec<_> = timing.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["first", "second"]);
        assert_eq!(timing.stage("second"), Some(2.5));
        assert_eq!(timing.stage("missing"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let mut timing = TimingBreakdown::with_total(3.0);
        timing.push("edges", 1.0);
        let json = serde_json::to_string(&timing).expect("serialize");
        assert!(json.contains("\"totalMs\":3.0"), "{json}");
        assert!(json.contains("\"elapsedMs\":1.0"), "{json}");
    }
}
