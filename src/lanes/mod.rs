//! Lane-level interpretation of detected segments.
//!
//! [`policy`] decides which segments of a single frame are drawn; it plugs
//! into the pipeline controller. [`tracker`] is an optional layer on top that
//! smooths lane estimates across frames and is driven by the caller.

pub mod policy;
pub mod tracker;

pub use policy::{AcceptAll, LanePolicy, SlopeRoiPolicy};
pub use tracker::{LaneLine, LaneTracker, TrackedLanes, TrackerOptions};
