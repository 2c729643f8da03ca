//! Integration module for connecting detector+tracker collaborators with
//! the speed estimator.
//!
//! This module provides the seams for feeding externally tracked
//! detections (ByteTrack, DeepSORT, etc.) into the speed-estimation core.

mod builder;
mod pipeline;
mod source;

pub use builder::TrackedDetectionBuilder;
pub use pipeline::{PipelineConfig, SpeedPipeline};
pub use source::{TrackSource, TrackedDetection};
