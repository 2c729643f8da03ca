//! Vehicle speed estimation from tracked detections.
//!
//! This crate consumes per-frame bounding boxes that already carry
//! persistent track identities from an external detector+tracker,
//! projects them onto a calibrated ground plane, and emits per-track
//! speed samples. Detection inference and identity assignment are not
//! performed here; see [`TrackSource`] for the collaborator seam.

pub mod estimator;
pub mod integration;

pub use estimator::{
    Calibration, CalibrationError, EstimatorConfig, FrameClock, Rect, SpeedEstimator, SpeedSample,
    TimingMode, TrackLedger, TrackRecord, TrackState,
};
pub use integration::{
    PipelineConfig, SpeedPipeline, TrackSource, TrackedDetection, TrackedDetectionBuilder,
};
