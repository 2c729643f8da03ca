//! Trait for external detector+tracker collaborators.

use crate::estimator::Rect;

/// One tracked detection delivered by the upstream detector+tracker.
///
/// Supplied once per frame per object and not retained beyond that frame;
/// the core consumes only the identity and the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedDetection {
    /// Persistent identity assigned by the upstream tracker
    pub track_id: u64,
    /// Bounding box in pixel space
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Class label index
    pub class_id: u32,
}

impl TrackedDetection {
    pub fn new(track_id: u64, x1: f32, y1: f32, x2: f32, y2: f32, score: f32, class_id: u32) -> Self {
        Self {
            track_id,
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
            class_id,
        }
    }
}

/// Trait for per-frame sources of tracked detections.
///
/// Implement this to connect any detector+tracker stack to the speed
/// pipeline. The source owns frame acquisition, inference, and identity
/// assignment; the pipeline only reacts to "frame available" /
/// "stream ended".
///
/// Caveat: if the upstream tracker reassigns a numeric identity to a
/// physically different object, the estimator cannot detect it and will
/// compute a speed between the two objects whenever the gap is within the
/// stale threshold.
///
/// # Example
///
/// ```ignore
/// use speedtrack_rs::{TrackSource, TrackedDetection};
///
/// struct MyTracker {
///     // Your detector+tracker here
/// }
///
/// impl TrackSource for MyTracker {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Vec<TrackedDetection>>, Self::Error> {
///         // Decode a frame, run inference and association
///         Ok(Some(vec![]))
///     }
/// }
/// ```
pub trait TrackSource {
    /// Error type for acquisition or inference failures.
    type Error;

    /// Produce the tracked detections for the next frame.
    ///
    /// Returns `Ok(None)` when the stream has ended. A frame with no
    /// detections is `Ok(Some(vec![]))`, not `Ok(None)`.
    fn next_frame(&mut self) -> Result<Option<Vec<TrackedDetection>>, Self::Error>;
}
