//! SpeedPipeline for combining tracked detections with speed estimation.

use crate::estimator::{Calibration, EstimatorConfig, FrameClock, SpeedEstimator, SpeedSample};

use super::{TrackSource, TrackedDetection};

/// Detection filtering applied before speed estimation.
///
/// Defaults accept everything, matching sources that already filter
/// upstream.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Class ids to keep; empty accepts every class
    pub class_allowlist: Vec<u32>,
    /// Minimum confidence score; detections below are ignored
    pub min_score: f32,
}

/// End-to-end speed estimation over a stream of tracked detections.
///
/// Per frame: ticks the clock, filters detections, projects each box
/// center onto the ground plane, and feeds the estimator. Processing is
/// single-threaded and synchronous; one frame is fully applied before the
/// next is considered.
pub struct SpeedPipeline<S: TrackSource> {
    source: S,
    calibration: Calibration,
    clock: FrameClock,
    estimator: SpeedEstimator,
    config: PipelineConfig,
}

impl<S: TrackSource> SpeedPipeline<S> {
    /// Create a new pipeline with the given estimator and filter configs.
    pub fn new(
        source: S,
        calibration: Calibration,
        clock: FrameClock,
        estimator_config: EstimatorConfig,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            calibration,
            clock,
            estimator: SpeedEstimator::new(estimator_config),
            config,
        }
    }

    /// Create a new pipeline with default estimator and filter configs.
    pub fn with_default_config(source: S, calibration: Calibration, clock: FrameClock) -> Self {
        Self::new(
            source,
            calibration,
            clock,
            EstimatorConfig::default(),
            PipelineConfig::default(),
        )
    }

    fn accepts(&self, det: &TrackedDetection) -> bool {
        if det.score < self.config.min_score {
            return false;
        }
        self.config.class_allowlist.is_empty()
            || self.config.class_allowlist.contains(&det.class_id)
    }

    /// Process one frame's detections and return the speed samples it
    /// produced. Ticks the frame clock even when the frame is empty.
    pub fn process_frame(&mut self, detections: &[TrackedDetection]) -> Vec<SpeedSample> {
        let timestamp = self.clock.tick();

        let mut samples = Vec::new();
        for det in detections {
            if !self.accepts(det) {
                continue;
            }
            let (cx, cy) = det.bbox.center();
            let world = self.calibration.pixel_to_world(cx as f64, cy as f64);
            if let Some(sample) = self.estimator.observe(det.track_id, world, timestamp) {
                samples.push(sample);
            }
        }
        samples
    }

    /// Pull one frame from the source and process it.
    ///
    /// Returns `Ok(None)` once the source reports end of stream.
    pub fn process_next(&mut self) -> Result<Option<Vec<SpeedSample>>, S::Error> {
        match self.source.next_frame()? {
            Some(detections) => Ok(Some(self.process_frame(&detections))),
            None => Ok(None),
        }
    }

    /// Drain the source, delivering every speed sample to `sink`.
    ///
    /// Returns the number of frames processed.
    pub fn run<F>(&mut self, mut sink: F) -> Result<u64, S::Error>
    where
        F: FnMut(SpeedSample),
    {
        let mut frames = 0;
        while let Some(samples) = self.process_next()? {
            frames += 1;
            for sample in samples {
                sink(sample);
            }
        }
        Ok(frames)
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying estimator.
    pub fn estimator(&self) -> &SpeedEstimator {
        &self.estimator
    }

    /// Get a mutable reference to the underlying estimator.
    pub fn estimator_mut(&mut self) -> &mut SpeedEstimator {
        &mut self.estimator
    }

    /// Get a reference to the frame clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Get a reference to the calibration.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
}
