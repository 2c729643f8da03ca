//! Speed computation and stale-track eviction.

use crate::estimator::ledger::{TrackLedger, TrackRecord};
use crate::estimator::track_state::TrackState;

/// Configuration for the speed estimator.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Maximum gap (in clock time units) between two observations of the
    /// same identity before its history is discarded and restarted.
    pub stale_gap: f64,
    /// Multiplier from world-units-per-time-unit to the reported unit.
    /// The default converts m/s to km/h.
    pub unit_conversion: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            stale_gap: 1.0,
            unit_conversion: 3.6,
        }
    }
}

/// Speed event for one track at one frame. Ephemeral, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSample {
    pub track_id: u64,
    pub speed: f64,
    pub timestamp: f64,
}

/// Converts per-identity observation pairs into speed samples.
///
/// Owns the [`TrackLedger`]; all history mutation flows through
/// [`observe`](Self::observe), which must be called in timestamp order for
/// any given identity.
#[derive(Debug, Default)]
pub struct SpeedEstimator {
    config: EstimatorConfig,
    ledger: TrackLedger,
}

impl SpeedEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            ledger: TrackLedger::new(),
        }
    }

    /// Record a world-space observation of one identity and compute its
    /// speed when the history supports it.
    ///
    /// - First sight of the identity: history starts, no sample.
    /// - `delta_time <= 0` (duplicate or out-of-order frame): history left
    ///   untouched, no sample; replaying an observation is a no-op.
    /// - `delta_time` within the stale gap: sample emitted, history updated.
    /// - `delta_time` beyond the stale gap: history restarts from this
    ///   observation, no sample. A long gap (occlusion, ambiguous
    ///   re-identification) would otherwise yield implausible speed spikes.
    pub fn observe(
        &mut self,
        track_id: u64,
        position: (f64, f64),
        timestamp: f64,
    ) -> Option<SpeedSample> {
        let Some(prev) = self.ledger.get(track_id).copied() else {
            self.ledger
                .upsert(TrackRecord::new(track_id, position, timestamp));
            return None;
        };

        let delta_time = timestamp - prev.timestamp;

        if delta_time <= 0.0 {
            return None;
        }

        if delta_time > self.config.stale_gap {
            // Broken history: treat the identity as newly seen.
            self.ledger
                .upsert(TrackRecord::new(track_id, position, timestamp));
            return None;
        }

        let (px, py) = prev.position;
        let (x, y) = position;
        let distance = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
        let speed = distance / delta_time * self.config.unit_conversion;

        self.ledger.upsert(TrackRecord {
            track_id,
            position,
            timestamp,
            state: TrackState::Tracking,
        });

        Some(SpeedSample {
            track_id,
            speed,
            timestamp,
        })
    }

    /// Drop an identity's history (e.g. when the upstream tracker reports
    /// the track as removed).
    pub fn evict(&mut self, track_id: u64) -> Option<TrackRecord> {
        self.ledger.evict(track_id)
    }

    pub fn ledger(&self) -> &TrackLedger {
        &self.ledger
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_emits_nothing() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        assert!(est.observe(1, (0.0, 0.0), 0.0).is_none());

        let record = est.ledger().get(1).unwrap();
        assert_eq!(record.state, TrackState::Observed);
        assert_eq!(record.position, (0.0, 0.0));
    }

    #[test]
    fn test_speed_formula() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 0.0);

        // 8.7 m in 1/3 s -> 26.1 m/s -> 93.96 km/h.
        let sample = est.observe(1, (8.7, 0.0), 10.0 / 30.0).unwrap();
        assert!((sample.speed - 93.96).abs() < 1e-9, "speed {}", sample.speed);
        assert_eq!(sample.track_id, 1);
        assert_eq!(est.ledger().get(1).unwrap().state, TrackState::Tracking);
    }

    #[test]
    fn test_duplicate_timestamp_is_noop() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 1.0);

        assert!(est.observe(1, (5.0, 5.0), 1.0).is_none());
        assert!(est.observe(1, (5.0, 5.0), 1.0).is_none());

        // Ledger still reflects the first observation only.
        let record = est.ledger().get(1).unwrap();
        assert_eq!(record.position, (0.0, 0.0));
        assert_eq!(record.timestamp, 1.0);
        assert_eq!(record.state, TrackState::Observed);
    }

    #[test]
    fn test_out_of_order_timestamp_is_noop() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 1.0);

        assert!(est.observe(1, (5.0, 5.0), 0.5).is_none());
        assert_eq!(est.ledger().get(1).unwrap().timestamp, 1.0);
    }

    #[test]
    fn test_stale_gap_resets_history() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 0.0);
        est.observe(1, (8.7, 0.0), 1.0 / 3.0).unwrap();

        // Gap of 1.667 s > 1.0 s threshold: no sample, history restarts.
        assert!(est.observe(1, (20.0, 0.0), 2.0).is_none());
        let record = est.ledger().get(1).unwrap();
        assert_eq!(record.position, (20.0, 0.0));
        assert_eq!(record.timestamp, 2.0);
        assert_eq!(record.state, TrackState::Observed);

        // The next in-threshold observation behaves like a second sighting.
        let sample = est.observe(1, (21.0, 0.0), 2.1).unwrap();
        assert!((sample.speed - 1.0 / 0.1 * 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_gap_equal_to_threshold_still_tracks() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 0.0);

        let sample = est.observe(1, (10.0, 0.0), 1.0).unwrap();
        assert!((sample.speed - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_identities_are_independent() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 0.0);
        assert!(est.observe(2, (100.0, 100.0), 0.1).is_none());

        let sample = est.observe(1, (1.0, 0.0), 0.2).unwrap();
        assert!((sample.speed - 1.0 / 0.2 * 3.6).abs() < 1e-9);
        assert_eq!(est.ledger().len(), 2);
    }

    #[test]
    fn test_custom_unit_conversion() {
        let mut est = SpeedEstimator::new(EstimatorConfig {
            stale_gap: 1.0,
            unit_conversion: 1.0,
        });
        est.observe(1, (0.0, 0.0), 0.0);

        // Raw world units per time unit.
        let sample = est.observe(1, (3.0, 4.0), 0.5).unwrap();
        assert!((sample.speed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_evict_forgets_history() {
        let mut est = SpeedEstimator::new(EstimatorConfig::default());
        est.observe(1, (0.0, 0.0), 0.0);
        est.evict(1);

        assert!(est.observe(1, (5.0, 0.0), 0.1).is_none());
    }
}
