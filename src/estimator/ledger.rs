//! Per-identity position/time bookkeeping.

use std::collections::HashMap;

use crate::estimator::track_state::TrackState;

/// Most recent observation of one tracked identity.
///
/// Created on first sight of an identity, updated in place on each valid
/// subsequent observation, replaced wholesale when the history goes stale.
/// Owned and mutated exclusively by [`TrackLedger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRecord {
    /// Persistent identity assigned by the upstream tracker
    pub track_id: u64,
    /// Last known world position (x, y)
    pub position: (f64, f64),
    /// Timestamp of the last observation
    pub timestamp: f64,
    /// Lifecycle state
    pub state: TrackState,
}

impl TrackRecord {
    /// Fresh record for a first (or restarted) observation.
    pub fn new(track_id: u64, position: (f64, f64), timestamp: f64) -> Self {
        Self {
            track_id,
            position,
            timestamp,
            state: TrackState::Observed,
        }
    }
}

/// In-memory table of the latest record per tracked identity.
///
/// Holds at most one record per identity at any time; purely in-memory,
/// rebuilt fresh on every run.
#[derive(Debug, Default)]
pub struct TrackLedger {
    records: HashMap<u64, TrackRecord>,
}

impl TrackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for its identity, returning the
    /// displaced record if one existed.
    pub fn upsert(&mut self, record: TrackRecord) -> Option<TrackRecord> {
        self.records.insert(record.track_id, record)
    }

    pub fn get(&self, track_id: u64) -> Option<&TrackRecord> {
        self.records.get(&track_id)
    }

    /// Drop an identity's history entirely.
    pub fn evict(&mut self, track_id: u64) -> Option<TrackRecord> {
        self.records.remove(&track_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
