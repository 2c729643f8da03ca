//! Frame timestamping for speed computation.

use std::time::Instant;

/// Frame rate substituted when the source cannot report a valid one.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// How frame timestamps are derived.
///
/// The mode is a configuration choice, never inferred: fixed-interval
/// timing silently desynchronizes from real elapsed time if a live source
/// drops frames, so wall-clock is the safer pick for live streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingMode {
    /// `timestamp = frame_index / rate`; for seekable sources with a
    /// known, stable rate.
    FixedInterval,
    /// Monotonic arrival time; for live sources with an unreliable rate.
    WallClock,
}

/// Assigns each frame a timestamp, non-decreasing within one run.
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: TimingMode,
    frame_interval: f64,
    frame_index: u64,
    started: Instant,
    last_timestamp: f64,
}

impl FrameClock {
    /// Fixed-interval clock at the given frame rate.
    ///
    /// A non-finite or non-positive rate is substituted with
    /// [`DEFAULT_FRAME_RATE`] and a warning; an unusable rate is never
    /// fatal.
    pub fn fixed_interval(frame_rate: f64) -> Self {
        let rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            log::warn!(
                "invalid frame rate {frame_rate}, defaulting to {DEFAULT_FRAME_RATE} fps"
            );
            DEFAULT_FRAME_RATE
        };

        Self {
            mode: TimingMode::FixedInterval,
            frame_interval: 1.0 / rate,
            frame_index: 0,
            started: Instant::now(),
            last_timestamp: 0.0,
        }
    }

    /// Wall-clock mode; timestamps are seconds elapsed since construction.
    pub fn wall_clock() -> Self {
        Self {
            mode: TimingMode::WallClock,
            frame_interval: 0.0,
            frame_index: 0,
            started: Instant::now(),
            last_timestamp: 0.0,
        }
    }

    /// Timestamp for the next frame. Advances the frame counter.
    pub fn tick(&mut self) -> f64 {
        let raw = match self.mode {
            TimingMode::FixedInterval => self.frame_index as f64 * self.frame_interval,
            TimingMode::WallClock => self.started.elapsed().as_secs_f64(),
        };
        self.frame_index += 1;

        // Instant is monotonic, but keep the guarantee explicit.
        let timestamp = raw.max(self.last_timestamp);
        self.last_timestamp = timestamp;
        timestamp
    }

    pub fn mode(&self) -> TimingMode {
        self.mode
    }

    /// Duration of one frame in fixed-interval mode; 0 in wall-clock mode.
    pub fn frame_interval(&self) -> f64 {
        self.frame_interval
    }

    /// Number of frames timestamped so far.
    pub fn frames_seen(&self) -> u64 {
        self.frame_index
    }
}
