mod calibration;
mod frame_clock;
mod ledger;
mod rect;
mod speed_estimator;
mod track_state;

pub use calibration::{Calibration, CalibrationError};
pub use frame_clock::{DEFAULT_FRAME_RATE, FrameClock, TimingMode};
pub use ledger::{TrackLedger, TrackRecord};
pub use rect::Rect;
pub use speed_estimator::{EstimatorConfig, SpeedEstimator, SpeedSample};
pub use track_state::TrackState;
