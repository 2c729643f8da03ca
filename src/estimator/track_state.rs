/// Track history state for the speed-estimation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Single observation in history; no speed emitted yet
    #[default]
    Observed,
    /// Consecutive in-threshold observations; speeds being emitted
    Tracking,
}
