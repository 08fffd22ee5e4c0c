use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Type encapsulating the ways building a bridge from a graph
/// snapshot can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// A segment number (absolute value of the signed ID) was not
    /// present in the graph.
    #[error("Segment {0} is not in the graph")]
    MissingSegment(i64),
    /// The start and end segments both have zero depth, so there is
    /// no base depth to measure a loop count against.
    #[error("Segments {start} and {end} both have zero depth")]
    ZeroBridgeDepth { start: i64, end: i64 },
    /// The depths put the loop count beyond what could still give the
    /// bridge any quality, or gave no count at all.
    #[error(
        "Loop between segments {start} and {end} would be unrolled {mean_loop_count} times"
    )]
    ExcessiveLoopCount {
        start: i64,
        end: i64,
        mean_loop_count: f64,
    },
    /// Two consecutive segments of a bridge path are not linked in
    /// the graph.
    #[error("No link from segment {from} to segment {to}")]
    BrokenPath { from: i64, to: i64 },
    /// A bridging mode name was something other than
    /// "conservative", "normal" or "bold".
    #[error("Unknown bridging mode `{0}`")]
    InvalidMode(String),
}

impl BridgeError {
    /// Errors that only affect a single candidate bridge; the
    /// candidate can be skipped and bridging continues with the rest.
    #[inline]
    pub fn can_safely_skip(&self) -> bool {
        matches!(
            self,
            BridgeError::ZeroBridgeDepth { .. }
                | BridgeError::ExcessiveLoopCount { .. }
        )
    }
}
