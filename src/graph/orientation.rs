#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Represents segment orientation/strand. Assembly graph segments
/// are addressed with signed IDs, where the sign carries the strand
/// and the absolute value is the segment number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Orientation {
    Forward,
    Backward,
}

impl Orientation {
    /// The strand encoded in a signed segment ID; positive IDs are
    /// Forward, negative IDs are Backward
    #[inline]
    pub fn of(signed_id: i64) -> Self {
        if signed_id < 0 {
            Orientation::Backward
        } else {
            Orientation::Forward
        }
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        matches!(self, Orientation::Backward)
    }
}
