use bstr::BString;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::BridgeCore;

/// A bridge supported by long reads aligned across both the start and
/// end segments. The consensus sequence, path and quality come from
/// the long read bridging step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LongReadBridge {
    pub(super) core: BridgeCore,
    /// Number of reads spanning the bridge.
    pub read_count: usize,
}

impl LongReadBridge {
    /// `quality` is clamped to 0 to 100.
    pub fn new(
        start_segment: i64,
        end_segment: i64,
        graph_path: Vec<i64>,
        bridge_sequence: BString,
        depth: f64,
        quality: f64,
    ) -> Self {
        LongReadBridge {
            core: BridgeCore::new(
                start_segment,
                end_segment,
                graph_path,
                bridge_sequence,
                depth,
                quality,
            ),
            read_count: 0,
        }
    }

    pub fn with_read_count(mut self, read_count: usize) -> Self {
        self.read_count = read_count;
        self
    }
}
