use bstr::BString;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::BridgeCore;

/// A bridge whose path comes from a SPAdes contig: the assembler
/// itself saw the start and end segments on one piece of sequence.
/// The path and quality are worked out by the contig bridging step;
/// this type only carries them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ContigPathBridge {
    pub(super) core: BridgeCore,
}

impl ContigPathBridge {
    /// `quality` is clamped to 0 to 100.
    pub fn new(
        start_segment: i64,
        end_segment: i64,
        graph_path: Vec<i64>,
        bridge_sequence: BString,
        depth: f64,
        quality: f64,
    ) -> Self {
        ContigPathBridge {
            core: BridgeCore::new(
                start_segment,
                end_segment,
                graph_path,
                bridge_sequence,
                depth,
                quality,
            ),
        }
    }
}
