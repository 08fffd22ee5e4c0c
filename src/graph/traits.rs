use bstr::BString;

use crate::error::{BridgeError, BridgeResult};
use crate::graph::{Segment, SimpleLoop};

/// Read-only view of an assembly graph, as needed to build and score
/// bridges. Bridges are only ever built against a snapshot through
/// this trait, so nothing here can mutate the graph.
pub trait BridgeGraph {
    /// Look up a segment by number. Signed IDs are accepted; only the
    /// absolute value is used.
    fn segment(&self, seg_num: i64) -> Option<&Segment>;

    /// The number of bases shared by adjacent segments at each link.
    fn overlap(&self) -> usize;

    /// Named paths of signed segment IDs known to lie on a single
    /// piece of DNA (e.g. SPAdes contig paths).
    fn paths<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a str, &'a [i64])> + 'a>;

    /// Every simple loop (start -> repeat -> middle -> repeat -> end)
    /// in the graph, without reverse complement duplicates.
    fn find_all_simple_loops(&self) -> Vec<SimpleLoop>;

    /// The sequence spanned by `path`, which follows on from
    /// `start_seg`. Overlaps with the start segment and with whatever
    /// segment follows the path are not included.
    fn get_bridge_path_sequence(
        &self,
        path: &[i64],
        start_seg: i64,
    ) -> BridgeResult<BString>;

    /// Like `segment`, but a missing segment is an error.
    fn get_segment(&self, seg_num: i64) -> BridgeResult<&Segment> {
        self.segment(seg_num)
            .ok_or(BridgeError::MissingSegment(seg_num.abs()))
    }
}
