use std::convert::TryFrom;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use tracing::trace;

use super::BridgeCore;
use crate::depth::{depth_agreement_factor, mean_depth, weighted_average};
use crate::error::{BridgeError, BridgeResult};
use crate::graph::BridgeGraph;

/// Quality of a loop unrolling bridge before any penalties, on the
/// 0 to 1 scale used during scoring. Loop counts come from depth
/// alone, so even a perfect loop bridge scores below bridges with
/// direct evidence.
pub const MAX_LOOP_BRIDGE_QUALITY: f64 = 0.4;

/// Most traversals a loop is unrolled to. The penalty halves quality
/// per traversal, so far below this a bridge already fails every mode's
/// cutoff; past it the path and sequence would only grow.
pub const MAX_LOOP_COUNT: u32 = 1000;

/// A bridge made by unrolling a simple loop a number of times
/// estimated from segment depths.
///
/// Quality is affected by:
///   * How well the start and end segments' depths agree.
///   * How close the estimated loop count is to a whole number.
///   * The final loop count (higher counts get lower quality).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LoopUnrollingBridge {
    pub(super) core: BridgeCore,
    /// Number of times the loop body is traversed, at least 1.
    pub loop_count: u32,
    /// The depth-based estimate `loop_count` was rounded from.
    pub mean_loop_count: f64,
}

impl LoopUnrollingBridge {
    /// Builds the bridge for the simple loop start -> repeat ->
    /// middle -> repeat -> end. The four segments are assumed to form
    /// such a loop, so their signs only matter for the path and
    /// sequence, not for scoring.
    ///
    /// Fails with `ZeroBridgeDepth` when the start and end segments
    /// give no base depth to count loops against, and with
    /// `ExcessiveLoopCount` when the estimate rounds above
    /// `MAX_LOOP_COUNT`.
    pub fn new<G: BridgeGraph + ?Sized>(
        graph: &G,
        start: i64,
        end: i64,
        middle: i64,
        repeat: i64,
    ) -> BridgeResult<Self> {
        let start_seg = graph.get_segment(start)?;
        let end_seg = graph.get_segment(end)?;
        let middle_seg = graph.get_segment(middle)?;
        let repeat_seg = graph.get_segment(repeat)?;
        let overlap = graph.overlap();

        let mut quality = MAX_LOOP_BRIDGE_QUALITY;

        // The start and end are both single copy, so their depths
        // should agree.
        quality *= depth_agreement_factor(start_seg.depth, end_seg.depth);

        let depth = mean_depth(start_seg, end_seg, overlap);
        if depth.is_nan() || depth <= 0.0 {
            return Err(BridgeError::ZeroBridgeDepth { start, end });
        }

        // The repeat is also passed once on the way through, outside
        // of the loop, so the base depth comes off before counting.
        let loop_count_by_middle = middle_seg.depth / depth;
        let loop_count_by_repeat = ((repeat_seg.depth - depth) / depth).max(0.0);
        let mean_loop_count = weighted_average(
            loop_count_by_middle,
            loop_count_by_repeat,
            middle_seg.length_no_overlap(overlap) as f64,
            repeat_seg.length_no_overlap(overlap) as f64,
        );

        let (loop_count, closeness) = loop_count_and_closeness(mean_loop_count)
            .ok_or(BridgeError::ExcessiveLoopCount {
                start,
                end,
                mean_loop_count,
            })?;
        quality *= closeness;
        quality *= loop_count_penalty(loop_count);

        let graph_path = unrolled_path(middle, repeat, loop_count);
        let bridge_sequence = graph.get_bridge_path_sequence(&graph_path, start)?;

        trace!(
            start,
            end,
            loop_count_by_middle,
            loop_count_by_repeat,
            mean_loop_count,
            loop_count,
            "counted loop traversals"
        );

        // sqrt pulls scores up from the bottom of the range, where the
        // product of several factors below 1 tends to leave them.
        let quality = 100.0 * quality.sqrt();

        Ok(LoopUnrollingBridge {
            core: BridgeCore::new(
                start,
                end,
                graph_path,
                bridge_sequence,
                depth,
                quality,
            ),
            loop_count,
            mean_loop_count,
        })
    }
}

/// Rounds a loop count estimate to a whole number of traversals, and
/// scores how close the estimate was to that number: 1.0 on a whole
/// number, 0.0 exactly halfway between two. Halfway estimates round
/// up.
///
/// Estimates below 1 give a single traversal, with the estimate itself
/// as the closeness. Returns `None` when the estimate rounds above
/// `MAX_LOOP_COUNT` or is NaN.
///
/// # Examples
///
/// ```
/// use unibridge::bridge::loop_unroll::loop_count_and_closeness;
///
/// assert_eq!(loop_count_and_closeness(3.0), Some((3, 1.0)));
/// assert_eq!(loop_count_and_closeness(3.5), Some((4, 0.0)));
/// assert_eq!(loop_count_and_closeness(0.25), Some((1, 0.25)));
/// assert_eq!(loop_count_and_closeness(1e12), None);
/// ```
pub fn loop_count_and_closeness(mean_loop_count: f64) -> Option<(u32, f64)> {
    if mean_loop_count < 1.0 {
        return Some((1, mean_loop_count.max(0.0)));
    }
    let rounded = mean_loop_count.round();
    if rounded.is_nan() || rounded > f64::from(MAX_LOOP_COUNT) {
        return None;
    }
    let fractional_part = mean_loop_count % 1.0;
    let distance = fractional_part.min(1.0 - fractional_part);
    Some((rounded as u32, 1.0 - 2.0 * distance))
}

/// Each traversal past the first halves the quality.
#[inline]
pub fn loop_count_penalty(loop_count: u32) -> f64 {
    let exponent = i32::try_from(loop_count.saturating_sub(1)).unwrap_or(i32::MAX);
    0.5_f64.powi(exponent)
}

/// repeat, then (middle, repeat) once per traversal
pub fn unrolled_path(middle: i64, repeat: i64, loop_count: u32) -> Vec<i64> {
    let mut path = Vec::with_capacity(2 * loop_count as usize + 1);
    path.push(repeat);
    for _ in 0..loop_count {
        path.push(middle);
        path.push(repeat);
    }
    path
}
