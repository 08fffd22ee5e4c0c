//! The bridge abstraction shared by every source of bridging
//! evidence, and the order in which bridges are handed to the graph
//! for application.

pub mod contig_path;
pub mod long_read;
pub mod loop_evidence;
pub mod loop_unroll;

pub use self::contig_path::ContigPathBridge;
pub use self::long_read::LongReadBridge;
pub use self::loop_evidence::*;
pub use self::loop_unroll::LoopUnrollingBridge;

use std::cmp::Ordering;
use std::fmt;

use bstr::BString;

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Record of how much depth a bridge took from each segment when it
/// was applied, so the depth can be given back if the bridge is
/// later removed.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct DepthLedger {
    entries: Vec<(i64, f64)>,
}

impl DepthLedger {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record(&mut self, seg_num: i64, amount: f64) {
        self.entries.push((seg_num, amount));
    }

    pub fn entries(&self) -> &[(i64, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total depth taken from a segment, in either orientation.
    pub fn total_for(&self, seg_num: i64) -> f64 {
        self.entries
            .iter()
            .filter(|(s, _)| s.abs() == seg_num.abs())
            .map(|(_, amount)| amount)
            .sum()
    }

    /// Empty the ledger, returning the reductions in the order they
    /// were recorded.
    pub fn take(&mut self) -> Vec<(i64, f64)> {
        std::mem::take(&mut self.entries)
    }
}

/// Keeps a quality score inside 0 to 100. Non-finite scores become 0.
#[inline]
pub fn clamp_quality(quality: f64) -> f64 {
    if quality.is_finite() {
        quality.max(0.0).min(100.0)
    } else {
        0.0
    }
}

/// The fields every bridge has, whatever the evidence behind it.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BridgeCore {
    /// Signed numbers of the two single copy segments being bridged.
    pub start_segment: i64,
    pub end_segment: i64,
    /// Path between the start and end segments, exclusive of both.
    pub graph_path: Vec<i64>,
    pub bridge_sequence: BString,
    pub depth: f64,
    pub quality: f64,
    pub segments_reduced_depth: DepthLedger,
}

impl BridgeCore {
    pub fn new(
        start_segment: i64,
        end_segment: i64,
        graph_path: Vec<i64>,
        bridge_sequence: BString,
        depth: f64,
        quality: f64,
    ) -> Self {
        BridgeCore {
            start_segment,
            end_segment,
            graph_path,
            bridge_sequence,
            depth,
            quality: clamp_quality(quality),
            segments_reduced_depth: DepthLedger::new(),
        }
    }
}

/// A bridge in human-readable form: "start -> path -> end", with the
/// path left out when it is empty.
///
/// # Examples
///
/// ```
/// use unibridge::bridge::{bridge_label, BridgeCore};
///
/// let core = BridgeCore::new(1, 4, vec![3, 2, -3], "".into(), 1.0, 50.0);
/// assert_eq!(bridge_label(&core), "1 -> 3, 2, -3 -> 4");
///
/// let core = BridgeCore::new(1, -4, vec![], "".into(), 1.0, 50.0);
/// assert_eq!(bridge_label(&core), "1 -> -4");
/// ```
pub fn bridge_label(bridge: &BridgeCore) -> String {
    let mut label = format!("{} -> ", bridge.start_segment);
    if !bridge.graph_path.is_empty() {
        let path: Vec<String> =
            bridge.graph_path.iter().map(|s| s.to_string()).collect();
        label.push_str(&path.join(", "));
        label.push_str(" -> ");
    }
    label.push_str(&bridge.end_segment.to_string());
    label
}

/// Implemented by each kind of bridge. The type score and name belong
/// to the kind of evidence, not to any one bridge.
pub trait BridgeVariant {
    /// Relative trust in the evidence source; higher is more trusted.
    const TYPE_SCORE: u8;
    const TYPE_NAME: &'static str;

    fn core(&self) -> &BridgeCore;

    fn label(&self) -> String {
        bridge_label(self.core())
    }
}

macro_rules! impl_bridge_variants {
    ($(($ty:ty, $variant:ident, $score:expr, $name:expr)),* $(,)?) => (
        $(
        impl BridgeVariant for $ty {
            const TYPE_SCORE: u8 = $score;
            const TYPE_NAME: &'static str = $name;

            #[inline]
            fn core(&self) -> &BridgeCore {
                &self.core
            }
        }

        impl From<$ty> for Bridge {
            fn from(bridge: $ty) -> Self {
                Bridge::$variant(bridge)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{} bridge: {} (quality = {:.2})",
                    Self::TYPE_NAME,
                    self.label(),
                    self.core.quality
                )
            }
        }
        )*

        impl Bridge {
            #[inline]
            fn core(&self) -> &BridgeCore {
                match self {
                    $(Bridge::$variant(b) => b.core(),)*
                }
            }

            #[inline]
            fn core_mut(&mut self) -> &mut BridgeCore {
                match self {
                    $(Bridge::$variant(b) => &mut b.core,)*
                }
            }

            #[inline]
            pub fn type_score(&self) -> u8 {
                match self {
                    $(Bridge::$variant(_) => <$ty>::TYPE_SCORE,)*
                }
            }

            #[inline]
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Bridge::$variant(_) => <$ty>::TYPE_NAME,)*
                }
            }
        }

        impl fmt::Display for Bridge {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Bridge::$variant(b) => fmt::Display::fmt(b, f),)*
                }
            }
        }
    );
}

/// A bridge from any evidence source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum Bridge {
    LoopUnrolling(LoopUnrollingBridge),
    ContigPath(ContigPathBridge),
    LongRead(LongReadBridge),
}

impl_bridge_variants!(
    (LongReadBridge, LongRead, 2, "long read"),
    (ContigPathBridge, ContigPath, 1, "SPAdes"),
    (LoopUnrollingBridge, LoopUnrolling, 0, "loop"),
);

impl Bridge {
    pub fn start_segment(&self) -> i64 {
        self.core().start_segment
    }

    pub fn end_segment(&self) -> i64 {
        self.core().end_segment
    }

    pub fn graph_path(&self) -> &[i64] {
        &self.core().graph_path
    }

    pub fn bridge_sequence(&self) -> &BString {
        &self.core().bridge_sequence
    }

    pub fn depth(&self) -> f64 {
        self.core().depth
    }

    pub fn quality(&self) -> f64 {
        self.core().quality
    }

    pub fn label(&self) -> String {
        bridge_label(self.core())
    }

    pub fn segments_reduced_depth(&self) -> &DepthLedger {
        &self.core().segments_reduced_depth
    }

    /// Note that applying this bridge took `amount` depth from a
    /// segment. The graph itself is not touched.
    pub fn record_depth_reduction(&mut self, seg_num: i64, amount: f64) {
        self.core_mut().segments_reduced_depth.record(seg_num, amount);
    }

    /// Clears the ledger, returning the depth that should be given
    /// back to each segment if the bridge is removed.
    pub fn take_depth_reductions(&mut self) -> Vec<(i64, f64)> {
        self.core_mut().segments_reduced_depth.take()
    }

    #[inline]
    pub fn passes_quality(&self, min_bridge_qual: f64) -> bool {
        self.quality() >= min_bridge_qual
    }

    /// Order in which bridges are applied: more trusted sources
    /// first, then higher quality first.
    pub fn application_order(a: &Bridge, b: &Bridge) -> Ordering {
        b.type_score()
            .cmp(&a.type_score())
            .then_with(|| b.quality().total_cmp(&a.quality()))
    }
}

/// Stable sort into application order.
pub fn sort_for_application(bridges: &mut [Bridge]) {
    bridges.sort_by(Bridge::application_order);
}
