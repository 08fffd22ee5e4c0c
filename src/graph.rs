//! The read-only graph snapshot that bridges are built from: segments
//! with depth, links between signed segment IDs, and named paths.

pub mod orientation;
pub mod traits;

pub use self::orientation::*;
pub use self::traits::*;

use std::collections::BTreeMap;

use bstr::BString;
use fnv::{FnvHashMap, FnvHashSet};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// A segment of the assembly graph. The sequence is stored in the
/// forward orientation; the reverse strand is derived on request.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Segment {
    pub number: i64,
    pub depth: f64,
    pub forward_sequence: BString,
}

impl Segment {
    pub fn new(number: i64, depth: f64, sequence: &[u8]) -> Self {
        Segment {
            number: number.abs(),
            depth,
            forward_sequence: BString::from(sequence),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forward_sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward_sequence.is_empty()
    }

    /// Segment length with the graph overlap trimmed off both ends.
    /// Segments shorter than twice the overlap have length 0.
    #[inline]
    pub fn length_no_overlap(&self, overlap: usize) -> usize {
        self.len().saturating_sub(2 * overlap)
    }

    /// The segment's sequence on the given strand
    pub fn sequence(&self, orient: Orientation) -> BString {
        if orient.is_reverse() {
            reverse_complement(&self.forward_sequence)
        } else {
            self.forward_sequence.clone()
        }
    }
}

/// Reverse complement of a nucleotide sequence. Case is kept; any
/// base other than ACGT becomes N.
pub fn reverse_complement(seq: &[u8]) -> BString {
    seq.iter()
        .rev()
        .map(|&b| match b {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            b'a' => b't',
            b'c' => b'g',
            b'g' => b'c',
            b't' => b'a',
            b'n' => b'n',
            _ => b'N',
        })
        .collect::<Vec<u8>>()
        .into()
}

/// A simple loop: start -> repeat -> middle -> repeat -> end, where
/// the loop (repeat, middle) can be traversed any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SimpleLoop {
    pub start: i64,
    pub end: i64,
    pub middle: i64,
    pub repeat: i64,
}

impl SimpleLoop {
    pub fn new(start: i64, end: i64, middle: i64, repeat: i64) -> Self {
        SimpleLoop {
            start,
            end,
            middle,
            repeat,
        }
    }

    /// The same loop as seen from the opposite strand
    pub fn reverse_complement(&self) -> Self {
        SimpleLoop {
            start: -self.end,
            end: -self.start,
            middle: -self.middle,
            repeat: -self.repeat,
        }
    }
}

impl From<(i64, i64, i64, i64)> for SimpleLoop {
    fn from((start, end, middle, repeat): (i64, i64, i64, i64)) -> Self {
        SimpleLoop::new(start, end, middle, repeat)
    }
}

/// In-memory assembly graph snapshot. Links are stored for both
/// strands, so adding A -> B also adds -B -> -A.
#[derive(Default, Debug, Clone)]
pub struct AssemblyGraph {
    overlap: usize,
    segments: FnvHashMap<i64, Segment>,
    forward_links: FnvHashMap<i64, Vec<i64>>,
    reverse_links: FnvHashMap<i64, Vec<i64>>,
    paths: BTreeMap<String, Vec<i64>>,
}

impl AssemblyGraph {
    pub fn new(overlap: usize) -> Self {
        AssemblyGraph {
            overlap,
            ..Default::default()
        }
    }

    /// Insert a segment, replacing any existing segment with the same
    /// number.
    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.insert(segment.number, segment);
    }

    pub fn add_link(&mut self, from: i64, to: i64) {
        fn push_unique(map: &mut FnvHashMap<i64, Vec<i64>>, k: i64, v: i64) {
            let entry = map.entry(k).or_default();
            if !entry.contains(&v) {
                entry.push(v);
            }
        }
        push_unique(&mut self.forward_links, from, to);
        push_unique(&mut self.forward_links, -to, -from);
        push_unique(&mut self.reverse_links, to, from);
        push_unique(&mut self.reverse_links, -from, -to);
    }

    pub fn add_path<S: Into<String>>(&mut self, name: S, path: Vec<i64>) {
        self.paths.insert(name.into(), path);
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment numbers in ascending order
    pub fn segment_numbers(&self) -> Vec<i64> {
        let mut nums: Vec<i64> = self.segments.keys().copied().collect();
        nums.sort_unstable();
        nums
    }

    pub fn forward_links(&self, seg: i64) -> &[i64] {
        self.forward_links
            .get(&seg)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn reverse_links(&self, seg: i64) -> &[i64] {
        self.reverse_links
            .get(&seg)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_linked(&self, from: i64, to: i64) -> bool {
        self.forward_links(from).contains(&to)
    }

    /// Checks whether `middle` is the body of a simple loop, and if so
    /// returns the loop.
    fn simple_loop_at(&self, middle: i64) -> Option<SimpleLoop> {
        // A middle segment has exactly one link on each end, both to
        // the same repeat segment.
        let (fwd, rev) = (self.forward_links(middle), self.reverse_links(middle));
        if fwd.len() != 1 || rev.len() != 1 || fwd[0] != rev[0] {
            return None;
        }
        let repeat = fwd[0];
        if repeat.abs() == middle.abs() {
            return None;
        }

        // The repeat has exactly two links on each end: one to the
        // middle and one to the start/end. Fewer would be a simple
        // path, more a complex loop.
        let (rep_fwd, rep_rev) =
            (self.forward_links(repeat), self.reverse_links(repeat));
        if rep_fwd.len() != 2 || rep_rev.len() != 2 {
            return None;
        }
        let ends: Vec<i64> =
            rep_fwd.iter().copied().filter(|&s| s != middle).collect();
        let starts: Vec<i64> =
            rep_rev.iter().copied().filter(|&s| s != middle).collect();
        if ends.len() != 1 || starts.len() != 1 {
            return None;
        }
        let (start, end) = (starts[0], ends[0]);

        // Start and end may be the same segment, but neither may be
        // part of the loop itself.
        let in_loop = |s: i64| s.abs() == repeat.abs() || s.abs() == middle.abs();
        if in_loop(start) || in_loop(end) {
            return None;
        }
        Some(SimpleLoop::new(start, end, middle, repeat))
    }
}

impl BridgeGraph for AssemblyGraph {
    fn segment(&self, seg_num: i64) -> Option<&Segment> {
        self.segments.get(&seg_num.abs())
    }

    fn overlap(&self) -> usize {
        self.overlap
    }

    fn paths<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a str, &'a [i64])> + 'a> {
        Box::new(self.paths.iter().map(|(n, p)| (n.as_str(), p.as_slice())))
    }

    fn find_all_simple_loops(&self) -> Vec<SimpleLoop> {
        let mut simple_loops: Vec<SimpleLoop> = Vec::new();
        let mut seen: FnvHashSet<SimpleLoop> = FnvHashSet::default();
        for seg_num in self.segment_numbers() {
            for &middle in &[seg_num, -seg_num] {
                if let Some(simple_loop) = self.simple_loop_at(middle) {
                    let rev_comp = simple_loop.reverse_complement();
                    if !seen.contains(&rev_comp) && seen.insert(simple_loop) {
                        simple_loops.push(simple_loop);
                    }
                }
            }
        }
        simple_loops
    }

    fn get_bridge_path_sequence(
        &self,
        path: &[i64],
        start_seg: i64,
    ) -> BridgeResult<BString> {
        if path.is_empty() {
            return Ok(BString::from(""));
        }
        self.get_segment(start_seg)?;

        let mut sequence: Vec<u8> = Vec::new();
        let mut prev = start_seg;
        for &seg_num in path {
            if !self.is_linked(prev, seg_num) {
                return Err(BridgeError::BrokenPath {
                    from: prev,
                    to: seg_num,
                });
            }
            let seg_seq =
                self.get_segment(seg_num)?.sequence(Orientation::of(seg_num));
            sequence
                .extend_from_slice(seg_seq.get(self.overlap..).unwrap_or_default());
            prev = seg_num;
        }

        // The last overlap belongs to the segment after the path.
        let bridge_len = sequence.len().saturating_sub(self.overlap);
        sequence.truncate(bridge_len);
        Ok(BString::from(sequence))
    }
}
