use tracing::{debug, info, instrument, warn};

use super::{Bridge, LoopUnrollingBridge};
use crate::config::BridgingConfig;
use crate::error::BridgeResult;
use crate::graph::{BridgeGraph, SimpleLoop};

/// A simple loop can come from a repeat within one sequence, or from
/// a separate circular sequence (e.g. a plasmid) that shares some
/// sequence with the rest of the graph. Only the first kind should be
/// unrolled. It is recognised by a path that has the loop's middle
/// together with its start or end, on either strand: that puts the
/// loop and its base on the same piece of DNA.
pub fn loop_is_joined<'a, I>(simple_loop: &SimpleLoop, paths: I) -> bool
where
    I: IntoIterator<Item = &'a [i64]>,
{
    paths.into_iter().any(|path| {
        let flipped: Vec<i64> = path.iter().rev().map(|s| -s).collect();
        path_joins_loop(simple_loop, path)
            || path_joins_loop(simple_loop, &flipped)
    })
}

fn path_joins_loop(simple_loop: &SimpleLoop, path: &[i64]) -> bool {
    path.contains(&simple_loop.middle)
        && (path.contains(&simple_loop.start) || path.contains(&simple_loop.end))
}

/// Decides on a single loop: `None` if the loop isn't joined to its
/// base, or if its depths can't give a loop count.
fn evaluate_loop<G: BridgeGraph + ?Sized>(
    graph: &G,
    simple_loop: &SimpleLoop,
) -> BridgeResult<Option<Bridge>> {
    let SimpleLoop {
        start,
        end,
        middle,
        repeat,
    } = *simple_loop;

    if !loop_is_joined(simple_loop, graph.paths().map(|(_, path)| path)) {
        debug!(start, end, middle, repeat, "no path joins loop, not unrolling");
        return Ok(None);
    }

    match LoopUnrollingBridge::new(graph, start, end, middle, repeat) {
        Ok(bridge) => {
            debug!("{}", bridge);
            Ok(Some(bridge.into()))
        }
        Err(err) if err.can_safely_skip() => {
            warn!(start, end, middle, repeat, "skipping loop: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Builds a loop unrolling bridge for every simple loop in the graph
/// that a path shows to be part of the same sequence as its start or
/// end. Bridges are returned in the order the graph reports its
/// loops.
#[instrument(skip(graph))]
pub fn create_loop_unrolling_bridges<G: BridgeGraph + ?Sized>(
    graph: &G,
) -> BridgeResult<Vec<Bridge>> {
    let simple_loops = graph.find_all_simple_loops();

    let mut bridges = Vec::new();
    for simple_loop in simple_loops.iter() {
        if let Some(bridge) = evaluate_loop(graph, simple_loop)? {
            bridges.push(bridge);
        }
    }

    info!(
        loops = simple_loops.len(),
        bridges = bridges.len(),
        "created loop unrolling bridges"
    );
    Ok(bridges)
}

/// Same result as `create_loop_unrolling_bridges`, with the loops
/// evaluated on the rayon thread pool.
#[cfg(feature = "rayon")]
#[instrument(skip(graph))]
pub fn create_loop_unrolling_bridges_par<G: BridgeGraph + Sync + ?Sized>(
    graph: &G,
) -> BridgeResult<Vec<Bridge>> {
    use rayon::prelude::*;

    let simple_loops = graph.find_all_simple_loops();
    let evaluated: Vec<Option<Bridge>> = simple_loops
        .par_iter()
        .map(|simple_loop| evaluate_loop(graph, simple_loop))
        .collect::<BridgeResult<_>>()?;
    let bridges: Vec<Bridge> = evaluated.into_iter().flatten().collect();

    info!(
        loops = simple_loops.len(),
        bridges = bridges.len(),
        "created loop unrolling bridges"
    );
    Ok(bridges)
}

/// Loop unrolling bridges are short read bridges, which conservative
/// mode does not make at all.
#[instrument(skip(graph))]
pub fn create_loop_unrolling_bridges_with_config<G: BridgeGraph + ?Sized>(
    graph: &G,
    config: &BridgingConfig,
) -> BridgeResult<Vec<Bridge>> {
    if !config.builds_short_read_bridges() {
        info!(mode = %config.mode, "skipping loop unrolling bridges");
        return Ok(Vec::new());
    }
    create_loop_unrolling_bridges(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::loop_graph;
    use crate::graph::{AssemblyGraph, Segment};

    const LENGTHS: [usize; 4] = [500, 300, 100, 500];

    fn scored_graph() -> AssemblyGraph {
        loop_graph([10.0, 19.5, 29.0, 10.0], LENGTHS)
    }

    /// `count` separate copies of the 1 -> 3 -> 2 -> 3 -> 4 loop, with
    /// a contig path joining every other one to its start.
    fn many_loops(count: i64) -> AssemblyGraph {
        let mut graph = AssemblyGraph::new(0);
        for i in 0..count {
            let base = 4 * i;
            let (start, middle, repeat, end) =
                (base + 1, base + 2, base + 3, base + 4);
            graph.add_segment(Segment::new(start, 10.0, &[b'A'; 500]));
            graph.add_segment(Segment::new(middle, 20.0 + i as f64, &[b'C'; 300]));
            graph.add_segment(Segment::new(repeat, 30.0, &[b'G'; 100]));
            graph.add_segment(Segment::new(end, 10.0, &[b'T'; 500]));
            graph.add_link(start, repeat);
            graph.add_link(repeat, middle);
            graph.add_link(middle, repeat);
            graph.add_link(repeat, end);
            if i % 2 == 0 {
                graph.add_path(format!("NODE_{}", i), vec![start, repeat, middle]);
            }
        }
        graph
    }

    #[test]
    fn joined_by_start_and_middle() {
        let simple_loop = SimpleLoop::new(1, 4, 2, 3);
        let path: &[i64] = &[1, 3, 2];
        assert!(loop_is_joined(&simple_loop, vec![path]));
    }

    #[test]
    fn joined_by_end_and_middle() {
        let simple_loop = SimpleLoop::new(1, 4, 2, 3);
        let path: &[i64] = &[2, 3, 4];
        assert!(loop_is_joined(&simple_loop, vec![path]));
    }

    #[test]
    fn joined_by_flipped_path() {
        let simple_loop = SimpleLoop::new(1, 4, 2, 3);
        let path: &[i64] = &[-2, -3, -1];
        assert!(loop_is_joined(&simple_loop, vec![path]));
    }

    #[test]
    fn not_joined() {
        let simple_loop = SimpleLoop::new(1, 4, 2, 3);
        let unrelated: &[i64] = &[1, 3, 4];
        let middle_only: &[i64] = &[3, 2, 3];
        // The middle on the wrong strand relative to the start
        let wrong_strand: &[i64] = &[1, -2];
        assert!(!loop_is_joined(&simple_loop, vec![unrelated, middle_only]));
        assert!(!loop_is_joined(&simple_loop, vec![wrong_strand]));
        assert!(!loop_is_joined(&simple_loop, Vec::<&[i64]>::new()));
    }

    #[test]
    fn bridges_joined_loop() {
        let mut graph = scored_graph();
        graph.add_path("NODE_1", vec![1, 3, 2]);
        let bridges = create_loop_unrolling_bridges(&graph).unwrap();
        assert_eq!(bridges.len(), 1);

        let bridge = &bridges[0];
        assert_eq!(bridge.type_name(), "loop");
        assert_eq!(bridge.start_segment(), 1);
        assert_eq!(bridge.end_segment(), 4);
        assert_eq!(bridge.graph_path(), &[3, 2, 3, 2, 3]);
        assert!((bridge.quality() - 41.83).abs() < 0.01);
    }

    #[test]
    fn rejects_loop_without_evidence() {
        let mut graph = scored_graph();
        assert!(create_loop_unrolling_bridges(&graph).unwrap().is_empty());

        graph.add_path("NODE_1", vec![1, 3, 4]);
        assert!(create_loop_unrolling_bridges(&graph).unwrap().is_empty());
    }

    #[test]
    fn skips_zero_depth_loop() {
        let mut graph = loop_graph([0.0, 19.5, 29.0, 0.0], LENGTHS);
        graph.add_path("NODE_1", vec![1, 3, 2]);
        assert!(create_loop_unrolling_bridges(&graph).unwrap().is_empty());
    }

    #[test]
    fn skips_loop_with_excessive_count() {
        let mut graph = loop_graph([0.001, 1000.0, 1000.0, 0.001], [500, 1, 1, 500]);
        graph.add_path("NODE_1", vec![1, 3, 2]);
        assert!(create_loop_unrolling_bridges(&graph).unwrap().is_empty());
    }

    #[test]
    fn repeated_runs_agree() {
        let graph = many_loops(6);
        let first = create_loop_unrolling_bridges(&graph).unwrap();
        let second = create_loop_unrolling_bridges(&graph).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);

        let starts: Vec<i64> = first.iter().map(|b| b.start_segment()).collect();
        assert_eq!(starts, vec![1, 9, 17]);
    }

    #[test]
    fn conservative_mode_skips_loops() {
        let mut graph = scored_graph();
        graph.add_path("NODE_1", vec![1, 3, 2]);

        let conservative = BridgingConfig::conservative();
        let bridges =
            create_loop_unrolling_bridges_with_config(&graph, &conservative)
                .unwrap();
        assert!(bridges.is_empty());

        let normal = BridgingConfig::normal();
        let bridges =
            create_loop_unrolling_bridges_with_config(&graph, &normal).unwrap();
        assert_eq!(bridges.len(), 1);
    }

    #[test]
    #[cfg(feature = "rayon")]
    fn parallel_matches_sequential() {
        let graph = many_loops(40);
        let sequential = create_loop_unrolling_bridges(&graph).unwrap();
        let parallel = create_loop_unrolling_bridges_par(&graph).unwrap();
        assert_eq!(sequential.len(), 20);
        assert_eq!(sequential, parallel);
    }
}
