use unibridge::bridge::*;
use unibridge::graph::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// `count` separate simple loops, each 1 -> 3 -> 2 -> 3 -> 4 with its
/// own segment numbers, and a contig path joining every other loop
/// to its start.
fn loop_graph(count: i64) -> AssemblyGraph {
    let mut graph = AssemblyGraph::new(55);
    for i in 0..count {
        let base = 4 * i;
        let (start, middle, repeat, end) =
            (base + 1, base + 2, base + 3, base + 4);
        graph.add_segment(Segment::new(start, 10.0, &[b'A'; 2000]));
        graph.add_segment(Segment::new(middle, 19.5, &[b'C'; 800]));
        graph.add_segment(Segment::new(repeat, 29.0, &[b'G'; 300]));
        graph.add_segment(Segment::new(end, 10.5, &[b'T'; 2000]));
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

macro_rules! bench_loops {
    ($bridger:ident, $id:literal, $name:ident, $count:literal) => {
        fn $name(c: &mut Criterion) {
            let graph = loop_graph($count);
            c.bench_with_input(
                BenchmarkId::new($id, $count),
                &graph,
                |b, g| {
                    b.iter(|| $bridger(g).unwrap());
                },
            );
        }
    };
}

bench_loops!(create_loop_unrolling_bridges, "sequential", seq_100, 100);
bench_loops!(create_loop_unrolling_bridges, "sequential", seq_2000, 2000);

#[cfg(feature = "rayon")]
bench_loops!(create_loop_unrolling_bridges_par, "parallel", par_2000, 2000);

fn simple_loops_2000(c: &mut Criterion) {
    let graph = loop_graph(2000);
    c.bench_function("find_all_simple_loops/2000", |b| {
        b.iter(|| graph.find_all_simple_loops())
    });
}

criterion_group!(
    name = loop_benches;
    config = Criterion::default().sample_size(25);
    targets = seq_100, seq_2000, simple_loops_2000
);

#[cfg(feature = "rayon")]
criterion_group!(
    name = par_benches;
    config = Criterion::default().sample_size(25);
    targets = par_2000
);

#[cfg(feature = "rayon")]
criterion_main!(loop_benches, par_benches);

#[cfg(not(feature = "rayon"))]
criterion_main!(loop_benches);
