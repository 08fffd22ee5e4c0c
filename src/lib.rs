//! Bridges between single copy segments of an assembly graph.
//!
//! A bridge proposes how two single copy segments connect, through a
//! path of other segments, and carries a 0 to 100 quality score so
//! that a graph can apply the most trustworthy, non-conflicting
//! bridges first. Bridges come from several evidence sources; the
//! loop unrolling source is built here, directly from segment depths
//! and the graph's contig paths.
//!
//! ```
//! use unibridge::bridge::create_loop_unrolling_bridges;
//! use unibridge::graph::{AssemblyGraph, Segment};
//!
//! let mut graph = AssemblyGraph::new(0);
//! graph.add_segment(Segment::new(1, 10.0, &[b'A'; 500]));
//! graph.add_segment(Segment::new(2, 19.5, &[b'C'; 300]));
//! graph.add_segment(Segment::new(3, 29.0, &[b'G'; 100]));
//! graph.add_segment(Segment::new(4, 10.0, &[b'T'; 500]));
//! graph.add_link(1, 3);
//! graph.add_link(3, 2);
//! graph.add_link(2, 3);
//! graph.add_link(3, 4);
//! graph.add_path("NODE_1", vec![1, 3, 2]);
//!
//! let bridges = create_loop_unrolling_bridges(&graph).unwrap();
//! assert_eq!(bridges.len(), 1);
//! assert_eq!(bridges[0].graph_path(), &[3, 2, 3, 2, 3]);
//! assert!((bridges[0].quality() - 41.83).abs() < 0.01);
//! ```

pub mod bridge;
pub mod config;
pub mod depth;
pub mod error;
pub mod graph;

pub use bridge::{sort_for_application, Bridge, BridgeVariant};
pub use config::{BridgingConfig, BridgingMode};
pub use error::{BridgeError, BridgeResult};
pub use graph::{AssemblyGraph, BridgeGraph, Segment, SimpleLoop};
