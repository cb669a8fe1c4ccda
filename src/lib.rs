//! Netprop computes structural properties of (regulatory) networks and merges grouped network
//! files into their union.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure, assembled from
//! [`Edge`](edge::Edge) instances with a [`GraphBuilder`](graph::GraphBuilder) or loaded from an
//! edge list with [`io::read_graph`]. An [`AnalysisPipeline`](pipeline::AnalysisPipeline) then
//! runs the analyzers switched on in the [`Settings`](settings::Settings) and collects their node
//! properties, network means and supplemental matrices.
//!
//! ```rust
//! use netprop::edge::Edge;
//! use netprop::graph::GraphBuilder;
//! use netprop::pipeline::AnalysisPipeline;
//! use netprop::settings::Settings;
//!
//! // A directed, unweighted regulatory network.
//! let mut builder = GraphBuilder::new(true, false);
//! builder.insert(Edge::new("tf1", "g1"));
//! builder.insert(Edge::new("tf1", "g2"));
//! builder.insert(Edge::new("tf2", "g2"));
//! let graph = builder.build();
//!
//! let settings = Settings {
//!     is_directed: true,
//!     compute_betweenness: true,
//!     compute_tf_tanimoto: true,
//!     ..Default::default()
//! };
//! let pipeline = AnalysisPipeline::new(&settings)?;
//! let output = pipeline.run(&graph)?;
//!
//! assert_eq!(output.table.column("outdegree"), Some(&[2.0, 0.0, 0.0, 1.0][..]));
//! for mean in &output.network_means {
//!     println!("{}\t{}", mean.name, mean.value);
//! }
//! # Ok::<(), netprop::error::Error>(())
//! ```
//!
//! Grouped network files are merged with [`NetworkGroups`](groups::NetworkGroups), which writes
//! the union of each group to the output directory.

/// Builds an unweighted test graph from paths of node ids, `graph!(directed; ...)` for a directed
/// one.
#[cfg(test)]
macro_rules! graph {
    (directed; $($path:expr),*) => {
        graph!(@build true; $($path),*)
    };
    (@build $directed:expr; $($path:expr),*) => {{
        let mut builder = $crate::graph::GraphBuilder::new($directed, false);

        $(
            let mut iter = $path.into_iter().peekable();
            while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                builder.insert($crate::edge::Edge::new(a, *b));
            }
        )*

        builder.build()
    }};
    ($($path:expr),*) => {
        graph!(@build false; $($path),*)
    };
}

pub mod analysis;
pub mod edge;
pub mod error;
pub mod graph;
pub mod groups;
pub mod io;
pub mod merge;
pub mod pipeline;
pub mod settings;
pub mod table;

pub use error::{Error, Result};
