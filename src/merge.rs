//! Union of network files.

use std::path::Path;

use tracing::info;

use crate::{
    error::{Error, Result},
    graph::{Graph, GraphBuilder},
    io,
    settings::Settings,
};

/// Computes the union of graphs: every node and every edge of the inputs.
///
/// An edge present in several inputs appears once; in weighted graphs it keeps the largest
/// weight observed. Nodes are ordered by first appearance across the inputs.
///
/// # Examples
///
/// ```
/// use netprop::edge::Edge;
/// use netprop::graph::GraphBuilder;
/// use netprop::merge::union;
///
/// let mut first = GraphBuilder::new(false, true);
/// first.insert(Edge::weighted("n1", "n2", 0.5));
/// let mut second = GraphBuilder::new(false, true);
/// second.insert(Edge::weighted("n2", "n1", 0.8));
///
/// let merged = union(&[first.build(), second.build()], false, true);
/// assert_eq!(merged.edge_count(), 1);
/// assert_eq!(merged.edge_weight(0, 1), Some(0.8));
/// ```
pub fn union(graphs: &[Graph], directed: bool, weighted: bool) -> Graph {
    let mut builder = GraphBuilder::new(directed, weighted);
    for graph in graphs {
        builder.extend_from(graph);
    }

    builder.build()
}

/// Loads the network files `filenames` from `network_dir` and computes their union.
pub fn union_files(network_dir: &Path, filenames: &[String], settings: &Settings) -> Result<Graph> {
    if filenames.is_empty() {
        return Err(Error::Config("no network files to merge".to_owned()));
    }

    let mut builder = GraphBuilder::new(settings.is_directed, settings.is_weighted);
    for filename in filenames {
        let graph = io::read_graph(network_dir.join(filename), settings)?;
        builder.extend_from(&graph);
    }

    let merged = builder.build();
    info!(
        "merged {} networks: {} nodes, {} edges",
        filenames.len(),
        merged.node_count(),
        merged.edge_count()
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::edge::Edge;

    #[test]
    fn node_and_edge_union() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let merged = union(&[graph!([a, b, c]), graph!([c, b], [d, a])], false, false);

        assert_eq!(merged.node_ids(), &["a", "b", "c", "d"]);
        assert_eq!(merged.edge_count(), 3);
        assert_eq!(merged.edge_weight(3, 0), Some(1.0));
    }

    #[test]
    fn directed_union_keeps_both_directions() {
        let (a, b) = ("a", "b");
        let merged = union(&[graph!(directed; [a, b]), graph!(directed; [b, a])], true, false);

        assert_eq!(merged.edge_count(), 2);
    }

    #[test]
    fn max_weight() {
        let mut first = GraphBuilder::new(true, true);
        first.insert(Edge::weighted("n1", "n2", 0.8));
        first.insert(Edge::weighted("n2", "n3", 0.1));
        let mut second = GraphBuilder::new(true, true);
        second.insert(Edge::weighted("n1", "n2", 0.5));
        second.insert(Edge::weighted("n2", "n3", 0.3));

        let merged = union(&[first.build(), second.build()], true, true);
        assert_eq!(merged.edge_weight(0, 1), Some(0.8));
        assert_eq!(merged.edge_weight(1, 2), Some(0.3));
    }

    #[test]
    fn files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("net1.txt"), "n1\tn2\t0.5\n").unwrap();
        fs::write(dir.path().join("net2.txt"), "n1\tn2\t0.8\nn2\tn3\t1\n").unwrap();

        let settings = Settings {
            is_weighted: true,
            ..Default::default()
        };
        let merged = union_files(
            dir.path(),
            &["net1.txt".to_owned(), "net2.txt".to_owned()],
            &settings,
        )
        .unwrap();

        assert_eq!(merged.node_count(), 3);
        assert_eq!(merged.edge_count(), 2);
        assert_eq!(merged.edge_weight(0, 1), Some(0.8));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = union_files(dir.path(), &["absent.txt".to_owned()], &Settings::default());

        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn no_files() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            union_files(dir.path(), &[], &Settings::default()),
            Err(Error::Config(_))
        ));
    }
}
