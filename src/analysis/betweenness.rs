//! A module for performing the multi-threaded computation of betweenness

use crate::{
    analysis::{mean, paths, workers, AnalyzerResult, NetworkMean},
    error::Result,
    graph::Graph,
};

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs",
/// with the search swapped for Dijkstra's on weighted graphs.
fn betweenness_for_node(index: usize, graph: &Graph, betweenness_count: &mut [f64]) {
    let paths::Search {
        mut order,
        sigma,
        predecessors,
        ..
    } = paths::single_source(graph, index);
    let mut delta: Vec<f64> = vec![0.0; graph.node_count()];

    while let Some(w) = order.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Computes the betweenness centrality of every node, normalized by the number of node pairs
/// not involving it.
///
/// Undirected paths are found once from each end, which cancels the halving of the pair count,
/// so both cases divide by `(n - 1)(n - 2)`. Graphs with fewer than three nodes have no paths
/// through any node and score zero throughout.
pub(crate) fn compute_betweenness(graph: &Graph, num_threads: usize) -> Result<Vec<f64>> {
    paths::check_lengths(graph)?;

    let num_nodes = graph.node_count();
    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];
    if num_nodes < 3 {
        return Ok(betweenness_count);
    }

    // each worker thread keeps its own cache of data
    // these are returned when the thread finishes
    // and then summed here
    let counts = workers::for_each_source(
        num_nodes,
        num_threads,
        || vec![0.0; num_nodes],
        |index, count: &mut Vec<f64>| betweenness_for_node(index, graph, count),
    )?;

    let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
    for b in counts {
        for i in 0..num_nodes {
            betweenness_count[i] += b[i] / divisor;
        }
    }

    Ok(betweenness_count)
}

pub(crate) fn betweenness(graph: &Graph, num_threads: usize) -> Result<AnalyzerResult> {
    let values = compute_betweenness(graph, num_threads)?;

    Ok(AnalyzerResult {
        network_means: vec![NetworkMean::new("meanBetweenness", mean(&values))],
        node_properties: vec![("betweenness".to_owned(), values)],
        matrix: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::Edge, graph::GraphBuilder};

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn path() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([a, b, c, d]);

        // Unnormalized, b and c each lie on two of the paths.
        let expected = [0.0, 2.0 / 3.0, 2.0 / 3.0, 0.0];
        assert_close(&compute_betweenness(&graph, 1).unwrap(), &expected);
        assert_close(&compute_betweenness(&graph, 3).unwrap(), &expected);
    }

    #[test]
    fn star() {
        let (hub, a, b, c) = ("hub", "a", "b", "c");
        let graph = graph!([a, hub, b], [hub, c]);

        // Every path between leaves goes through the hub.
        let values = compute_betweenness(&graph, 2).unwrap();
        assert_close(&values, &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn split_paths() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([a, b, c], [a, d, c]);

        // A cycle of four: each node carries half of the one path between its neighbours.
        assert_close(
            &compute_betweenness(&graph, 1).unwrap(),
            &[1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0],
        );
    }

    #[test]
    fn directed_path() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!(directed; [a, b, c]);

        assert_close(&compute_betweenness(&graph, 1).unwrap(), &[0.0, 0.5, 0.0]);
    }

    #[test]
    fn weighted_detour() {
        let mut builder = GraphBuilder::new(false, true);
        builder.insert(Edge::weighted("a", "c", 5.0));
        builder.insert(Edge::weighted("a", "b", 1.0));
        builder.insert(Edge::weighted("b", "c", 1.5));

        // The heavy a-c edge is bypassed through b.
        let values = compute_betweenness(&builder.build(), 1).unwrap();
        assert_close(&values, &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn small_graphs() {
        assert_eq!(compute_betweenness(&graph!(["a", "b"]), 1).unwrap(), vec![0.0, 0.0]);
    }

    #[test]
    fn result() {
        let graph = graph!(["a", "b", "c"]);
        let result = betweenness(&graph, 1).unwrap();

        assert_eq!(result.node_properties[0].0, "betweenness");
        assert_eq!(result.network_means[0].value, 1.0 / 3.0);
    }
}
