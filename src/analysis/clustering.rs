//! Local clustering coefficient.
//!
//! Directed graphs are analysed as undirected: two nodes are neighbours if an edge links them in
//! either direction. Weights are ignored.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{
    analysis::{mean, AnalyzerResult, NetworkMean},
    graph::Graph,
};

/// Returns the undirected neighbour set of every node, self-loops excluded.
fn undirected_neighbors(graph: &Graph) -> Vec<BTreeSet<usize>> {
    (0..graph.node_count())
        .map(|i| {
            graph
                .neighbors(i)
                .iter()
                .chain(graph.in_neighbors(i))
                .map(|&(j, _)| j)
                .filter(|&j| j != i)
                .collect()
        })
        .collect()
}

/// Computes the fraction of connected neighbour pairs for each node, zero for nodes with fewer
/// than two neighbours.
pub(crate) fn compute_clustering_coefficient(graph: &Graph) -> Vec<f64> {
    let neighbors = undirected_neighbors(graph);

    neighbors
        .iter()
        .map(|set| {
            let k = set.len();
            if k < 2 {
                return 0.0;
            }

            let links = set
                .iter()
                .tuple_combinations()
                .filter(|(u, w)| neighbors[**u].contains(*w))
                .count();

            links as f64 / (k * (k - 1) / 2) as f64
        })
        .collect()
}

pub(crate) fn clustering_coefficient(graph: &Graph) -> AnalyzerResult {
    let values = compute_clustering_coefficient(graph);

    AnalyzerResult {
        network_means: vec![NetworkMean::new("meanClustCoeff", mean(&values))],
        node_properties: vec![("clustCoeff".to_owned(), values)],
        matrix: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!([a, b, c, a]);

        assert_eq!(compute_clustering_coefficient(&graph), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn low_degree() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([a, b], [c, c], [d, d, a]);

        // Degrees below two always score zero, self-loops don't count as neighbours.
        let values = compute_clustering_coefficient(&graph);
        assert_eq!(values[1], 0.0);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn partial() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([b, a, c], [a, d], [b, c]);

        // a has three neighbours and one of their three pairs is linked.
        assert_eq!(compute_clustering_coefficient(&graph)[1], 1.0 / 3.0);
    }

    #[test]
    fn directed_as_undirected() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!(directed; [a, b], [c, a], [b, c]);

        assert_eq!(compute_clustering_coefficient(&graph), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn reciprocal_edges() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!(directed; [a, b, a], [a, c]);

        // b and c aren't linked; the two a-b edges count as one neighbour.
        assert_eq!(compute_clustering_coefficient(&graph)[0], 0.0);
    }

    #[test]
    fn result() {
        let graph = graph!(["a", "b", "c", "a"], ["a", "d"]);
        let result = clustering_coefficient(&graph);

        assert_eq!(result.node_properties[0].1, vec![1.0 / 3.0, 1.0, 1.0, 0.0]);
        assert_eq!(result.network_means[0].name, "meanClustCoeff");
    }
}
