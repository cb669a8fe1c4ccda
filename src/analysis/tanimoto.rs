//! Tanimoto similarity between regulators or between targets.
//!
//! Two nodes are compared on their neighbour sets `A` and `B` as `|A ∩ B| / |A ∪ B|`. Sources
//! (transcription factors) are compared on their targets, targets on their regulators. In an
//! undirected graph every node is both and is compared on all its neighbours.

use std::cmp::Ordering;

use itertools::Itertools;
use nalgebra::DMatrix;

use crate::{
    analysis::{mean, AnalyzerResult, LabeledMatrix, NetworkMean},
    graph::Graph,
};

/// The node set whose members are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeSet {
    /// Nodes with outgoing edges, compared on the nodes they point to.
    Sources,
    /// Nodes with incoming edges, compared on the nodes pointing to them.
    Targets,
}

impl NodeSet {
    fn name(&self) -> &'static str {
        match self {
            NodeSet::Sources => "tfTanimoto",
            NodeSet::Targets => "targetTanimoto",
        }
    }
}

/// Returns the members of `set` along with their sorted neighbour indices.
fn members(graph: &Graph, set: NodeSet) -> Vec<(usize, Vec<usize>)> {
    (0..graph.node_count())
        .filter_map(|i| {
            let links = match set {
                NodeSet::Sources => graph.neighbors(i),
                NodeSet::Targets => graph.in_neighbors(i),
            };
            // Every node of an undirected graph belongs to both sets, isolated ones included.
            if graph.is_directed() && links.is_empty() {
                return None;
            }

            let mut neighbors: Vec<usize> = links.iter().map(|&(j, _)| j).collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            Some((i, neighbors))
        })
        .collect()
}

/// Computes the Tanimoto coefficient of two sorted index sets, zero when both are empty.
fn coefficient(a: &[usize], b: &[usize]) -> f64 {
    let (mut i, mut j, mut shared) = (0, 0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }

    let union = a.len() + b.len() - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Computes the similarity matrix between the members of `set`, returned with the members'
/// node indices.
pub(crate) fn compute_tanimoto(graph: &Graph, set: NodeSet) -> (Vec<usize>, DMatrix<f64>) {
    let members = members(graph, set);
    let m = members.len();
    let mut similarity = DMatrix::<f64>::zeros(m, m);

    for (x, (_, a)) in members.iter().enumerate() {
        similarity[(x, x)] = coefficient(a, a);
    }
    for ((x, (_, a)), (y, (_, b))) in members.iter().enumerate().tuple_combinations() {
        let t = coefficient(a, b);
        similarity[(x, y)] = t;
        similarity[(y, x)] = t;
    }

    (members.into_iter().map(|(i, _)| i).collect(), similarity)
}

pub(crate) fn tanimoto(graph: &Graph, set: NodeSet) -> AnalyzerResult {
    let (indices, similarity) = compute_tanimoto(graph, set);
    let m = indices.len();

    // Mean similarity to the other members; undefined for non-members.
    let mut node_means = vec![f64::NAN; graph.node_count()];
    for (x, &i) in indices.iter().enumerate() {
        if m > 1 {
            let others = similarity.row(x).sum() - similarity[(x, x)];
            node_means[i] = others / (m - 1) as f64;
        }
    }

    let pairs: Vec<f64> = (0..m)
        .tuple_combinations()
        .map(|(x, y)| similarity[(x, y)])
        .collect();

    AnalyzerResult {
        network_means: vec![NetworkMean::new(set.name(), mean(&pairs))],
        node_properties: vec![(set.name().to_owned(), node_means)],
        matrix: Some(LabeledMatrix {
            name: set.name().to_owned(),
            labels: indices.iter().map(|&i| graph.node_id(i).to_owned()).collect(),
            values: similarity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn coefficients() {
        assert_eq!(coefficient(&[1, 2, 3], &[2, 3, 4]), 0.5);
        assert_eq!(coefficient(&[1], &[2]), 0.0);
        assert_eq!(coefficient(&[1, 2], &[1, 2]), 1.0);
        assert_eq!(coefficient(&[], &[]), 0.0);
    }

    #[test]
    fn sources() {
        let (tf1, tf2, g1, g2, g3) = ("tf1", "tf2", "g1", "g2", "g3");
        let graph = graph!(directed; [tf1, g1], [tf1, g2], [tf2, g2], [tf2, g3]);

        let (indices, similarity) = compute_tanimoto(&graph, NodeSet::Sources);
        assert_eq!(indices, vec![0, 3]);
        assert_eq!(similarity[(0, 1)], 1.0 / 3.0);
        assert_eq!(similarity[(0, 0)], 1.0);
    }

    #[test]
    fn targets() {
        let (tf1, tf2, g1, g2) = ("tf1", "tf2", "g1", "g2");
        let graph = graph!(directed; [tf1, g1], [tf1, g2], [tf2, g2]);

        let (indices, similarity) = compute_tanimoto(&graph, NodeSet::Targets);
        // g1 is regulated by tf1, g2 by tf1 and tf2.
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(similarity[(0, 1)], 0.5);
    }

    #[test]
    fn symmetric_and_bounded() {
        let (a, b, c, d, e) = ("a", "b", "c", "d", "e");
        let graph = graph!([a, b, c, d], [b, e, a], [c, e]);

        let (indices, similarity) = compute_tanimoto(&graph, NodeSet::Sources);
        assert_eq!(indices.len(), graph.node_count());

        for x in 0..indices.len() {
            // Every node has a neighbour.
            assert_eq!(similarity[(x, x)], 1.0);
            for y in 0..indices.len() {
                assert_eq!(similarity[(x, y)], similarity[(y, x)]);
                assert!((0.0..=1.0).contains(&similarity[(x, y)]));
            }
        }
    }

    #[test]
    fn isolated_node() {
        let mut builder = GraphBuilder::new(false, false);
        builder.add_node("lonely");
        builder.insert(crate::edge::Edge::new("a", "b"));

        let (_, similarity) = compute_tanimoto(&builder.build(), NodeSet::Sources);
        assert_eq!(similarity[(0, 0)], 0.0);
        assert_eq!(similarity[(0, 1)], 0.0);
    }

    #[test]
    fn result() {
        let (tf1, tf2, tf3, g1, g2) = ("tf1", "tf2", "tf3", "g1", "g2");
        let graph = graph!(directed; [tf1, g1], [tf2, g1], [tf2, g2], [tf3, g2]);

        let result = tanimoto(&graph, NodeSet::Sources);
        let (name, node_means) = &result.node_properties[0];
        assert_eq!(name, "tfTanimoto");

        // Nodes: tf1: 0, g1: 1, tf2: 2, g2: 3, tf3: 4.
        assert_eq!(node_means[0], 0.25);
        assert_eq!(node_means[2], 0.5);
        assert!(node_means[1].is_nan());
        assert!(node_means[3].is_nan());

        // Pairs: (tf1, tf2) 0.5, (tf1, tf3) 0, (tf2, tf3) 0.5.
        assert_eq!(result.network_means[0].value, 1.0 / 3.0);

        let matrix = result.matrix.unwrap();
        assert_eq!(matrix.labels, vec!["tf1", "tf2", "tf3"]);
    }
}
