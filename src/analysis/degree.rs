use crate::{
    analysis::{mean, AnalyzerResult, NetworkMean},
    graph::Graph,
};

fn counts(links: impl Fn(usize) -> usize, n: usize) -> Vec<f64> {
    (0..n).map(|i| links(i) as f64).collect()
}

fn strengths(graph: &Graph, incoming: bool) -> Vec<f64> {
    (0..graph.node_count())
        .map(|i| {
            let links = if incoming {
                graph.in_neighbors(i)
            } else {
                graph.neighbors(i)
            };
            links.iter().map(|&(_, w)| w).sum()
        })
        .collect()
}

/// Degrees and strengths of an undirected graph, counted from the edge ends so a self-loop adds
/// two to its node.
fn undirected_degrees(graph: &Graph) -> (Vec<f64>, Vec<f64>) {
    let n = graph.node_count();
    let mut degrees = vec![0.0; n];
    let mut strengths = vec![0.0; n];

    for edge in graph.edges() {
        let weight = edge.weight().unwrap_or(1.0);
        for end in [*edge.source(), *edge.target()] {
            degrees[end] += 1.0;
            strengths[end] += weight;
        }
    }

    (degrees, strengths)
}

/// Degree of each node: a `degree` column for undirected graphs, `outdegree` and `indegree`
/// columns for directed ones, and the matching strength columns (sums of weights) when the graph
/// is weighted.
pub(crate) fn degree(graph: &Graph) -> AnalyzerResult {
    let n = graph.node_count();
    let mut node_properties = Vec::new();

    if graph.is_directed() {
        node_properties.push(("outdegree".to_owned(), counts(|i| graph.neighbors(i).len(), n)));
        node_properties.push((
            "indegree".to_owned(),
            counts(|i| graph.in_neighbors(i).len(), n),
        ));
        if graph.is_weighted() {
            node_properties.push(("outstrength".to_owned(), strengths(graph, false)));
            node_properties.push(("instrength".to_owned(), strengths(graph, true)));
        }
    } else {
        let (degrees, strengths) = undirected_degrees(graph);
        node_properties.push(("degree".to_owned(), degrees));
        if graph.is_weighted() {
            node_properties.push(("strength".to_owned(), strengths));
        }
    }

    // In- and out-degrees share the same mean, the first column stands for both.
    let network_means = vec![NetworkMean::new("meanDegree", mean(&node_properties[0].1))];

    AnalyzerResult {
        node_properties,
        network_means,
        matrix: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge::Edge, graph::GraphBuilder};

    #[test]
    fn undirected() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([a, b, c], [a, c], [d, a]);
        let result = degree(&graph);

        assert_eq!(result.node_properties.len(), 1);
        assert_eq!(result.node_properties[0].1, vec![3.0, 2.0, 2.0, 1.0]);
        assert_eq!(result.network_means[0].value, 2.0);
    }

    #[test]
    fn degree_sum_is_twice_edge_count() {
        let (a, b, c, d, e) = ("a", "b", "c", "d", "e");
        let graph = graph!([a, b, c, d, e, a, c], [b, d]);
        let result = degree(&graph);

        let sum: f64 = result.node_properties[0].1.iter().sum();
        assert_eq!(sum, 2.0 * graph.edge_count() as f64);
    }

    #[test]
    fn self_loop_counts_twice() {
        let (a, b) = ("a", "b");
        let graph = graph!([a, b, b]);
        let result = degree(&graph);

        assert_eq!(result.node_properties[0].1, vec![1.0, 3.0]);
        let sum: f64 = result.node_properties[0].1.iter().sum();
        assert_eq!(sum, 2.0 * graph.edge_count() as f64);

        let graph = graph!(directed; [a, b, b]);
        let result = degree(&graph);
        // A directed loop leaves and enters its node once.
        assert_eq!(result.node_properties[0].1, vec![1.0, 1.0]);
        assert_eq!(result.node_properties[1].1, vec![0.0, 2.0]);
    }

    #[test]
    fn weighted_self_loop() {
        let mut builder = GraphBuilder::new(false, true);
        builder.insert(Edge::weighted("a", "b", 0.5));
        builder.insert(Edge::weighted("b", "b", 0.25));
        let result = degree(&builder.build());

        assert_eq!(result.node_properties[1].0, "strength");
        assert_eq!(result.node_properties[1].1, vec![0.5, 1.0]);
    }

    #[test]
    fn directed() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!(directed; [a, b, c], [a, c]);
        let result = degree(&graph);

        assert_eq!(result.node_properties[0].0, "outdegree");
        assert_eq!(result.node_properties[0].1, vec![2.0, 1.0, 0.0]);
        assert_eq!(result.node_properties[1].0, "indegree");
        assert_eq!(result.node_properties[1].1, vec![0.0, 1.0, 2.0]);
        assert_eq!(result.network_means[0].value, 1.0);
    }

    #[test]
    fn weighted() {
        let mut builder = GraphBuilder::new(true, true);
        builder.insert(Edge::weighted("a", "b", 0.5));
        builder.insert(Edge::weighted("a", "c", 0.25));
        builder.insert(Edge::weighted("c", "b", 2.0));
        let result = degree(&builder.build());

        let names: Vec<&str> = result.node_properties.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["outdegree", "indegree", "outstrength", "instrength"]);
        assert_eq!(result.node_properties[2].1, vec![0.75, 0.0, 2.0]);
        assert_eq!(result.node_properties[3].1, vec![0.0, 2.5, 0.25]);
    }
}
