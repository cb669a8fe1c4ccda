//! A module for performing the multi-threaded computation of shortest path lengths

use crate::{
    analysis::{paths, workers, AnalyzerResult, NetworkMean},
    error::Result,
    graph::Graph,
};

/// Path lengths found from one source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct SourceTotals {
    /// Sum of the distances to every other reachable node.
    total_path_length: f64,
    /// Number of other nodes reached.
    reached: usize,
}

fn totals_for_node(index: usize, graph: &Graph) -> SourceTotals {
    let search = paths::single_source(graph, index);

    search
        .order
        .iter()
        .filter(|&&j| j != index)
        .fold(SourceTotals::default(), |acc, &j| SourceTotals {
            total_path_length: acc.total_path_length + search.distance[j],
            reached: acc.reached + 1,
        })
}

/// Computes the mean shortest path length from each node, over the nodes it reaches.
///
/// Returns the per-node means (`NaN` for nodes reaching nothing), the network mean over all
/// reachable ordered pairs, and the fraction of ordered pairs that are unreachable.
pub(crate) fn compute_shortest_paths(
    graph: &Graph,
    num_threads: usize,
) -> Result<(Vec<f64>, f64, f64)> {
    paths::check_lengths(graph)?;

    let num_nodes = graph.node_count();
    let per_thread = workers::for_each_source(
        num_nodes,
        num_threads,
        Vec::new,
        |index, found: &mut Vec<(usize, SourceTotals)>| {
            found.push((index, totals_for_node(index, graph)))
        },
    )?;

    let mut totals = vec![SourceTotals::default(); num_nodes];
    for (index, t) in per_thread.into_iter().flatten() {
        totals[index] = t;
    }

    let node_means = totals
        .iter()
        .map(|t| {
            if t.reached == 0 {
                f64::NAN
            } else {
                t.total_path_length / t.reached as f64
            }
        })
        .collect();

    let total_length: f64 = totals.iter().map(|t| t.total_path_length).sum();
    let reached: usize = totals.iter().map(|t| t.reached).sum();
    let pairs = num_nodes * (num_nodes - 1);

    let network_mean = if reached == 0 {
        f64::NAN
    } else {
        total_length / reached as f64
    };
    let unreachable = if pairs == 0 {
        0.0
    } else {
        (pairs - reached) as f64 / pairs as f64
    };

    Ok((node_means, network_mean, unreachable))
}

pub(crate) fn shortest_paths(graph: &Graph, num_threads: usize) -> Result<AnalyzerResult> {
    let (node_means, network_mean, unreachable) = compute_shortest_paths(graph, num_threads)?;

    Ok(AnalyzerResult {
        node_properties: vec![("meanShortestPathLength".to_owned(), node_means)],
        network_means: vec![
            NetworkMean::new("meanShortestPathLength", network_mean),
            NetworkMean::new("fractionUnreachable", unreachable),
        ],
        matrix: None,
    })
}
