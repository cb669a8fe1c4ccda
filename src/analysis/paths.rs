//! Single-source shortest path searches shared by the path-based analyzers.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

use crate::{
    error::{Error, Result},
    graph::Graph,
};

/// The outcome of a shortest path search from one source.
pub(crate) struct Search {
    /// Reached nodes in order of non-decreasing distance, starting with the source.
    pub order: Vec<usize>,
    /// Number of shortest paths from the source to each node.
    pub sigma: Vec<f64>,
    /// Predecessors of each node on its shortest paths.
    pub predecessors: Vec<Vec<usize>>,
    /// Distance from the source, infinite if unreachable.
    pub distance: Vec<f64>,
}

impl Search {
    fn new(num_nodes: usize, source: usize) -> Self {
        let mut search = Self {
            order: Vec::with_capacity(num_nodes),
            sigma: vec![0.0; num_nodes],
            predecessors: vec![Vec::new(); num_nodes],
            distance: vec![f64::INFINITY; num_nodes],
        };
        search.sigma[source] = 1.0;
        search.distance[source] = 0.0;

        search
    }
}

/// Searches the graph from `source`, following edge directions, breadth-first for unweighted
/// graphs and with Dijkstra's algorithm (weights as lengths) for weighted ones.
pub(crate) fn single_source(graph: &Graph, source: usize) -> Search {
    if graph.is_weighted() {
        dijkstra(graph, source)
    } else {
        breadth_first(graph, source)
    }
}

/// Edge weights are used as lengths, which must not be negative.
pub(crate) fn check_lengths(graph: &Graph) -> Result<()> {
    if !graph.is_weighted() {
        return Ok(());
    }

    match graph.edges().iter().find(|e| e.weight().is_some_and(|w| w < 0.0)) {
        Some(edge) => Err(Error::Analysis(format!(
            "negative edge length between {} and {}",
            graph.node_id(*edge.source()),
            graph.node_id(*edge.target())
        ))),
        None => Ok(()),
    }
}

fn breadth_first(graph: &Graph, source: usize) -> Search {
    let mut search = Search::new(graph.node_count(), source);
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        search.order.push(v);

        for &(w, _) in graph.neighbors(v) {
            if search.distance[w].is_infinite() {
                search.distance[w] = search.distance[v] + 1.0;
                queue.push_back(w);
            }
            if search.distance[w] == search.distance[v] + 1.0 {
                search.sigma[w] += search.sigma[v];
                search.predecessors[w].push(v);
            }
        }
    }

    search
}

/// Min-heap entry.
#[derive(PartialEq)]
struct Candidate {
    distance: f64,
    node: usize,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the closest node first.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &Graph, source: usize) -> Search {
    let n = graph.node_count();
    let mut search = Search::new(n, source);
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        distance: 0.0,
        node: source,
    });

    while let Some(Candidate { distance, node: v }) = heap.pop() {
        if settled[v] || distance > search.distance[v] {
            continue;
        }
        settled[v] = true;
        search.order.push(v);

        for &(w, weight) in graph.neighbors(v) {
            if settled[w] {
                continue;
            }

            let candidate = distance + weight;
            match candidate.total_cmp(&search.distance[w]) {
                Ordering::Less => {
                    search.distance[w] = candidate;
                    search.sigma[w] = search.sigma[v];
                    search.predecessors[w].clear();
                    search.predecessors[w].push(v);
                    heap.push(Candidate {
                        distance: candidate,
                        node: w,
                    });
                }
                Ordering::Equal => {
                    search.sigma[w] += search.sigma[v];
                    search.predecessors[w].push(v);
                }
                Ordering::Greater => {}
            }
        }
    }

    search
}
