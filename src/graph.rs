//! A module for working with graphs.

use std::{
    collections::{hash_map::Entry, HashMap},
    io::Write,
    path::{Path, PathBuf},
};

use nalgebra::DMatrix;

use crate::{edge::Edge, error::Result, io};

pub(crate) const MIN_NUM_THREADS: usize = 1;
pub(crate) const MAX_NUM_THREADS: usize = 128;

/// A neighbouring node index and the weight of the edge leading to it (1.0 if unweighted).
pub type Link = (usize, f64);

/// A directed or undirected, weighted or unweighted graph.
///
/// Graphs are assembled with a [`GraphBuilder`] and are immutable afterwards, so analyzers can
/// share one instance freely. Nodes are indexed densely from `0` in order of first appearance.
#[derive(Clone, Debug)]
pub struct Graph {
    /// Node ids, by index.
    ids: Vec<String>,
    /// A mapping of node ids to their indices.
    index: HashMap<String, usize>,
    /// The unique edges, in insertion order.
    edges: Vec<Edge<usize>>,
    /// Edge weights keyed by [`Edge::key`].
    weights: HashMap<(usize, usize), f64>,
    /// Outgoing links per node; for undirected graphs, all incident links.
    out_links: Vec<Vec<Link>>,
    /// Incoming links per node, only populated for directed graphs.
    in_links: Vec<Vec<Link>>,
    directed: bool,
    weighted: bool,
}

impl Graph {
    /// Returns the node count of the graph.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Returns the id of the node at `index`.
    pub fn node_id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Returns the node ids ordered by index.
    pub fn node_ids(&self) -> &[String] {
        &self.ids
    }

    /// Returns the index of the node with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the edges of the graph in insertion order.
    pub fn edges(&self) -> &[Edge<usize>] {
        &self.edges
    }

    /// Returns the links leaving `index`, or all incident links for undirected graphs.
    pub fn neighbors(&self, index: usize) -> &[Link] {
        &self.out_links[index]
    }

    /// Returns the links entering `index`, which are the incident links for undirected graphs.
    pub fn in_neighbors(&self, index: usize) -> &[Link] {
        if self.directed {
            &self.in_links[index]
        } else {
            &self.out_links[index]
        }
    }

    /// Returns the weight of the edge from `i` to `j`, `None` if there is no such edge.
    ///
    /// Present edges of unweighted graphs weigh `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::edge::Edge;
    /// use netprop::graph::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new(false, false);
    /// builder.insert(Edge::new("a", "b"));
    /// let graph = builder.build();
    ///
    /// assert_eq!(graph.edge_weight(1, 0), Some(1.0));
    /// assert_eq!(graph.edge_weight(0, 0), None);
    /// ```
    pub fn edge_weight(&self, i: usize, j: usize) -> Option<f64> {
        self.weights.get(&Edge::new(i, j).key(self.directed)).copied()
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count.
        let pec = if self.directed {
            vc * (vc - 1.0)
        } else {
            vc * (vc - 1.0) / 2.0
        };
        // Actual edges divided by the possible edges gives the density.
        ec / pec
    }

    /// Constructs the (weighted) adjacency matrix for this graph, ordered by node index.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netprop::edge::Edge;
    /// use netprop::graph::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new(false, false);
    /// builder.insert(Edge::new("a", "b"));
    /// assert_eq!(
    ///     builder.build().adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (i, links) in self.out_links.iter().enumerate() {
            for &(j, weight) in links {
                matrix[(i, j)] = weight;
            }
        }

        matrix
    }

    /// Writes the graph as a tab-delimited edge list, one edge per line, with a weight column
    /// for weighted graphs.
    pub fn write(&self, path: impl AsRef<Path>, compress: bool) -> Result<PathBuf> {
        let (path, mut writer) = io::create_writer(path.as_ref(), compress)?;

        for edge in &self.edges {
            write!(
                writer,
                "{}\t{}",
                self.ids[*edge.source()],
                self.ids[*edge.target()]
            )?;
            if self.weighted {
                write!(writer, "\t{}", io::format_value(edge.weight().unwrap_or(1.0)))?;
            }
            writeln!(writer)?;
        }
        writer.finish()?;

        Ok(path)
    }
}

/// Collects nodes and edges and produces an immutable [`Graph`].
///
/// Inserting an edge whose endpoints are already connected keeps a single edge; weighted graphs
/// keep the maximum of the observed weights.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<Edge<usize>>,
    /// Position of each edge in `edges`, keyed by [`Edge::key`].
    positions: HashMap<(usize, usize), usize>,
    directed: bool,
    weighted: bool,
}

impl GraphBuilder {
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            ids: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            positions: HashMap::new(),
            directed,
            weighted,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Returns whether a node with the given id has been added.
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Adds a node if it doesn't exist yet and returns its index.
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }

        let i = self.ids.len();
        self.ids.push(id.to_owned());
        self.index.insert(id.to_owned(), i);

        i
    }

    /// Inserts an edge, adding its endpoints as needed. Returns whether the edge is new.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::edge::Edge;
    /// use netprop::graph::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new(false, true);
    /// assert!(builder.insert(Edge::weighted("a", "b", 0.5)));
    /// assert!(!builder.insert(Edge::weighted("b", "a", 0.8)));
    ///
    /// let graph = builder.build();
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.edge_weight(0, 1), Some(0.8));
    /// ```
    pub fn insert(&mut self, edge: Edge<&str>) -> bool {
        let edge = edge.map(|id| self.add_node(id));
        let weight = if self.weighted {
            Some(edge.weight().unwrap_or(1.0))
        } else {
            None
        };

        match self.positions.entry(edge.key(self.directed)) {
            Entry::Occupied(entry) => {
                let existing = &mut self.edges[*entry.get()];
                if let (Some(old), Some(new)) = (existing.weight(), weight) {
                    if new > old {
                        *existing = Edge::weighted(*existing.source(), *existing.target(), new);
                    }
                }
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(self.edges.len());
                self.edges.push(match weight {
                    Some(w) => Edge::weighted(*edge.source(), *edge.target(), w),
                    None => Edge::new(*edge.source(), *edge.target()),
                });
                true
            }
        }
    }

    /// Inserts every edge of `graph`, translating its node indices to this builder's ids.
    pub fn extend_from(&mut self, graph: &Graph) {
        for node in graph.node_ids() {
            self.add_node(node);
        }
        for edge in graph.edges() {
            let edge = edge.clone().map(|i| graph.node_id(i));
            self.insert(edge);
        }
    }

    /// Freezes the collected nodes and edges into a graph.
    pub fn build(self) -> Graph {
        let n = self.ids.len();
        let mut out_links: Vec<Vec<Link>> = vec![Vec::new(); n];
        let mut in_links: Vec<Vec<Link>> = vec![Vec::new(); if self.directed { n } else { 0 }];
        let mut weights = HashMap::with_capacity(self.edges.len());

        for edge in &self.edges {
            let (s, t) = (*edge.source(), *edge.target());
            let w = edge.weight().unwrap_or(1.0);

            weights.insert(edge.key(self.directed), w);
            out_links[s].push((t, w));
            if self.directed {
                in_links[t].push((s, w));
            } else if !edge.is_loop() {
                out_links[t].push((s, w));
            }
        }

        Graph {
            ids: self.ids,
            index: self.index,
            edges: self.edges,
            weights,
            out_links,
            in_links,
            directed: self.directed,
            weighted: self.weighted,
        }
    }
}
