//! A module for working with edges.

/// A pair of vertices representing a graph edge, with an optional weight.
///
/// Whether the edge has a direction depends on the graph it is inserted into, despite the
/// `source`-`target` nomenclature used.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: Option<f64>,
}

impl<T> Edge<T> {
    /// Creates a new unweighted edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.weight(), None);
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self {
            source,
            target,
            weight: None,
        }
    }

    /// Creates a new weighted edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::edge::Edge;
    ///
    /// let edge = Edge::weighted("a", "b", 0.5);
    /// assert_eq!(edge.weight(), Some(0.5));
    /// ```
    pub fn weighted(source: T, target: T, weight: f64) -> Self {
        Self {
            source,
            target,
            weight: Some(weight),
        }
    }

    /// Returns the first vertice forming the edge.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertice forming the edge.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the weight of the edge, `None` for unweighted edges.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns whether the edge starts and ends at the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the endpoints identifying this edge in a graph.
    ///
    /// For undirected graphs the endpoints are ordered so that `(a, b)` and `(b, a)` share a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::edge::Edge;
    ///
    /// assert_eq!(Edge::new(2, 1).key(false), (1, 2));
    /// assert_eq!(Edge::new(2, 1).key(true), (2, 1));
    /// ```
    pub fn key(&self, directed: bool) -> (T, T)
    where
        T: Copy + Ord,
    {
        let (a, b) = (self.source, self.target);

        if directed || a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Maps the vertices of the edge, keeping its weight.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Edge<U> {
        Edge {
            source: f(self.source),
            target: f(self.target),
            weight: self.weight,
        }
    }
}
