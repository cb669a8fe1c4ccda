//! Graph metric analyzers.
//!
//! The analyzer set is closed: each [`Analyzer`] variant is selected from the [`Settings`] and
//! dispatched through [`Analyzer::run`], which checks the graph and forwards to the module
//! computing the metric.

use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    graph::Graph,
    settings::Settings,
    table,
};

mod betweenness;
mod clustering;
mod degree;
mod kernel;
mod paths;
mod shortest_path;
mod tanimoto;
mod workers;

pub use tanimoto::NodeSet;

/// A named node-level vector, indexed like the graph's nodes.
pub type NodeProperty = (String, Vec<f64>);

/// A named network-level mean.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkMean {
    pub name: String,
    pub value: f64,
}

impl NetworkMean {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A dense matrix with row and column labels, too large for the node property table.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledMatrix {
    /// Appended to the basic filename of the network when written.
    pub name: String,
    /// Row and column labels.
    pub labels: Vec<String>,
    pub values: DMatrix<f64>,
}

impl LabeledMatrix {
    /// Writes the matrix to `<dir>/<basic_filename>_<name>.txt` and returns the written path.
    pub fn write_supplemental(
        &self,
        dir: &Path,
        basic_filename: &str,
        compress: bool,
    ) -> Result<PathBuf> {
        let path = dir.join(format!("{basic_filename}_{}.txt", self.name));
        table::write_matrix(&path, self, compress)
    }
}

/// What an analyzer produced for one graph.
#[derive(Clone, Debug, Default)]
pub struct AnalyzerResult {
    /// Node-level vectors, in declaration order.
    pub node_properties: Vec<NodeProperty>,
    /// Network-level means, in declaration order.
    pub network_means: Vec<NetworkMean>,
    /// Supplemental matrix output, if any.
    pub matrix: Option<LabeledMatrix>,
}

/// Parameters of the p-step diffusion kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    /// Number of steps, the highest power of the adjacency matrix.
    pub p: usize,
    /// Decay factor applied per step.
    pub alpha: f64,
    /// Row-normalize the adjacency matrix first.
    pub normalize: bool,
}

/// The graph metric analyzers.
#[derive(Clone, Debug, PartialEq)]
pub enum Analyzer {
    /// Out-degree (and in-degree for directed graphs), plus strength for weighted graphs.
    Degree,
    /// Normalized shortest-path betweenness centrality.
    Betweenness { num_threads: usize },
    /// Local clustering coefficient, computed on the undirected view of the graph.
    ClusteringCoefficient,
    /// Mean shortest-path lengths and the fraction of unreachable pairs.
    ShortestPath {
        num_threads: usize,
        export_node_properties: bool,
    },
    /// Truncated power series `Σ_{k=0}^{p} α^k A^k` over the adjacency matrix.
    PStepKernel {
        params: KernelParams,
        export_node_properties: bool,
    },
    /// Tanimoto similarity between the members of a node set.
    Tanimoto {
        set: NodeSet,
        export_node_properties: bool,
    },
}

impl Analyzer {
    /// Selects the analyzers switched on in `settings`, in their fixed order: degree,
    /// betweenness and clustering first, then shortest paths, the p-step kernel and the Tanimoto
    /// similarities between sources and between targets.
    pub fn select(settings: &Settings) -> Vec<Analyzer> {
        let export_node_properties = settings.export_node_properties;
        let num_threads = settings.num_threads;
        let mut analyzers = Vec::new();

        if settings.compute_degree {
            analyzers.push(Analyzer::Degree);
        }
        if settings.compute_betweenness {
            analyzers.push(Analyzer::Betweenness { num_threads });
        }
        if settings.compute_clustering_coefficient {
            analyzers.push(Analyzer::ClusteringCoefficient);
        }
        if settings.compute_shortest_path_lengths {
            analyzers.push(Analyzer::ShortestPath {
                num_threads,
                export_node_properties,
            });
        }
        if settings.compute_pstep_kernel {
            analyzers.push(Analyzer::PStepKernel {
                params: KernelParams {
                    p: settings.pstep_kernel_p,
                    alpha: settings.pstep_kernel_alpha,
                    normalize: settings.pstep_kernel_normalize,
                },
                export_node_properties,
            });
        }
        if settings.compute_tf_tanimoto {
            analyzers.push(Analyzer::Tanimoto {
                set: NodeSet::Sources,
                export_node_properties,
            });
        }
        if settings.compute_target_tanimoto {
            analyzers.push(Analyzer::Tanimoto {
                set: NodeSet::Targets,
                export_node_properties,
            });
        }

        analyzers
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analyzer::Degree => "degree",
            Analyzer::Betweenness { .. } => "betweenness",
            Analyzer::ClusteringCoefficient => "clustering coefficient",
            Analyzer::ShortestPath { .. } => "shortest paths",
            Analyzer::PStepKernel { .. } => "p-step kernel",
            Analyzer::Tanimoto {
                set: NodeSet::Sources,
                ..
            } => "tanimoto (sources)",
            Analyzer::Tanimoto {
                set: NodeSet::Targets,
                ..
            } => "tanimoto (targets)",
        }
    }

    /// Runs the analyzer on `graph`.
    ///
    /// Fails if the graph has no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::analysis::Analyzer;
    /// use netprop::edge::Edge;
    /// use netprop::graph::GraphBuilder;
    ///
    /// let mut builder = GraphBuilder::new(false, false);
    /// builder.insert(Edge::new("a", "b"));
    /// builder.insert(Edge::new("a", "c"));
    ///
    /// let result = Analyzer::Degree.run(&builder.build()).unwrap();
    /// assert_eq!(result.node_properties[0], ("degree".to_owned(), vec![2.0, 1.0, 1.0]));
    /// ```
    pub fn run(&self, graph: &Graph) -> Result<AnalyzerResult> {
        if graph.node_count() == 0 {
            return Err(Error::Analysis(format!(
                "can't compute {} of an empty graph",
                self.name()
            )));
        }

        let mut result = match self {
            Analyzer::Degree => degree::degree(graph),
            Analyzer::Betweenness { num_threads } => {
                betweenness::betweenness(graph, *num_threads)?
            }
            Analyzer::ClusteringCoefficient => clustering::clustering_coefficient(graph),
            Analyzer::ShortestPath { num_threads, .. } => {
                shortest_path::shortest_paths(graph, *num_threads)?
            }
            Analyzer::PStepKernel { params, .. } => kernel::pstep_kernel(graph, params),
            Analyzer::Tanimoto { set, .. } => tanimoto::tanimoto(graph, *set),
        };

        if !self.exports_node_properties() {
            result.node_properties.clear();
        }

        Ok(result)
    }

    fn exports_node_properties(&self) -> bool {
        match self {
            Analyzer::Degree | Analyzer::Betweenness { .. } | Analyzer::ClusteringCoefficient => {
                true
            }
            Analyzer::ShortestPath {
                export_node_properties,
                ..
            }
            | Analyzer::PStepKernel {
                export_node_properties,
                ..
            }
            | Analyzer::Tanimoto {
                export_node_properties,
                ..
            } => *export_node_properties,
        }
    }
}

/// Mean of the values that aren't `NaN`, `NaN` if there are none.
pub(crate) fn mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
