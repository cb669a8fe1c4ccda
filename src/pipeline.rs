//! A module running the selected analyzers on a graph and collecting their results.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use tracing::{debug, info};

use crate::{
    analysis::{Analyzer, LabeledMatrix, NetworkMean},
    error::{Error, Result},
    graph::Graph,
    io,
    settings::Settings,
    table::PropertyTable,
};

/// Everything the analyzers produced for one graph.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Node properties of every analyzer, in analyzer order.
    pub table: PropertyTable,
    /// Network means of every analyzer, in analyzer order.
    pub network_means: Vec<NetworkMean>,
    /// Supplemental matrices, in analyzer order.
    pub matrices: Vec<LabeledMatrix>,
}

/// Runs the analyzers selected by the settings, in their fixed order, on one graph at a time.
///
/// # Examples
///
/// ```
/// use netprop::edge::Edge;
/// use netprop::graph::GraphBuilder;
/// use netprop::pipeline::AnalysisPipeline;
/// use netprop::settings::Settings;
///
/// let settings = Settings {
///     compute_clustering_coefficient: true,
///     ..Default::default()
/// };
/// let pipeline = AnalysisPipeline::new(&settings).unwrap();
///
/// let mut builder = GraphBuilder::new(false, false);
/// builder.insert(Edge::new("a", "b"));
/// builder.insert(Edge::new("b", "c"));
/// builder.insert(Edge::new("c", "a"));
///
/// let output = pipeline.run(&builder.build()).unwrap();
/// assert_eq!(output.table.column("clustCoeff"), Some(&[1.0, 1.0, 1.0][..]));
/// ```
#[derive(Clone, Debug)]
pub struct AnalysisPipeline {
    analyzers: Vec<Analyzer>,
    settings: Settings,
}

impl AnalysisPipeline {
    /// Selects the analyzers from the settings.
    ///
    /// Fails if the settings are invalid or switch on no analyzer at all.
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let analyzers = Analyzer::select(settings);
        if analyzers.is_empty() {
            return Err(Error::Config("no network property selected".to_owned()));
        }

        Ok(Self {
            analyzers,
            settings: settings.clone(),
        })
    }

    pub fn analyzers(&self) -> &[Analyzer] {
        &self.analyzers
    }

    /// Runs every analyzer on `graph` and assembles their outputs.
    ///
    /// Fails if any analyzer fails or produces a node property that doesn't match the node
    /// count of the graph.
    pub fn run(&self, graph: &Graph) -> Result<PipelineOutput> {
        let mut table = PropertyTable::new(graph.node_ids().to_vec());
        let mut network_means = Vec::new();
        let mut matrices = Vec::new();

        for analyzer in &self.analyzers {
            let start = Instant::now();
            let result = analyzer.run(graph)?;
            debug!("computed {} in {:?}", analyzer.name(), start.elapsed());

            for (name, values) in result.node_properties {
                table.push(name, values)?;
            }
            network_means.extend(result.network_means);
            matrices.extend(result.matrix);
        }

        info!(
            "analysed {} nodes, {} edges: {} node properties, {} network means",
            graph.node_count(),
            graph.edge_count(),
            table.columns().len(),
            network_means.len()
        );

        Ok(PipelineOutput {
            table,
            network_means,
            matrices,
        })
    }

    /// Writes the node property table and the supplemental matrices of a graph loaded from
    /// `network_file` to the output directory, returning the written paths.
    ///
    /// The table is named `<basic>_nodeProperties[_weighted]_dir.txt` (or `_undir`); it is
    /// skipped when no node property was produced. Matrices are only written when dense
    /// exports are enabled.
    pub fn save(
        &self,
        graph: &Graph,
        output: &PipelineOutput,
        network_file: &Path,
    ) -> Result<Vec<PathBuf>> {
        let settings = &self.settings;
        let basic = io::basic_filename(network_file, &settings.output_suffix);
        let mut written = Vec::new();

        if !output.table.is_empty() {
            let weighted = if graph.is_weighted() { "_weighted" } else { "" };
            let directionality = if graph.is_directed() { "_dir" } else { "_undir" };
            let path = settings
                .output_directory
                .join(format!("{basic}_nodeProperties{weighted}{directionality}.txt"));

            written.push(output.table.write(&path, settings.compress_files)?);
        }

        if settings.export_dense_matrices {
            for matrix in &output.matrices {
                written.push(matrix.write_supplemental(
                    &settings.output_directory,
                    &basic,
                    settings.compress_files,
                )?);
            }
        }

        for path in &written {
            info!("wrote {}", path.display());
        }

        Ok(written)
    }

    /// Loads the network in `network_file`, analyses it and saves the results.
    ///
    /// Returns the network means.
    pub fn process_file(&self, network_file: &Path) -> Result<Vec<NetworkMean>> {
        let graph = io::read_graph(network_file, &self.settings)?;
        let output = self.run(&graph)?;
        self.save(&graph, &output, network_file)?;

        Ok(output.network_means)
    }
}
