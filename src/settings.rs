//! A module for the settings shared by the loaders, analyzers and writers.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings threaded through every component.
///
/// Missing fields take their [`Default`] value when deserialized, so a settings file only needs
/// to list what differs.
///
/// # Examples
///
/// ```
/// use netprop::settings::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{ "is_directed": true }"#).unwrap();
/// assert!(settings.is_directed);
/// assert!(settings.compute_degree);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory receiving every output file.
    pub output_directory: PathBuf,
    /// Appended to the basic filename of every output derived from an input network.
    pub output_suffix: String,
    /// Gzip output files (a `.gz` suffix is added).
    pub compress_files: bool,

    /// Edge lists are read as directed graphs.
    pub is_directed: bool,
    /// Edge lists carry a third weight column.
    pub is_weighted: bool,

    pub compute_degree: bool,
    pub compute_betweenness: bool,
    pub compute_clustering_coefficient: bool,
    pub compute_shortest_path_lengths: bool,
    pub compute_pstep_kernel: bool,
    /// Number of steps of the p-step kernel.
    pub pstep_kernel_p: usize,
    /// Decay factor of the p-step kernel.
    pub pstep_kernel_alpha: f64,
    /// Row-normalize the adjacency matrix before computing the kernel.
    pub pstep_kernel_normalize: bool,
    /// Tanimoto similarity between transcription factors (compared on their targets).
    pub compute_tf_tanimoto: bool,
    /// Tanimoto similarity between targets (compared on their regulators).
    pub compute_target_tanimoto: bool,

    /// Export node-level properties of the optional analyzers, not only their network means.
    pub export_node_properties: bool,
    /// Write the dense node x node matrices (kernel, similarity). These need 8·V² bytes each.
    pub export_dense_matrices: bool,
    /// Worker threads for the per-source path searches.
    pub num_threads: usize,

    /// Directory holding the network files to group.
    pub network_dir: PathBuf,
    /// Optional two-column file mapping network stems to group labels.
    pub network_group_file: Option<PathBuf>,
    /// Prefix of the network files, used both to derive input names and to name merged outputs.
    pub network_files_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            output_suffix: String::new(),
            compress_files: false,
            is_directed: false,
            is_weighted: false,
            compute_degree: true,
            compute_betweenness: false,
            compute_clustering_coefficient: false,
            compute_shortest_path_lengths: false,
            compute_pstep_kernel: false,
            pstep_kernel_p: 2,
            pstep_kernel_alpha: 1.0,
            pstep_kernel_normalize: false,
            compute_tf_tanimoto: false,
            compute_target_tanimoto: false,
            export_node_properties: true,
            export_dense_matrices: true,
            num_threads: 1,
            network_dir: PathBuf::from("."),
            network_group_file: None,
            network_files_prefix: String::new(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file and validates them.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let settings: Settings = serde_json::from_reader(reader)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Returns an error for values no analysis can run with.
    pub fn validate(&self) -> Result<()> {
        if !self.pstep_kernel_alpha.is_finite() {
            return Err(Error::Config(format!(
                "p-step kernel alpha must be finite, got {}",
                self.pstep_kernel_alpha
            )));
        }

        Ok(())
    }

    /// Whether any analyzer is switched on.
    pub fn any_analyzer(&self) -> bool {
        self.compute_degree
            || self.compute_betweenness
            || self.compute_clustering_coefficient
            || self.compute_shortest_path_lengths
            || self.compute_pstep_kernel
            || self.compute_tf_tanimoto
            || self.compute_target_tanimoto
    }
}
