//! A module for partitioning network files into named groups and merging each group.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    error::{Error, Result},
    io, merge,
    settings::Settings,
};

/// Name of the single group formed when no mapping file is given.
pub const UNION_GROUP: &str = "_networkUnion";

/// Appended to a mapped network stem (after the prefix) to form its filename.
pub const MAPPED_FILE_SUFFIX: &str = ".txt.gz";

/// A named, ordered set of network files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkGroup {
    name: String,
    files: Vec<String>,
}

impl NetworkGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

/// Turns a group label into a filesystem-safe group name.
///
/// # Examples
///
/// ```
/// use netprop::groups::normalize_group_name;
///
/// assert_eq!(normalize_group_name("Liver (adult), 'fetal'"), "liver_adult_fetal");
/// ```
pub fn normalize_group_name(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '\'' | ','))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// The network groups, in order of first appearance.
#[derive(Clone, Debug)]
pub struct NetworkGroups {
    network_dir: PathBuf,
    prefix: String,
    groups: Vec<NetworkGroup>,
}

impl NetworkGroups {
    /// Resolves the groups of the network files in `network_dir`.
    ///
    /// Without a mapping file, all files in the directory form the single group
    /// [`UNION_GROUP`]. Otherwise each row of the mapping file (`stem`, `label`) adds the file
    /// `<prefix><stem>.txt.gz` to the group named after the normalized label.
    pub fn resolve(network_dir: &Path, mapping_file: Option<&Path>, prefix: &str) -> Result<Self> {
        let groups = match mapping_file {
            None => {
                let files = io::list_files(network_dir)?;
                info!("{} files in network directory", files.len());

                vec![NetworkGroup {
                    name: UNION_GROUP.to_owned(),
                    files,
                }]
            }
            Some(path) => {
                let groups = read_mapping(path, prefix)?;
                info!("initialized {} network sets", groups.len());

                groups
            }
        };

        Ok(Self {
            network_dir: network_dir.to_path_buf(),
            prefix: prefix.to_owned(),
            groups,
        })
    }

    /// Resolves the groups from the network directory, mapping file and prefix in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::resolve(
            &settings.network_dir,
            settings.network_group_file.as_deref(),
            &settings.network_files_prefix,
        )
    }

    pub fn groups(&self) -> &[NetworkGroup] {
        &self.groups
    }

    /// Returns the group with the given name.
    pub fn get(&self, name: &str) -> Option<&NetworkGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Merges the networks of each group and writes the union to
    /// `<output_dir>/<prefix><group>.txt`, returning the written paths.
    ///
    /// Stops at the first group that fails.
    pub fn run(&self, settings: &Settings) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.groups.len());

        for group in &self.groups {
            info!("- {} ({} networks)", group.name, group.files.len());

            let merged = merge::union_files(&self.network_dir, &group.files, settings)?;
            let path = settings
                .output_directory
                .join(format!("{}{}.txt", self.prefix, group.name));

            written.push(merged.write(&path, settings.compress_files)?);
        }

        Ok(written)
    }
}

fn read_mapping(path: &Path, prefix: &str) -> Result<Vec<NetworkGroup>> {
    let mut groups: Vec<NetworkGroup> = Vec::new();

    for (line, record) in io::read_records(path)? {
        if record.len() != 2 {
            return Err(Error::format(
                path,
                line,
                format!("expected two columns, found {}", record.len()),
            ));
        }

        let name = normalize_group_name(&record[1]);
        let filename = format!("{prefix}{}{MAPPED_FILE_SUFFIX}", &record[0]);

        // A file belongs to at most one group.
        if let Some(owner) = groups.iter().find(|g| g.files.contains(&filename)) {
            return Err(Error::format(
                path,
                line,
                format!("file {filename} listed multiple times, already in set {}", owner.name),
            ));
        }

        let index = match groups.iter().position(|g| g.name == name) {
            Some(i) => i,
            None => {
                groups.push(NetworkGroup {
                    name,
                    files: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].files.push(filename);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_group_name("Group A"), "group_a");
        assert_eq!(normalize_group_name("T-cells (CD4+)"), "t-cells_cd4+");
    }

    #[test]
    fn directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();

        let groups = NetworkGroups::resolve(dir.path(), None, "").unwrap();
        assert_eq!(groups.groups().len(), 1);
        assert_eq!(groups.groups()[0].name(), UNION_GROUP);
        assert_eq!(groups.groups()[0].files(), &["a.txt", "b.txt"]);
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            NetworkGroups::resolve(dir.path(), None, ""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn mapping_file() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("groups.txt");
        fs::write(&mapping, "net1\tGroup A\nnet2\tGroup A\nnet3\tGroup B\n").unwrap();

        let groups = NetworkGroups::resolve(dir.path(), Some(&mapping), "tissue_").unwrap();
        assert_eq!(groups.groups().len(), 2);
        assert_eq!(
            groups.get("group_a").unwrap().files(),
            &["tissue_net1.txt.gz", "tissue_net2.txt.gz"]
        );
        assert_eq!(
            groups.get("group_b").unwrap().files(),
            &["tissue_net3.txt.gz"]
        );
    }

    #[test]
    fn mapping_wrong_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("groups.txt");
        fs::write(&mapping, "net1\tGroup A\nnet2\n").unwrap();

        assert!(matches!(
            NetworkGroups::resolve(dir.path(), Some(&mapping), ""),
            Err(Error::Format { line: 2, .. })
        ));
    }

    #[test]
    fn mapping_duplicate_membership() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("groups.txt");
        fs::write(&mapping, "net1\tGroup A\nnet2\tGroup B\nnet1\tgroup a\n").unwrap();

        assert!(matches!(
            NetworkGroups::resolve(dir.path(), Some(&mapping), ""),
            Err(Error::Format { line: 3, .. })
        ));
    }

    #[test]
    fn mapping_file_in_two_groups() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("groups.txt");
        fs::write(&mapping, "net1\tGroup A\nnet1\tGroup B\n").unwrap();

        assert!(matches!(
            NetworkGroups::resolve(dir.path(), Some(&mapping), ""),
            Err(Error::Format { line: 2, .. })
        ));
    }

    #[test]
    fn run() {
        let networks = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(networks.path().join("net1.txt"), "n1\tn2\nn2\tn3\n").unwrap();
        fs::write(networks.path().join("net2.txt"), "n2\tn1\nn3\tn4\n").unwrap();

        let settings = Settings {
            output_directory: output.path().to_path_buf(),
            network_dir: networks.path().to_path_buf(),
            network_files_prefix: "union".to_owned(),
            ..Default::default()
        };
        let groups = NetworkGroups::from_settings(&settings).unwrap();
        let written = groups.run(&settings).unwrap();

        assert_eq!(written, vec![output.path().join("union_networkUnion.txt")]);
        let text = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(text, "n1\tn2\nn2\tn3\nn3\tn4\n");
    }
}
