//! Reading and writing the tab-delimited files exchanged with other tools.
//!
//! Files ending in `.gz` are decompressed transparently on read. On write, gzip compression is a
//! setting and adds the `.gz` suffix.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use tracing::debug;

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::{Graph, GraphBuilder},
    settings::Settings,
};

/// Opens a file for reading, decompressing it if its name ends in `.gz`.
pub fn open_reader(path: &Path) -> Result<Box<dyn Read>> {
    let file = BufReader::new(File::open(path)?);

    if is_gzip(path) {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// A buffered output file, gzip-compressed or plain.
///
/// Call [`OutputWriter::finish`] once everything is written: dropping the writer instead loses
/// errors raised while flushing the buffer and the gzip trailer.
pub enum OutputWriter {
    Plain(BufWriter<File>),
    Gzip(BufWriter<GzEncoder<File>>),
}

impl OutputWriter {
    /// Wraps an open file, gzip-compressing what is written when `compress` is set.
    pub fn new(file: File, compress: bool) -> Self {
        if compress {
            Self::Gzip(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            Self::Plain(BufWriter::new(file))
        }
    }

    /// Flushes the buffer and completes the gzip stream.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::Plain(mut writer) => writer.flush()?,
            Self::Gzip(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?.flush()?;
            }
        }

        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(writer) => writer.write(buf),
            Self::Gzip(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(writer) => writer.flush(),
            Self::Gzip(writer) => writer.flush(),
        }
    }
}

/// Creates a file for writing, gzip-compressed when `compress` is set.
///
/// Returns the path actually written, which carries a `.gz` suffix when compressing.
pub fn create_writer(path: &Path, compress: bool) -> Result<(PathBuf, OutputWriter)> {
    let path = if compress && !is_gzip(path) {
        let mut name = path.as_os_str().to_owned();
        name.push(".gz");
        PathBuf::from(name)
    } else {
        path.to_path_buf()
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)?;
    debug!("writing {}", path.display());

    Ok((path, OutputWriter::new(file, compress)))
}

/// Reads all records of a tab-delimited file along with their 1-based line numbers.
///
/// Empty lines and lines starting with `#` are skipped; rows may have varying lengths so callers
/// can report column count errors themselves.
pub fn read_records(path: &Path) -> Result<Vec<(u64, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(open_reader(path)?);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        records.push((line, record));
    }

    Ok(records)
}

/// Reads a graph from an edge list, with directedness and weightedness taken from the settings.
///
/// Each line holds `source`, `target` and, for weighted graphs, a `weight` column.
pub fn read_graph(path: impl AsRef<Path>, settings: &Settings) -> Result<Graph> {
    let builder = GraphBuilder::new(settings.is_directed, settings.is_weighted);
    let graph = read_edges(path.as_ref(), builder, false)?;

    debug!(
        "loaded {}: {} nodes, {} edges",
        path.as_ref().display(),
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Reads a graph whose nodes are declared up front, one id per line in the first column of
/// `node_path`. Edges referencing an undeclared node are rejected.
pub fn read_graph_with_nodes(
    edge_path: impl AsRef<Path>,
    node_path: impl AsRef<Path>,
    settings: &Settings,
) -> Result<Graph> {
    let mut builder = GraphBuilder::new(settings.is_directed, settings.is_weighted);

    for (_, record) in read_records(node_path.as_ref())? {
        if let Some(id) = record.get(0).filter(|id| !id.is_empty()) {
            builder.add_node(id);
        }
    }

    read_edges(edge_path.as_ref(), builder, true)
}

fn read_edges(path: &Path, mut builder: GraphBuilder, closed: bool) -> Result<Graph> {
    let expected = if builder.is_weighted() { 3 } else { 2 };

    for (line, record) in read_records(path)? {
        if record.len() != expected {
            return Err(Error::format(
                path,
                line,
                format!("expected {expected} columns, found {}", record.len()),
            ));
        }

        let (source, target) = (&record[0], &record[1]);
        if closed {
            for id in [source, target] {
                if !builder.contains_node(id) {
                    return Err(Error::format(path, line, format!("undefined node: {id}")));
                }
            }
        }

        let edge = if builder.is_weighted() {
            let weight: f64 = record[2]
                .trim()
                .parse()
                .ok()
                .filter(|w: &f64| w.is_finite())
                .ok_or_else(|| Error::format(path, line, format!("invalid weight: {}", &record[2])))?;
            Edge::weighted(source, target, weight)
        } else {
            Edge::new(source, target)
        };

        builder.insert(edge);
    }

    Ok(builder.build())
}

/// Extracts the basic filename of `path`: no directories, no `.gz`, no extension, followed by
/// `suffix`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use netprop::io::basic_filename;
///
/// assert_eq!(basic_filename(Path::new("data/liver.txt.gz"), ""), "liver");
/// assert_eq!(basic_filename(Path::new("liver.txt"), "_v2"), "liver_v2");
/// ```
pub fn basic_filename(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = match name.rfind('.') {
        Some(end) if end > 0 => &name[..end],
        _ => name,
    };

    format!("{stem}{suffix}")
}

/// Lists the names of the regular files in `dir`, sorted.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::Config(format!("couldn't list files in directory {}: {e}", dir.display()))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        // Follows symlinks.
        if fs::metadata(entry.path())?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    if names.is_empty() {
        return Err(Error::Config(format!(
            "network directory contains no files: {}",
            dir.display()
        )));
    }
    names.sort();

    Ok(names)
}

/// Formats a value for output; `NaN` (an undefined value) is written as `NA`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NA".to_owned()
    } else {
        value.to_string()
    }
}

/// Parses a value written by [`format_value`].
pub fn parse_value(text: &str) -> Option<f64> {
    match text.trim() {
        "NA" => Some(f64::NAN),
        t => t.parse().ok(),
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
