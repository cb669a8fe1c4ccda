//! A module for the node property table and the supplemental matrix files.
//!
//! Both are tab-delimited. The header row starts with an empty cell above the node id column,
//! followed by the column names; each following row starts with a node id.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};

use crate::{
    analysis::{LabeledMatrix, NodeProperty},
    error::{Error, Result},
    io::{self, OutputWriter},
};

/// Node-level vectors aligned on the node order of the graph they were computed from.
///
/// Columns keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTable {
    node_ids: Vec<String>,
    columns: Vec<NodeProperty>,
}

impl PropertyTable {
    /// Creates an empty table for the given nodes.
    pub fn new(node_ids: Vec<String>) -> Self {
        Self {
            node_ids,
            columns: Vec::new(),
        }
    }

    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    /// Returns the columns in insertion order.
    pub fn columns(&self) -> &[NodeProperty] {
        &self.columns
    }

    /// Returns the values of the column with the given name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Appends a column.
    ///
    /// Fails if the column doesn't have one value per node or its name is already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use netprop::table::PropertyTable;
    ///
    /// let mut table = PropertyTable::new(vec!["a".into(), "b".into()]);
    /// assert!(table.push("degree", vec![1.0, 1.0]).is_ok());
    /// assert!(table.push("betweenness", vec![0.0]).is_err());
    /// ```
    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();

        check_length(&name, values.len(), self.node_ids.len())?;
        if self.column(&name).is_some() {
            return Err(Error::Analysis(format!("duplicate node property: {name}")));
        }
        self.columns.push((name, values));

        Ok(())
    }

    /// Writes the table to `path`, gzip-compressed when `compress` is set, and returns the
    /// written path.
    pub fn write(&self, path: &Path, compress: bool) -> Result<PathBuf> {
        for (name, values) in &self.columns {
            check_length(name, values.len(), self.node_ids.len())?;
        }

        let (path, writer) = io::create_writer(path, compress)?;
        let headers = self.columns.iter().map(|(name, _)| name.as_str());
        let rows = self.node_ids.iter().enumerate().map(|(i, id)| {
            let values = self.columns.iter().map(move |(_, values)| values[i]);
            (id.as_str(), values)
        });
        write_delimited(writer, headers, rows)?;

        Ok(path)
    }

    /// Reads a table written by [`PropertyTable::write`].
    pub fn read(path: &Path) -> Result<Self> {
        let mut records = io::read_records(path)?.into_iter();

        let Some((_, header)) = records.next() else {
            return Ok(Self::default());
        };
        let names: Vec<String> = header.iter().skip(1).map(str::to_owned).collect();

        let mut node_ids = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        for (line, record) in records {
            if record.len() != header.len() {
                return Err(Error::format(
                    path,
                    line,
                    format!("expected {} columns, found {}", header.len(), record.len()),
                ));
            }

            node_ids.push(record[0].to_owned());
            for (column, field) in columns.iter_mut().zip(record.iter().skip(1)) {
                let value = io::parse_value(field)
                    .ok_or_else(|| Error::format(path, line, format!("invalid value: {field}")))?;
                column.push(value);
            }
        }

        Ok(Self {
            node_ids,
            columns: names.into_iter().zip(columns).collect(),
        })
    }
}

/// Writes a labeled matrix as a dense tab-delimited table, labels heading rows and columns.
pub fn write_matrix(path: &Path, matrix: &LabeledMatrix, compress: bool) -> Result<PathBuf> {
    let n = matrix.labels.len();
    if matrix.values.nrows() != n || matrix.values.ncols() != n {
        return Err(Error::Analysis(format!(
            "{} matrix is {}x{} for {n} labels",
            matrix.name,
            matrix.values.nrows(),
            matrix.values.ncols()
        )));
    }

    let (path, writer) = io::create_writer(path, compress)?;
    let headers = matrix.labels.iter().map(String::as_str);
    let rows = matrix
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), matrix.values.row(i).iter().copied().collect::<Vec<_>>()));
    write_delimited(writer, headers, rows)?;

    Ok(path)
}

fn check_length(name: &str, len: usize, num_nodes: usize) -> Result<()> {
    if len != num_nodes {
        return Err(Error::Analysis(format!(
            "node property {name} has {len} values for {num_nodes} nodes"
        )));
    }

    Ok(())
}

fn write_delimited<'a, V>(
    writer: OutputWriter,
    headers: impl Iterator<Item = &'a str>,
    rows: impl Iterator<Item = (&'a str, V)>,
) -> Result<()>
where
    V: IntoIterator<Item = f64>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .from_writer(writer);

    writer.write_record(std::iter::once("").chain(headers))?;
    for (label, values) in rows {
        let mut record = vec![label.to_owned()];
        record.extend(values.into_iter().map(io::format_value));
        writer.write_record(&record)?;
    }
    let output = writer.into_inner().map_err(|e| e.into_error())?;
    output.finish()
}
