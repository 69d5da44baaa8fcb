//! CSV loading for labeled feature rows.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Mandatory header row naming every column
//! - Double-quoted fields with embedded commas and `""` escapes
//! - Blank lines are ignored
//!
//! The label column is located by name; every other column is a numeric
//! feature, kept in header order.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::data::record::{Record, Schema};
use crate::error::{Error, Result};

/// Name of the label column in the iris dataset.
pub const DEFAULT_LABEL_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DatasetLoader {
    label_column: String,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        DatasetLoader::new(DEFAULT_LABEL_COLUMN)
    }
}

impl DatasetLoader {
    pub fn new(label_column: impl Into<String>) -> Self {
        DatasetLoader { label_column: label_column.into() }
    }

    /// Opens `path` and reads its header.
    ///
    /// The returned iterator yields one `Record` per data row and is consumed
    /// once; reading the data again means calling `open` again.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Records<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::DataAccess {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::new(file), path)
    }

    /// Same as `open` but reads from an already buffered source.
    pub fn from_reader<R: BufRead>(&self, reader: R) -> Result<Records<R>> {
        self.read(reader, Path::new("<reader>"))
    }

    fn read<R: BufRead>(&self, reader: R, origin: &Path) -> Result<Records<R>> {
        let mut lines = reader.lines();

        let header_line = loop {
            match lines.next() {
                None => return Err(Error::Schema(format!("'{}' is empty", origin.display()))),
                Some(Err(source)) => {
                    return Err(Error::DataAccess { path: origin.to_path_buf(), source })
                }
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => break line,
            }
        };

        let columns = parse_csv_row(header_line.trim_start_matches('\u{feff}'))
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();
        let schema = Schema::from_header(columns, &self.label_column)?;
        debug!(
            features = ?schema.feature_names().collect::<Vec<_>>(),
            label = schema.label_name(),
            "read dataset header"
        );

        Ok(Records {
            lines,
            schema,
            origin: origin.to_path_buf(),
            row: 0,
            done: false,
        })
    }
}

/// Lazy sequence of `Record`s backed by an open reader.
///
/// The iterator stops after the first error it yields.
pub struct Records<R> {
    lines: Lines<R>,
    schema: Schema,
    origin: PathBuf,
    row: usize,
    done: bool,
}

impl<R> Records<R> {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of input features per record (header width minus the label).
    pub fn feature_count(&self) -> usize {
        self.schema.feature_count()
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = loop {
            match self.lines.next()? {
                Err(source) => {
                    break Err(Error::DataAccess { path: self.origin.clone(), source });
                }
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    self.row += 1;
                    break parse_record(&line, self.row, &self.schema);
                }
            }
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn parse_record(line: &str, row: usize, schema: &Schema) -> Result<Record> {
    let cells = parse_csv_row(line);
    if cells.len() != schema.columns().len() {
        return Err(Error::Schema(format!(
            "row {}: expected {} columns, found {}",
            row,
            schema.columns().len(),
            cells.len()
        )));
    }

    let mut features = Vec::with_capacity(schema.feature_count());
    let mut label = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        let cell = cell.trim();
        if i == schema.label_index() {
            label = cell.to_string();
            continue;
        }
        let invalid = || Error::InvalidNumber {
            row,
            column: schema.columns()[i].clone(),
            value: cell.to_string(),
        };
        // `f64::from_str` also accepts "nan" and "inf"; neither can train.
        let value = cell.parse::<f64>().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        features.push(value);
    }

    Ok(Record { row, features, label })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
