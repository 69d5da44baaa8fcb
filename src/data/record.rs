/// One dataset row: the numeric features and the raw species label.
///
/// `row` is the 1-based position of the row among the data rows of the
/// source file; it is carried along only so later stages can report errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub row: usize,
    pub features: Vec<f64>,
    pub label: String,
}

/// A `Record` whose label has been replaced by a 3-element indicator vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    pub features: Vec<f64>,
    pub target: [f64; 3],
}

/// Column layout taken from the header row of the source file.
///
/// Only `from_header` builds one, so there is always at least one column and
/// `label_index` always points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    label_index: usize,
}

impl Schema {
    /// Builds a schema from header cells, locating `label_column` by exact name.
    pub fn from_header(columns: Vec<String>, label_column: &str) -> crate::Result<Schema> {
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(crate::Error::Schema("header row is empty".into()));
        }
        let label_index = columns
            .iter()
            .position(|c| c == label_column)
            .ok_or_else(|| {
                crate::Error::Schema(format!(
                    "header {:?} has no label column '{}'",
                    columns, label_column
                ))
            })?;
        Ok(Schema { columns, label_index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    /// Number of input features: every column except the label.
    pub fn feature_count(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.label_index)
            .map(|(_, c)| c.as_str())
    }

    pub fn label_name(&self) -> &str {
        &self.columns[self.label_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn feature_count_excludes_label_column() {
        let schema = Schema::from_header(
            header(&["sepal_length", "sepal_width", "petal_length", "petal_width", "species"]),
            "species",
        )
        .unwrap();
        assert_eq!(schema.feature_count(), 4);
        assert_eq!(schema.label_index(), 4);
        assert_eq!(schema.columns().len(), 5);
        assert_eq!(schema.label_name(), "species");
    }

    #[test]
    fn label_column_may_sit_anywhere() {
        let schema = Schema::from_header(header(&["species", "a", "b"]), "species").unwrap();
        assert_eq!(schema.feature_count(), 2);
        assert_eq!(schema.feature_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn label_only_header_has_no_features() {
        let schema = Schema::from_header(header(&["species"]), "species").unwrap();
        assert_eq!(schema.feature_count(), 0);
        assert_eq!(schema.feature_names().count(), 0);
        assert_eq!(schema.label_name(), "species");
    }

    #[test]
    fn missing_label_column_is_a_schema_error() {
        let err = Schema::from_header(header(&["a", "b", "class"]), "species").unwrap_err();
        assert!(matches!(err, crate::Error::Schema(_)));
    }

    #[test]
    fn empty_header_is_a_schema_error() {
        let err = Schema::from_header(header(&[""]), "species").unwrap_err();
        assert!(matches!(err, crate::Error::Schema(_)));
    }
}
