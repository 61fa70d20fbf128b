//! Flat-record CSV rendering.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// One CSV row: column label to rendered value, in column order.
pub type CsvRow = IndexMap<String, String>;

/// Errors from CSV rendering and writing.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There were no rows to render; an empty document has no header.
    #[error("No rows to export")]
    NoRows,

    /// The rendered document could not be written out.
    #[error("Failed to write {filename}: {source}")]
    Io {
        /// The file that could not be written.
        filename: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Quotes a field when it contains a comma or a quote, doubling embedded
/// quotes.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders rows as CSV text.
///
/// The header row is the first record's key set, in that record's key order.
/// Later rows render their values under those columns; keys missing from a
/// row render empty, keys absent from the first row are dropped. Lines are
/// joined with `\n` and there is no trailing newline.
pub fn render_csv(rows: &[CsvRow]) -> Result<String, ExportError> {
    let first = rows.first().ok_or(ExportError::NoRows)?;
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| escape(header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = headers
            .iter()
            .map(|header| escape(row.get(header.as_str()).map_or("", String::as_str)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// A rendered CSV file, ready for the host to save or offer as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    /// Suggested file name, including the `.csv` extension.
    pub filename: String,
    /// The rendered CSV text.
    pub content: String,
}

impl CsvDocument {
    /// Renders rows into a named document.
    pub fn render(filename: impl Into<String>, rows: &[CsvRow]) -> Result<Self, ExportError> {
        Ok(Self {
            filename: filename.into(),
            content: render_csv(rows)?,
        })
    }

    /// Writes the document into a directory, returning the full path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.content).map_err(|source| ExportError::Io {
            filename: self.filename.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote CSV export");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_comma_field_is_quoted() {
        let rows = vec![row(&[("A", "1,2"), ("B", "x")])];
        assert_eq!(render_csv(&rows).unwrap(), "A,B\n\"1,2\",x");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let rows = vec![row(&[("Notes", "she said \"thanks\"")])];
        assert_eq!(
            render_csv(&rows).unwrap(),
            "Notes\n\"she said \"\"thanks\"\"\""
        );
    }

    #[test]
    fn test_missing_and_extra_keys() {
        let rows = vec![
            row(&[("A", "1"), ("B", "2")]),
            row(&[("B", "only-b"), ("C", "dropped")]),
        ];
        assert_eq!(render_csv(&rows).unwrap(), "A,B\n1,2\n,only-b");
    }

    #[test]
    fn test_column_order_follows_first_row() {
        let rows = vec![row(&[("Z", "26"), ("A", "1")])];
        assert_eq!(render_csv(&rows).unwrap(), "Z,A\n26,1");
    }

    #[test]
    fn test_no_rows_is_an_error() {
        let err = render_csv(&[]).unwrap_err();
        assert!(matches!(err, ExportError::NoRows));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let doc = CsvDocument::render("out.csv", &[row(&[("A", "1")])]).unwrap();
        let path = doc.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "A\n1");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let doc = CsvDocument::render("out.csv", &[row(&[("A", "1")])]).unwrap();
        let err = doc
            .write_to("/definitely/not/a/real/directory")
            .unwrap_err();
        match err {
            ExportError::Io { filename, .. } => assert_eq!(filename, "out.csv"),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
