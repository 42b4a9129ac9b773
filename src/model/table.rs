//! Table content.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table with a header row and uniform data rows.
///
/// Every data row has exactly as many cells as there are headers. When the
/// table has no headers, every row has the width of the first row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TableBlock {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for TableBlock {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        TableBlock::new(raw.headers, raw.rows)
    }
}

impl TableBlock {
    /// Create a table, rejecting ragged rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = if headers.is_empty() {
            rows.first().map(Vec::len).unwrap_or(0)
        } else {
            headers.len()
        };

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::InvalidTable(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                width
            )));
        }

        Ok(Self { headers, rows })
    }

    /// Build a table from string slices.
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Result<Self> {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Header cells.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check if the table has a header row.
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        if self.headers.is_empty() {
            self.rows.first().map(Vec::len).unwrap_or(0)
        } else {
            self.headers.len()
        }
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A copy holding the same headers and a slice of the data rows.
    pub fn with_row_range(&self, range: std::ops::Range<usize>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows[range].to_vec(),
        }
    }
}
