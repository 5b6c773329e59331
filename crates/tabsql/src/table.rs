//! Column metadata and the row source/sink boundary.
//!
//! File-format readers and writers live outside this crate. They plug in by
//! implementing [`RowSource`] (reading) or [`RowSink`] (writing); the importer
//! and exporter only talk to these traits.

use crate::error::{TabError, TabResult};
use crate::row::Row;
use serde::Deserialize;
use std::collections::VecDeque;
use std::fmt;

/// Logical column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Timestamp,
    Uuid,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Uuid => "uuid",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
}

impl Column {
    /// Create a nullable column.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
        }
    }

    /// Mark the column as `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Check a row against its columns: width, nullability and value types.
pub fn check_row(columns: &[Column], row: &Row) -> TabResult<()> {
    if row.len() != columns.len() {
        return Err(TabError::validation(format!(
            "row has {} values but {} columns are defined",
            row.len(),
            columns.len()
        )));
    }
    for (column, value) in columns.iter().zip(row.values()) {
        match value.column_type() {
            None if !column.nullable => {
                return Err(TabError::validation(format!(
                    "column '{}' is not nullable",
                    column.name
                )));
            }
            Some(ty) if ty != column.ty => {
                return Err(TabError::validation(format!(
                    "column '{}' expects {} but got {}",
                    column.name, column.ty, ty
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Upstream collaborator producing rows (e.g. a delimited-text reader).
pub trait RowSource {
    /// Columns every produced row is aligned with.
    fn columns(&self) -> &[Column];

    /// Next row, or `None` once the source is exhausted.
    fn next_row(&mut self) -> TabResult<Option<Row>>;
}

/// Downstream collaborator consuming rows (e.g. a spreadsheet writer).
pub trait RowSink {
    /// Called once before the first row.
    fn begin(&mut self, columns: &[Column]) -> TabResult<()>;

    fn write_row(&mut self, row: &Row) -> TabResult<()>;

    /// Called once after the last row.
    fn finish(&mut self) -> TabResult<()> {
        Ok(())
    }
}

/// In-memory [`RowSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    columns: Vec<Column>,
    rows: VecDeque<Row>,
}

impl MemorySource {
    pub fn new(columns: Vec<Column>, rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            columns,
            rows: rows.into_iter().collect(),
        }
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemorySource {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn next_row(&mut self) -> TabResult<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

/// In-memory [`RowSink`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowSink for MemorySink {
    fn begin(&mut self, columns: &[Column]) -> TabResult<()> {
        self.columns = columns.to_vec();
        self.rows.clear();
        self.finished = false;
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> TabResult<()> {
        if self.finished {
            return Err(TabError::validation("write_row after finish"));
        }
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self) -> TabResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn people() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Integer).not_null(),
            Column::new("name", ColumnType::Text),
        ]
    }

    #[test]
    fn check_row_accepts_matching_row() {
        check_row(&people(), &row![1, "ann"]).unwrap();
        check_row(&people(), &row![2, None::<String>]).unwrap();
    }

    #[test]
    fn check_row_rejects_width_mismatch() {
        let err = check_row(&people(), &row![1]).unwrap_err();
        assert!(err.to_string().contains("1 values but 2 columns"));
    }

    #[test]
    fn check_row_rejects_null_in_not_null_column() {
        let err = check_row(&people(), &row![None::<i64>, "x"]).unwrap_err();
        assert!(err.to_string().contains("'id' is not nullable"));
    }

    #[test]
    fn check_row_rejects_wrong_type() {
        let err = check_row(&people(), &row!["1", "x"]).unwrap_err();
        assert!(err.to_string().contains("expects integer but got text"));
    }

    #[test]
    fn memory_source_drains_in_order() {
        let mut src = MemorySource::new(people(), vec![row![1, "a"], row![2, "b"]]);
        assert_eq!(src.next_row().unwrap(), Some(row![1, "a"]));
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.next_row().unwrap(), Some(row![2, "b"]));
        assert_eq!(src.next_row().unwrap(), None);
    }

    #[test]
    fn memory_sink_rejects_rows_after_finish() {
        let mut sink = MemorySink::new();
        sink.begin(&people()).unwrap();
        sink.write_row(&row![1, "a"]).unwrap();
        sink.finish().unwrap();
        assert!(sink.write_row(&row![2, "b"]).is_err());
        assert_eq!(sink.rows.len(), 1);
    }
}
