use std::fmt;

use tracing::debug;

use crate::column::{Column, ColumnKind};
use crate::error::{Result, SortError};
use crate::permutation::Permutation;
use crate::view::View;

/// Reference to a column by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    /// Position of the referenced column in `columns`.
    pub fn resolve(&self, columns: &[&Column]) -> Result<usize> {
        match self {
            ColumnRef::Index(i) if *i < columns.len() => Ok(*i),
            ColumnRef::Name(name) => columns
                .iter()
                .position(|c| c.name() == name)
                .ok_or_else(|| SortError::ColumnNotFound {
                    column: name.clone(),
                }),
            ColumnRef::Index(_) => Err(SortError::ColumnNotFound {
                column: self.to_string(),
            }),
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{i}"),
            ColumnRef::Name(n) => f.write_str(n),
        }
    }
}

/// An ordered set of equal-length columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(SortError::LengthMismatch {
                    column: bad.name().to_string(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        debug!(columns = columns.len(), "Table::new");
        Ok(Self { columns })
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn kinds(&self) -> Vec<ColumnKind> {
        self.columns.iter().map(Column::kind).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_refs(&self) -> Vec<&Column> {
        self.columns.iter().collect()
    }

    pub fn column_index(&self, column: impl Into<ColumnRef>) -> Result<usize> {
        column.into().resolve(&self.column_refs())
    }

    pub fn column(&self, column: impl Into<ColumnRef>) -> Result<&Column> {
        let idx = self.column_index(column)?;
        Ok(&self.columns[idx])
    }

    /// Unsorted view over all columns.
    pub fn view(&self) -> Result<View<'_>> {
        View::new(Permutation::identity(self.nrows())?, self.column_refs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(vec![
            Column::int4("A", [Some(1), Some(2)]).unwrap(),
            Column::bool1("B", [Some(true), None]),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_by_name_and_index() {
        let t = table();
        assert_eq!(t.column("B").unwrap().kind(), ColumnKind::Bool1);
        assert_eq!(t.column(0usize).unwrap().name(), "A");
        assert_eq!(t.names(), vec!["A", "B"]);
        assert!(matches!(
            t.column("C"),
            Err(SortError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            t.column(7usize),
            Err(SortError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::int4("A", [Some(1), Some(2)]).unwrap(),
            Column::int4("B", [Some(1)]).unwrap(),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            SortError::LengthMismatch {
                column: "B".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn identity_view() {
        let t = table();
        let v = t.view().unwrap();
        assert!(v.permutation().is_identity());
        assert_eq!(v.nrows(), 2);
    }
}
