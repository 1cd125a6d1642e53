//! Read-through views.
//!
//! A [`View`] borrows its source columns and owns a permutation. Row `i`,
//! column `c` of the view reads `columns[c][perm[i]]`; nothing is copied
//! unless [`View::to_columns`] is called explicitly.

use crate::column::{Column, ColumnKind, Value};
use crate::error::{Result, SortError};
use crate::permutation::Permutation;
use crate::table::ColumnRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    columns: Vec<&'a Column>,
    perm: Permutation,
}

impl<'a> View<'a> {
    /// Project `columns` through `perm`.
    ///
    /// Every column must have exactly `perm.len()` rows, and `perm` must be a
    /// bijection on those rows; reads never index outside the sources.
    pub fn new(perm: Permutation, columns: Vec<&'a Column>) -> Result<Self> {
        check_lengths(&columns, perm.len())?;
        perm.check(perm.len())?;
        Ok(Self { columns, perm })
    }

    pub fn nrows(&self) -> usize {
        self.perm.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Always true: a view never owns column storage.
    pub fn is_view(&self) -> bool {
        true
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Kinds of the projected columns; identical to their sources.
    pub fn kinds(&self) -> Vec<ColumnKind> {
        self.columns.iter().map(|c| c.kind()).collect()
    }

    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    pub fn into_permutation(self) -> Permutation {
        self.perm
    }

    pub fn columns(&self) -> &[&'a Column] {
        &self.columns
    }

    pub fn column_index(&self, column: impl Into<ColumnRef>) -> Result<usize> {
        column.into().resolve(&self.columns)
    }

    /// Source column behind a view column.
    pub fn column(&self, column: impl Into<ColumnRef>) -> Result<&'a Column> {
        let idx = self.column_index(column)?;
        Ok(self.columns[idx])
    }

    pub fn value(&self, row: usize, column: impl Into<ColumnRef>) -> Result<Option<Value>> {
        let col = self.column(column)?;
        let src = *self.perm.get(row).ok_or(SortError::RowOutOfBounds {
            row,
            nrows: self.nrows(),
        })?;
        col.value(src as usize)
    }

    /// Same permutation, narrowed to `columns` (in the given order).
    pub fn select(&self, columns: &[ColumnRef]) -> Result<View<'a>> {
        let picked = columns
            .iter()
            .map(|r| r.resolve(&self.columns).map(|i| self.columns[i]))
            .collect::<Result<Vec<_>>>()?;
        Ok(View {
            columns: picked,
            perm: self.perm.clone(),
        })
    }

    /// One column's values in view order.
    pub fn column_values(&self, column: impl Into<ColumnRef>) -> Result<Vec<Option<Value>>> {
        let col = self.column(column)?;
        Ok(self.read(col))
    }

    /// All columns' values in view order, nulls preserved.
    pub fn materialize(&self) -> Vec<Vec<Option<Value>>> {
        self.columns.iter().map(|c| self.read(c)).collect()
    }

    /// Gather into new owned columns of the same names and kinds.
    pub fn to_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .map(|c| Column::from_parts(c.name(), c.data().gather(&self.perm)))
            .collect()
    }

    /// Verify the permutation is a bijection over the source rows and that
    /// every column still has that many rows.
    pub fn check(&self) -> Result<()> {
        check_lengths(&self.columns, self.perm.len())?;
        let n = self.columns.first().map_or(self.perm.len(), |c| c.len());
        self.perm.check(n)
    }

    fn read(&self, col: &Column) -> Vec<Option<Value>> {
        self.perm.iter().map(|&r| col.data().get(r as usize)).collect()
    }
}

fn check_lengths(columns: &[&Column], expected: usize) -> Result<()> {
    match columns.iter().find(|c| c.len() != expected) {
        Some(bad) => Err(SortError::LengthMismatch {
            column: bad.name().to_string(),
            expected,
            actual: bad.len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols() -> (Column, Column) {
        (
            Column::int4("A", [Some(30), None, Some(10)]).unwrap(),
            Column::bool1("B", [Some(true), Some(false), None]),
        )
    }

    #[test]
    fn reads_through_permutation() {
        let (a, b) = cols();
        let v = View::new(Permutation::from_vec(vec![1, 2, 0]), vec![&a, &b]).unwrap();
        assert!(v.is_view());
        assert_eq!(v.kinds(), vec![ColumnKind::Int4, ColumnKind::Bool1]);
        assert_eq!(v.value(1, "A").unwrap(), Some(Value::Int(10)));
        assert_eq!(v.value(0, 1usize).unwrap(), Some(Value::Bool(false)));
        assert_eq!(
            v.materialize(),
            vec![
                vec![None, Some(Value::Int(10)), Some(Value::Int(30))],
                vec![Some(Value::Bool(false)), None, Some(Value::Bool(true))],
            ]
        );
        assert!(v.check().is_ok());
    }

    #[test]
    fn length_mismatch_on_projection() {
        let (a, _) = cols();
        let short = Column::int4("S", [Some(1)]).unwrap();
        let err = View::new(Permutation::identity(3).unwrap(), vec![&a, &short]).unwrap_err();
        assert!(matches!(err, SortError::LengthMismatch { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn corrupt_permutation_rejected_on_projection() {
        let (a, b) = cols();
        for bad in [vec![0, 0, 2], vec![0, 1, 7], vec![2, 2, 0]] {
            let err = View::new(Permutation::from_vec(bad.clone()), vec![&a, &b]).unwrap_err();
            assert!(
                matches!(err, SortError::CorruptPermutation { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn check_accepts_valid_view() {
        let (a, b) = cols();
        let v = View::new(Permutation::from_vec(vec![2, 0, 1]), vec![&a, &b]).unwrap();
        assert!(v.check().is_ok());
        // a column-less view is checked against its own length
        let empty = View::new(Permutation::from_vec(vec![1, 0]), Vec::new()).unwrap();
        assert!(empty.check().is_ok());
        assert!(View::new(Permutation::from_vec(vec![1, 1]), Vec::new()).is_err());
    }

    #[test]
    fn select_and_to_columns() {
        let (a, b) = cols();
        let v = View::new(Permutation::from_vec(vec![2, 0, 1]), vec![&a, &b]).unwrap();
        let only_b = v.select(&["B".into()]).unwrap();
        assert_eq!(only_b.names(), vec!["B"]);
        assert_eq!(only_b.permutation(), v.permutation());

        let owned = v.to_columns();
        assert_eq!(owned[0].kind(), ColumnKind::Int4);
        assert_eq!(
            owned[0].values().collect::<Vec<_>>(),
            vec![Some(Value::Int(10)), Some(Value::Int(30)), None]
        );
        assert!(v.select(&["Z".into()]).is_err());
    }

    #[test]
    fn value_out_of_range() {
        let (a, _) = cols();
        let v = View::new(Permutation::identity(3).unwrap(), vec![&a]).unwrap();
        assert!(matches!(
            v.value(3, 0usize),
            Err(SortError::RowOutOfBounds { row: 3, nrows: 3 })
        ));
    }
}
