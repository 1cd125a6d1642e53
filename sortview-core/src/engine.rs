use radix_kernels::{stable_partition, KeyRange, SortKernel, SortStats};
use tracing::debug;

use crate::column::{Column, ColumnKind};
use crate::error::{Result, SortError};
use crate::keys::{extract_keys, rebase, BOOL_FALSE_KEY};
use crate::permutation::{row_count_u32, Permutation};
use crate::table::{ColumnRef, Table};
use crate::view::View;
use crate::SortConfig;

/// Single-key stable sort with secondary projection.
///
/// Pipeline per call: stable null partition, key extraction for non-null
/// rows, range analysis, rebasing into the narrowest key type, radix sort of
/// positions, then nulls prepended to the sorted positions.
#[derive(Debug, Clone)]
pub struct SortEngine {
    config: SortConfig,
    kernel: SortKernel,
}

impl Default for SortEngine {
    fn default() -> Self {
        let config = SortConfig::default();
        let kernel = SortKernel::new(config.radix_params());
        Self { config, kernel }
    }
}

impl SortEngine {
    pub fn new(config: SortConfig) -> Result<Self> {
        config.validate()?;
        let kernel = SortKernel::new(config.radix_params());
        Ok(Self { config, kernel })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Stable ascending order of `column`'s rows, nulls first.
    pub fn sort(&self, column: &Column) -> Result<Permutation> {
        self.sort_rows(column, None)
    }

    /// Like [`SortEngine::sort`], with the caller's declared kind checked
    /// against the column's storage first.
    pub fn sort_as(&self, column: &Column, kind: ColumnKind) -> Result<Permutation> {
        if column.kind() != kind {
            return Err(SortError::InvalidKind {
                kind: format!(
                    "{kind} declared for column '{}' stored as {}",
                    column.name(),
                    column.kind()
                ),
            });
        }
        self.sort(column)
    }

    /// Read `columns` through `perm`.
    pub fn project<'a>(&self, perm: Permutation, columns: Vec<&'a Column>) -> Result<View<'a>> {
        View::new(perm, columns)
    }

    /// Sort `table` by one column and project `select` (all columns when
    /// `None`) through the result.
    pub fn sort_table<'a>(
        &self,
        table: &'a Table,
        by: impl Into<ColumnRef>,
        select: Option<&[ColumnRef]>,
    ) -> Result<View<'a>> {
        let key = table.column(by)?;
        let perm = self.sort(key)?;
        let columns = match select {
            None => table.column_refs(),
            Some(refs) => refs
                .iter()
                .map(|r| table.column(r.clone()))
                .collect::<Result<Vec<_>>>()?,
        };
        self.project(perm, columns)
    }

    /// Order of `view`'s own rows by one of its columns.
    ///
    /// The result indexes view rows, not source rows; a view that is
    /// already sorted by `by` yields the identity.
    pub fn sort_within(&self, view: &View<'_>, by: impl Into<ColumnRef>) -> Result<Permutation> {
        let key = view.column(by)?;
        self.sort_rows(key, Some(view.permutation().as_slice()))
    }

    /// Re-sort a view by one of its columns; the new view reads the same
    /// source columns.
    pub fn sort_view<'a>(&self, view: &View<'a>, by: impl Into<ColumnRef>) -> Result<View<'a>> {
        let local = self.sort_within(view, by)?;
        let perm = local.compose(view.permutation())?;
        View::new(perm, view.columns().to_vec())
    }

    /// Sort the rows `rows` of `column` (all rows when `None`). Positions in
    /// the returned permutation index into `rows`.
    fn sort_rows(&self, column: &Column, rows: Option<&[u32]>) -> Result<Permutation> {
        let n = rows.map_or(column.len(), <[u32]>::len);
        row_count_u32(n)?;
        let data = column.data();
        let kind = column.kind();

        let source_row = |pos: usize| rows.map_or(pos, |r| r[pos] as usize);
        let partition = stable_partition(n, |pos| data.is_null(source_row(pos)));

        let mapped: Vec<u32>;
        let valid_rows: &[u32] = match rows {
            Some(r) => {
                mapped = partition.valid.iter().map(|&p| r[p as usize]).collect();
                &mapped
            }
            None => &partition.valid,
        };

        let keys = extract_keys(data, valid_rows);
        let range = KeyRange::analyze(&keys, kind.key_bits());

        let mut order: Vec<u32> = (0..partition.valid.len() as u32).collect();
        let stats = match range {
            Some(r) if r.is_constant() => SortStats::default(),
            // two non-null values: placed directly, no radix pass
            Some(_) if kind == ColumnKind::Bool1 => {
                order = place_bools(&keys);
                SortStats::default()
            }
            Some(r) => self.radix(&mut order, &keys, r),
            None => SortStats::default(),
        };

        let mut perm = Vec::with_capacity(n);
        perm.extend_from_slice(&partition.nulls);
        perm.extend(order.iter().map(|&j| partition.valid[j as usize]));
        let perm = Permutation::from_vec(perm);

        debug!(
            column = column.name(),
            kind = kind.code(),
            rows = n,
            nulls = partition.nulls.len(),
            bits = range.map_or(0, |r| r.bits),
            passes = stats.passes,
            parallel = stats.parallel,
            "SortEngine::sort"
        );

        if self.config.verify {
            perm.check(n)?;
        }
        Ok(perm)
    }

    /// Rebase keys into the narrowest type holding `range.bits` and sort.
    fn radix(&self, order: &mut [u32], keys: &[u64], range: KeyRange) -> SortStats {
        match range.bits {
            0..=8 => self.kernel.sort(order, &rebase::<u8>(keys, range.min), range.bits),
            9..=16 => self.kernel.sort(order, &rebase::<u16>(keys, range.min), range.bits),
            17..=32 => self.kernel.sort(order, &rebase::<u32>(keys, range.min), range.bits),
            _ => self.kernel.sort(order, &rebase::<u64>(keys, range.min), range.bits),
        }
    }
}

/// Stable order of non-null boolean keys: every `false` position, then
/// every `true` position.
fn place_bools(keys: &[u64]) -> Vec<u32> {
    let (falses, trues): (Vec<u32>, Vec<u32>) =
        (0..keys.len() as u32).partition(|&i| keys[i as usize] == BOOL_FALSE_KEY);
    let mut order = falses;
    order.extend(trues);
    order
}
