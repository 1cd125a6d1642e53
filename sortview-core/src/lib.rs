//! Stable, null-aware radix sorting of fixed-width columns, with results
//! exposed as read-through views.
//!
//! ```text
//! Column ──sort──▶ Permutation ──project──▶ View<'_> ──materialize──▶ values
//! ```

use radix_kernels::{RadixParams, MAX_PASS_BITS};

pub mod column;
pub mod engine;
pub mod error;
pub mod keys;
pub mod permutation;
pub mod table;
pub mod view;

pub use column::{Column, ColumnData, ColumnKind, Value};
pub use engine::SortEngine;
pub use error::{Result, SortError};
pub use permutation::Permutation;
pub use table::{ColumnRef, Table};
pub use view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Maximum key bits consumed by one counting pass (1..=16)
    pub max_pass_bits: u32,
    /// Buckets at or below this size use insertion sort
    pub insertion_threshold: usize,
    /// Refine independent buckets on the rayon pool
    pub parallel: bool,
    /// Minimum non-null rows before parallel refinement is used
    pub parallel_threshold: usize,
    /// Re-check every produced permutation before returning it
    pub verify: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            max_pass_bits: MAX_PASS_BITS,
            insertion_threshold: 32,
            parallel: true,
            parallel_threshold: 1 << 16,
            verify: cfg!(debug_assertions),
        }
    }
}

impl SortConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PASS_BITS).contains(&self.max_pass_bits) {
            return Err(SortError::InvalidConfig {
                detail: format!(
                    "max_pass_bits must be within 1..={MAX_PASS_BITS}, got {}",
                    self.max_pass_bits
                ),
            });
        }
        Ok(())
    }

    pub fn radix_params(&self) -> RadixParams {
        RadixParams {
            max_pass_bits: self.max_pass_bits,
            insertion_threshold: self.insertion_threshold,
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

/// Sort `column` with the default engine.
pub fn sort(column: &Column) -> Result<Permutation> {
    SortEngine::default().sort(column)
}

/// Project `columns` through `perm`.
pub fn project(perm: Permutation, columns: Vec<&Column>) -> Result<View<'_>> {
    View::new(perm, columns)
}

/// Values of every view column, in view order.
pub fn materialize(view: &View<'_>) -> Vec<Vec<Option<Value>>> {
    view.materialize()
}

/// Re-verify a view's permutation.
pub fn check(view: &View<'_>) -> Result<()> {
    view.check()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SortConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.radix_params().max_pass_bits, 16);
    }

    #[test]
    fn zero_pass_bits_rejected() {
        let config = SortConfig {
            max_pass_bits: 0,
            ..SortConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sort_project_materialize() {
        let keys = Column::int4("A", [Some(2), None, Some(1)]).unwrap();
        let other = Column::bool1("B", [Some(true), Some(false), None]);
        let view = project(sort(&keys).unwrap(), vec![&other]).unwrap();
        check(&view).unwrap();
        assert_eq!(
            materialize(&view),
            vec![vec![Some(Value::Bool(false)), None, Some(Value::Bool(true))]]
        );
    }
}
