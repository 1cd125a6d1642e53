//! `sortview`: stable radix sorting of fixed-width nullable columns.
//!
//! Sorting a column yields a [`Permutation`]; projecting columns through it
//! yields a [`View`] that reads the original storage in sorted order.
//!
//! ```
//! use sortview::{Column, SortEngine, Value};
//!
//! let keys = Column::int4("A", [Some(17), Some(2), None, Some(-45), Some(2)])?;
//! let engine = SortEngine::default();
//! let perm = engine.sort(&keys)?;
//! assert_eq!(perm.as_slice(), &[2, 3, 1, 4, 0]);
//!
//! let view = engine.project(perm, vec![&keys])?;
//! assert_eq!(view.value(1, "A")?, Some(Value::Int(-45)));
//! # Ok::<(), sortview::SortError>(())
//! ```

pub use sortview_core::*;

pub use arrow_interop;
pub use radix_kernels;
