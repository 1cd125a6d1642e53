//! Arrow adapters for sortview tables and views.
//!
//! Arrow carries nulls in a validity bitmap; sortview columns carry them as
//! an in-band sentinel (the kind's minimum value). Conversion maps one onto
//! the other:
//!
//! ```text
//! RecordBatch ──record_batch_to_table──▶ Table ──sort──▶ View ──view_to_record_batch──▶ RecordBatch
//! ```
//!
//! Only `Boolean` and `Int8`/`Int16`/`Int32`/`Int64` fields are accepted.

pub mod record_batch_convert;
pub mod schema_utils;
pub mod type_map;

pub use record_batch_convert::{
    column_to_array, record_batch_to_table, table_to_record_batch, view_to_record_batch,
};
pub use schema_utils::{schema_for_view, SchemaExt};
pub use type_map::{data_type_for_kind, kind_for_data_type};
