//! Conversion between Arrow `RecordBatch` and sortview tables.

use anyhow::{Context, Result};
use arrow_array::{
    Array, ArrayRef, BooleanArray, Int16Array, Int32Array, Int64Array, Int8Array, RecordBatch,
};
use arrow_schema::{Field, Schema};
use std::sync::Arc;
use tracing::debug;

use sortview_core::column::{BOOL_TRUE, NA_BOOL, NA_I1, NA_I2, NA_I4, NA_I8};
use sortview_core::{Column, ColumnData, ColumnKind, Table, View};

use crate::schema_utils::SchemaExt;
use crate::type_map::data_type_for_kind;

// ---------------------------------------------------------------------------
// Arrow → Table
// ---------------------------------------------------------------------------

/// Convert a `RecordBatch` into an owned [`Table`].
///
/// Arrow nulls become the kind's NA sentinel. A valid value that equals the
/// sentinel (e.g. `i32::MIN`) cannot be represented and is rejected.
pub fn record_batch_to_table(batch: &RecordBatch) -> Result<Table> {
    let schema = batch.schema();
    let kinds = schema.column_kinds()?;

    let mut columns = Vec::with_capacity(batch.num_columns());
    for ((field, array), kind) in schema.fields().iter().zip(batch.columns()).zip(kinds) {
        let column = array_to_column(field.name(), array.as_ref(), kind)
            .with_context(|| format!("Converting column '{}'", field.name()))?;
        columns.push(column);
    }

    debug!(
        columns = columns.len(),
        rows = batch.num_rows(),
        "record_batch_to_table"
    );
    Ok(Table::new(columns)?)
}

fn array_to_column(name: &str, array: &dyn Array, kind: ColumnKind) -> Result<Column> {
    let column = match kind {
        ColumnKind::Bool1 => Column::bool1(name, downcast::<BooleanArray>(array)?.iter()),
        ColumnKind::Int1 => Column::int1(name, downcast::<Int8Array>(array)?.iter())?,
        ColumnKind::Int2 => Column::int2(name, downcast::<Int16Array>(array)?.iter())?,
        ColumnKind::Int4 => Column::int4(name, downcast::<Int32Array>(array)?.iter())?,
        ColumnKind::Int8 => Column::int8(name, downcast::<Int64Array>(array)?.iter())?,
    };
    Ok(column)
}

fn downcast<T: Array + 'static>(array: &dyn Array) -> Result<&T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("Unexpected array type {:?}", array.data_type()))
}

// ---------------------------------------------------------------------------
// Table / View → Arrow
// ---------------------------------------------------------------------------

/// Arrow array holding `column`'s values; sentinels become Arrow nulls.
pub fn column_to_array(column: &Column) -> ArrayRef {
    fn opt<T: Copy + PartialEq>(v: &[T], na: T) -> impl Iterator<Item = Option<T>> + '_ {
        v.iter().map(move |&x| (x != na).then_some(x))
    }

    match column.data() {
        ColumnData::Bool1(v) => Arc::new(
            v.iter()
                .map(|&x| (x != NA_BOOL).then_some(x == BOOL_TRUE))
                .collect::<BooleanArray>(),
        ),
        ColumnData::Int1(v) => Arc::new(opt(v, NA_I1).collect::<Int8Array>()),
        ColumnData::Int2(v) => Arc::new(opt(v, NA_I2).collect::<Int16Array>()),
        ColumnData::Int4(v) => Arc::new(opt(v, NA_I4).collect::<Int32Array>()),
        ColumnData::Int8(v) => Arc::new(opt(v, NA_I8).collect::<Int64Array>()),
    }
}

fn columns_to_record_batch(columns: &[&Column]) -> Result<RecordBatch> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(c.name(), data_type_for_kind(c.kind()), true))
        .collect();
    let arrays: Vec<ArrayRef> = columns.iter().map(|c| column_to_array(c)).collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .context("Failed to build RecordBatch")
}

pub fn table_to_record_batch(table: &Table) -> Result<RecordBatch> {
    columns_to_record_batch(&table.column_refs())
}

/// Materialise a view into a `RecordBatch`, rows in view order.
pub fn view_to_record_batch(view: &View<'_>) -> Result<RecordBatch> {
    let owned = view.to_columns();
    let refs: Vec<&Column> = owned.iter().collect();
    let batch = columns_to_record_batch(&refs)?;
    debug!(
        columns = batch.num_columns(),
        rows = batch.num_rows(),
        "view_to_record_batch"
    );
    Ok(batch)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
