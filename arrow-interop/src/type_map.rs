//! Mapping between Arrow data types and column kinds.

use anyhow::Result;
use arrow_schema::DataType;
use sortview_core::{ColumnKind, SortError};

/// Column kind for an Arrow type; anything but signed integers and booleans
/// is rejected with [`SortError::InvalidKind`].
pub fn kind_for_data_type(dt: &DataType) -> Result<ColumnKind> {
    match dt {
        DataType::Boolean => Ok(ColumnKind::Bool1),
        DataType::Int8 => Ok(ColumnKind::Int1),
        DataType::Int16 => Ok(ColumnKind::Int2),
        DataType::Int32 => Ok(ColumnKind::Int4),
        DataType::Int64 => Ok(ColumnKind::Int8),
        other => Err(SortError::InvalidKind {
            kind: format!("{other:?}"),
        }
        .into()),
    }
}

pub fn data_type_for_kind(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Bool1 => DataType::Boolean,
        ColumnKind::Int1 => DataType::Int8,
        ColumnKind::Int2 => DataType::Int16,
        ColumnKind::Int4 => DataType::Int32,
        ColumnKind::Int8 => DataType::Int64,
    }
}
