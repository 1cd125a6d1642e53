use anyhow::{Context, Result};
use arrow_schema::{Field, Schema};
use sortview_core::{ColumnKind, View};

use crate::type_map::{data_type_for_kind, kind_for_data_type};

pub trait SchemaExt {
    /// Kind of every field, failing on the first unsupported one.
    fn column_kinds(&self) -> Result<Vec<ColumnKind>>;
    fn is_sortable(&self) -> bool;
}

impl SchemaExt for Schema {
    fn column_kinds(&self) -> Result<Vec<ColumnKind>> {
        self.fields()
            .iter()
            .map(|f| {
                kind_for_data_type(f.data_type())
                    .with_context(|| format!("Column '{}'", f.name()))
            })
            .collect()
    }

    fn is_sortable(&self) -> bool {
        self.fields()
            .iter()
            .all(|f| kind_for_data_type(f.data_type()).is_ok())
    }
}

/// Arrow schema describing a view's columns (all fields nullable).
pub fn schema_for_view(view: &View<'_>) -> Schema {
    let fields: Vec<Field> = view
        .names()
        .into_iter()
        .zip(view.kinds())
        .map(|(name, kind)| Field::new(name, data_type_for_kind(kind), true))
        .collect();
    Schema::new(fields)
}
