use std::sync::Arc;

use anyhow::Result;
use arrow_array::{BooleanArray, Int32Array, Int64Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use sortview::arrow_interop::{record_batch_to_table, view_to_record_batch};
use sortview::{Column, ColumnRef, SortConfig, SortEngine, Table, View};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG overrides; engine and kernel summaries are at debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("sortview - Rust examples");

    // Example 1: sort one column, project a companion through it
    secondary_projection_example()?;

    // Example 2: re-sort an existing view
    view_resort_example()?;

    // Example 3: Arrow in, Arrow out
    arrow_round_trip_example()?;

    Ok(())
}

fn log_view(view: &View<'_>) {
    for (name, values) in view.names().iter().zip(view.materialize()) {
        let rendered: Vec<String> = values
            .iter()
            .map(|v| v.map_or_else(|| "NA".to_string(), |v| v.to_string()))
            .collect();
        info!("  {name}: [{}]", rendered.join(", "));
    }
}

fn secondary_projection_example() -> Result<()> {
    info!("=== Example 1: Secondary projection ===");

    let table = Table::new(vec![
        Column::int4(
            "A",
            [Some(5), Some(3), Some(5), None, Some(1_000_000), None, Some(3), None],
        )?,
        Column::int4("B", [1, 5, 10, 20, 50, 100, 200, 500].map(Some))?,
    ])?;

    let engine = SortEngine::default();
    let view = engine.sort_table(&table, "A", None)?;
    view.check()?;
    log_view(&view);

    Ok(())
}

fn view_resort_example() -> Result<()> {
    info!("=== Example 2: Re-sorting a view ===");

    let table = Table::new(vec![
        Column::int2("score", [Some(70), Some(90), Some(70), None, Some(90)])?,
        Column::bool1("active", [Some(true), Some(false), None, Some(true), Some(true)]),
    ])?;

    // sequential refinement with narrow passes
    let engine = SortEngine::new(SortConfig {
        max_pass_bits: 8,
        parallel: false,
        ..SortConfig::default()
    })?;

    let by_score = engine.sort_table(&table, "score", None)?;
    info!("by score:");
    log_view(&by_score);

    let by_active = engine.sort_view(&by_score, "active")?;
    info!("by active, ties kept in score order:");
    log_view(&by_active.select(&[ColumnRef::from("active"), ColumnRef::from("score")])?);

    Ok(())
}

fn arrow_round_trip_example() -> Result<()> {
    info!("=== Example 3: Arrow round trip ===");

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("qty", DataType::Int32, true),
        Field::new("flag", DataType::Boolean, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![4, 1, 3, 2])),
            Arc::new(Int32Array::from(vec![Some(40), None, Some(30), Some(20)])),
            Arc::new(BooleanArray::from(vec![Some(false), Some(true), None, Some(true)])),
        ],
    )?;

    let table = record_batch_to_table(&batch)?;
    let view = SortEngine::default().sort_table(&table, "id", None)?;
    let sorted = view_to_record_batch(&view)?;

    info!(
        "sorted batch: {} rows, {} columns, {} null qty",
        sorted.num_rows(),
        sorted.num_columns(),
        sorted.column(1).null_count()
    );
    log_view(&view);

    Ok(())
}
