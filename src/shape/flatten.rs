//! Full flattening builder: every document's structure collapsed into
//! underscore-joined columns.

use crate::shape::types::{Cell, Row, Table};
use anyhow::{bail, Context, Result};
use serde_json::Value;

/// Build the normalized table: one row per document, nested key paths
/// joined with `_` and column names sanitized of wrapper markers.
///
/// The only fallible builder. A structural error (a non-mapping document,
/// or two paths collapsing onto the same sanitized column) fails the whole
/// table; the caller degrades it to empty instead of aborting the run.
pub fn build_flattened(documents: &[Value]) -> Result<Table> {
    let mut table = Table::new();
    for (idx, document) in documents.iter().enumerate() {
        let Some(fields) = document.as_object() else {
            bail!("document {} is not an object and cannot be flattened", idx);
        };

        let mut row = Row::new();
        for (key, value) in fields {
            flatten_into(key, value, &mut row)
                .with_context(|| format!("failed to flatten document {}", idx))?;
        }
        table.push(row);
    }
    Ok(table)
}

fn flatten_into(path: &str, value: &Value, row: &mut Row) -> Result<()> {
    match value {
        Value::Object(fields) => {
            for (key, nested) in fields {
                flatten_into(&format!("{}_{}", path, key), nested, row)?;
            }
        }
        // sequences stay whole; the normalized sheet does not explode them
        Value::Array(_) => insert_column(row, path, Cell::Str(value.to_string()))?,
        scalar => insert_column(row, path, Cell::from_value(scalar))?,
    }
    Ok(())
}

fn insert_column(row: &mut Row, path: &str, cell: Cell) -> Result<()> {
    let column = sanitize_column(path);
    if row.contains(&column) {
        bail!("flattened paths collide on column '{}'", column);
    }
    row.set(column, cell);
    Ok(())
}

/// Strip the `$` wrapper marker and turn literal dots into underscores, so
/// wrapper keys collapse into `<field>_<wrapperkey>` columns.
fn sanitize_column(path: &str) -> String {
    path.replace('$', "").replace('.', "_")
}
