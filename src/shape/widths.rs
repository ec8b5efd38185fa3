//! Column-width heuristic applied at export time. Cosmetic only: widths
//! never affect data content or row inclusion.

use crate::shape::types::Table;

/// Widest a measured column is allowed to get.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Padding added around the longest cell text.
pub const COLUMN_PADDING: usize = 2;

/// Fixed width for the raw JSON text column.
pub const RAW_TEXT_WIDTH: f64 = 100.0;

/// Display widths for every column of a table, in column order: the longest
/// cell text (header included) plus padding, capped at [`MAX_COLUMN_WIDTH`].
pub fn column_widths(table: &Table) -> Vec<f64> {
    table
        .columns()
        .iter()
        .map(|column| {
            let mut longest = column.chars().count();
            for row in table.rows() {
                if let Some(cell) = row.get(column) {
                    longest = longest.max(cell.to_string().chars().count());
                }
            }
            (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH) as f64
        })
        .collect()
}
