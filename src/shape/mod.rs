//! Record shaping - turn loaded documents into the four output tables.
//!
//! Each builder walks the same read-only document slice independently and
//! produces its own table; builders share nothing but the slice and the
//! scalar extractors. Tables are derived artifacts: computed once per run,
//! never mutated afterwards.

pub mod extract;
pub mod flatten;
pub mod items;
pub mod raw;
pub mod summary;
pub mod types;
pub mod widths;

pub use types::{Cell, IdField, Row, ShapeConfig, Table};

use serde_json::Value;

/// The four derived tables of one conversion run.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub summary: Table,
    pub items: Table,
    pub raw: Table,
    pub normalized: Table,
}

/// Run every builder over the shared document slice.
///
/// Flattening is the only fallible builder; on a structural error its table
/// degrades to empty with a warning and the other three are still produced.
pub fn build_tables(documents: &[Value], config: &ShapeConfig) -> Tables {
    let normalized = match flatten::build_flattened(documents) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("⚠ Warning: normalized sheet skipped: {:#}", err);
            Table::default()
        }
    };

    Tables {
        summary: summary::build_summary(documents, config),
        items: items::build_items(documents, config),
        raw: raw::build_raw(documents),
        normalized,
    }
}
