//! # sheetpress - nested JSON exports to multi-sheet workbooks
//!
//! Converts an array of nested JSON documents (typically MongoDB exports)
//! into an .xlsx workbook with up to four sheets: a summary row per
//! document, one row per exploded child item, a lossless raw JSON backup,
//! and a fully-flattened view.
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetpress::shape::{build_tables, ShapeConfig};
//! use serde_json::json;
//!
//! let documents = vec![json!({
//!     "_id": {"$oid": "507f1f77bcf86cd799439011"},
//!     "auditoria": {"aluno": {"nome": "Maria"}},
//!     "questoes": [{"questaoTipo": "objetiva"}]
//! })];
//!
//! let tables = build_tables(&documents, &ShapeConfig::default());
//!
//! assert_eq!(tables.summary.len(), 1);
//! assert_eq!(tables.items.len(), 1);
//! ```
//!
//! File-to-file conversion goes through [`convert_file`], which loads the
//! documents, runs the builders, and hands the tables to the workbook
//! writer.

use anyhow::Result;
use std::path::{Path, PathBuf};

pub mod input;
pub mod shape;
pub mod workbook;

// Re-export commonly used types for convenience
pub use input::{load_documents, LoadError};
pub use shape::{build_tables, Cell, IdField, Row, ShapeConfig, Table, Tables};
pub use workbook::write_workbook;

/// What a finished conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    pub documents: usize,
    pub summary_rows: usize,
    pub item_rows: usize,
    pub sheets: usize,
    pub output: PathBuf,
}

/// Default output path: the input path with a spreadsheet extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

/// Main entry point: convert one JSON export file into a workbook.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    config: &ShapeConfig,
) -> Result<ConvertSummary> {
    let documents = load_documents(input)?;
    let tables = build_tables(&documents, config);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    let sheets = write_workbook(&output, &tables)?;

    Ok(ConvertSummary {
        documents: documents.len(),
        summary_rows: tables.summary.len(),
        item_rows: tables.items.len(),
        sheets,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/export.json")),
            PathBuf::from("/data/export.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("export")),
            PathBuf::from("export.xlsx")
        );
    }
}
