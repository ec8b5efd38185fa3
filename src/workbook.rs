//! Rendering collaborator: tables in, a multi-sheet .xlsx workbook out.
//!
//! The shaping pipeline never touches spreadsheet bytes; this module owns
//! file creation, sheet writing, and the application of width hints.

use crate::shape::{widths, Cell, Table, Tables};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

// Sheet names carry a numbering prefix so spreadsheet tools keep them in order.
pub const SHEET_SUMMARY: &str = "1. Dados Principais";
pub const SHEET_ITEMS: &str = "2. Itens Detalhados";
pub const SHEET_RAW: &str = "3. Dados Brutos JSON";
pub const SHEET_NORMALIZED: &str = "4. Dados Normalizados";

/// Column of the raw sheet holding the serialized document text.
const RAW_TEXT_COLUMN: &str = "json_completo";

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Write every non-empty table as a sheet of the workbook at `path`, in
/// fixed order. Returns the number of sheets written.
pub fn write_workbook(path: &Path, tables: &Tables) -> Result<usize> {
    let mut workbook = Workbook::new();
    let mut sheets = 0;

    for (name, table, measured) in [
        (SHEET_SUMMARY, &tables.summary, true),
        (SHEET_ITEMS, &tables.items, true),
        (SHEET_RAW, &tables.raw, false),
        (SHEET_NORMALIZED, &tables.normalized, true),
    ] {
        if table.is_empty() {
            continue;
        }

        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, name, table)?;
        if measured {
            apply_measured_widths(worksheet, table)?;
        } else {
            apply_raw_width(worksheet, table)?;
        }
        sheets += 1;
    }

    // a workbook file must contain at least one sheet to be valid
    if sheets == 0 {
        workbook.add_worksheet();
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write workbook {}", path.display()))?;

    Ok(sheets)
}

fn write_sheet(worksheet: &mut Worksheet, name: &str, table: &Table) -> Result<()> {
    worksheet.set_name(name)?;
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    for (col, column) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, column)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, column) in table.columns().iter().enumerate() {
            let col_num = col as u16;
            match row.get(column) {
                // missing cells of a ragged row stay blank
                None | Some(Cell::Empty) => {}
                Some(Cell::Bool(b)) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                Some(Cell::Int(i)) => {
                    worksheet.write_number(row_num, col_num, *i as f64)?;
                }
                Some(Cell::Float(v)) => {
                    worksheet.write_number(row_num, col_num, *v)?;
                }
                Some(Cell::Str(s)) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                Some(Cell::DateTime(dt)) => {
                    worksheet.write_datetime_with_format(row_num, col_num, dt, &datetime_format)?;
                }
            }
        }
    }

    Ok(())
}

fn apply_measured_widths(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col, width) in widths::column_widths(table).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }
    Ok(())
}

/// The raw sheet's text column gets a fixed wide width; its other columns
/// keep the spreadsheet default.
fn apply_raw_width(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col, column) in table.columns().iter().enumerate() {
        if column == RAW_TEXT_COLUMN {
            worksheet.set_column_width(col as u16, widths::RAW_TEXT_WIDTH)?;
        }
    }
    Ok(())
}
