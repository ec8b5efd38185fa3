//! sheetpress: convert nested JSON exports into a multi-sheet Excel workbook.
//!
//! Usage:
//!   # Convert next to the input file (data.xlsx)
//!   sheetpress data.json
//!
//!   # Explicit output path
//!   sheetpress data.json -o report.xlsx
//!
//!   # Exports with differently named collections
//!   sheetpress data.json --nested-key items --audit-key metadata

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::Parser;
use sheetpress::{convert_file, IdField, ShapeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetpress")]
#[command(version)]
#[command(about = "Convert nested JSON exports into a multi-sheet Excel workbook", long_about = None)]
struct Args {
    /// Input JSON file (a top-level array of documents)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output .xlsx file (default: input path with an .xlsx extension)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Document field holding the nested item collection
    #[arg(long, default_value = "questoes")]
    nested_key: String,

    /// Document field holding the human-readable audit block
    #[arg(long, default_value = "auditoria")]
    audit_key: String,

    /// Comma-separated document fields carrying ObjectId wrappers
    #[arg(long)]
    id_fields: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.input.exists() {
        bail!("input file not found: {}", args.input.display());
    }

    let mut config = ShapeConfig::default();
    config.nested_items_key = args.nested_key;
    config.audit_key = args.audit_key;
    if let Some(fields) = args.id_fields {
        config.id_fields = fields
            .split(',')
            .map(|field| IdField::from_field(field.trim()))
            .collect();
    }

    println!("📂 Reading {}", args.input.display());
    let summary = convert_file(&args.input, args.output.as_deref(), &config)?;

    println!("✓ {} documents converted", summary.documents);
    println!("  summary rows: {}", summary.summary_rows);
    println!("  item rows:    {}", summary.item_rows);
    println!("  sheets:       {}", summary.sheets);
    println!("💾 Saved {}", summary.output.display());

    Ok(())
}
