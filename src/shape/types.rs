use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Configuration for the shaping pipeline
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Document field holding the nested item collection
    pub nested_items_key: String,

    /// Document field holding the human-readable audit block
    pub audit_key: String,

    /// Document fields carrying ObjectId wrappers, with their output columns
    pub id_fields: Vec<IdField>,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig {
            nested_items_key: String::from("questoes"),
            audit_key: String::from("auditoria"),
            // The reviewer field is spelled "corrigoPor" in the source exports
            id_fields: vec![
                IdField::new("_id", "resultado_id"),
                IdField::new("aluno", "aluno_id"),
                IdField::new("turma", "turma_id"),
                IdField::new("provaAcompanhamento", "prova_acompanhamento_id"),
                IdField::new("acompanhamento", "acompanhamento_id"),
                IdField::new("municipio", "municipio_id"),
                IdField::new("corrigoPor", "corrigido_por_id"),
            ],
        }
    }
}

impl ShapeConfig {
    /// The document's child-item collection, empty when absent or not a sequence.
    pub fn child_items<'a>(&self, document: &'a Value) -> &'a [Value] {
        document
            .get(&self.nested_items_key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A document field eligible for identifier extraction and its output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdField {
    pub field: String,
    pub column: String,
}

impl IdField {
    pub fn new(field: impl Into<String>, column: impl Into<String>) -> Self {
        IdField {
            field: field.into(),
            column: column.into(),
        }
    }

    /// Derive the output column from a field name: snake-cased plus an `_id`
    /// suffix. The document id field itself maps to `resultado_id`.
    pub fn from_field(field: &str) -> Self {
        let column = if field == "_id" {
            String::from("resultado_id")
        } else {
            format!("{}_id", snake_case(field))
        };
        IdField::new(field, column)
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// A single spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Classify a JSON value into a cell; structures collapse to their
    /// compact JSON text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => Cell::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => Cell::Str(s.clone()),
            other => Cell::Str(other.to_string()),
        }
    }

    /// Cell for an optional value, blank string when absent.
    pub fn or_blank(value: Option<&Value>) -> Self {
        value.map(Cell::from_value).unwrap_or_else(|| Cell::Str(String::new()))
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        Cell::from_value(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Str(s) => f.write_str(s),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// One output row: column name → cell, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Set a column, overwriting any previous value under the same name.
    pub fn set(&mut self, column: impl Into<String>, cell: Cell) {
        let column = column.into();
        if let Some(slot) = self.cells.iter_mut().find(|(name, _)| *name == column) {
            slot.1 = cell;
        } else {
            self.cells.push((column, cell));
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered sequence of rows plus the union of their columns.
///
/// Rows of the same table need not share a column set; the union keeps
/// first-seen order so ragged tables render deterministically.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    seen: HashSet<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    pub fn push(&mut self, row: Row) {
        for column in row.columns() {
            if self.seen.insert(column.to_string()) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
