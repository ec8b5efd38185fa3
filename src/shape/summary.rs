//! Summary row builder: one flat row per document.

use crate::shape::extract::{object_id, safe_get, wrapped_date};
use crate::shape::types::{Cell, Row, ShapeConfig, Table};
use chrono::NaiveDateTime;
use serde_json::Value;

/// Item field whose sequence lengths are totalled per document.
const SELECTED_CATEGORIES_KEY: &str = "categoriasEscolhidas";

/// Build the summary table: one row per document, in input order.
///
/// Absent structures degrade to blanks and zeros; this builder never fails.
pub fn build_summary(documents: &[Value], config: &ShapeConfig) -> Table {
    let mut table = Table::new();
    for document in documents {
        table.push(summary_row(document, config));
    }
    table
}

fn summary_row(document: &Value, config: &ShapeConfig) -> Row {
    let audit = document.get(&config.audit_key);
    let mut row = Row::new();

    for id_field in &config.id_fields {
        row.set(
            id_field.column.clone(),
            Cell::Str(object_id(document.get(&id_field.field))),
        );
    }

    row.set("aluno_nome", Cell::or_blank(safe_get(audit, &["aluno", "nome"])));
    row.set("municipio_nome", Cell::or_blank(safe_get(audit, &["municipio", "nome"])));
    row.set(
        "acompanhamento_nome",
        Cell::or_blank(safe_get(audit, &["acompanhamento", "nome"])),
    );
    row.set(
        "prova_nome",
        Cell::or_blank(safe_get(audit, &["provaAcompanhamento", "nome"])),
    );
    row.set("turma_ano", Cell::or_blank(safe_get(audit, &["turma", "ano"])));
    row.set("turma_turno", Cell::or_blank(safe_get(audit, &["turma", "turno"])));

    row.set("data_criacao", date_cell(wrapped_date(document.get("createdAt"))));
    row.set("data_atualizacao", date_cell(wrapped_date(document.get("updatedAt"))));

    row.set("__v", Cell::or_blank(document.get("__v")));

    let items = config.child_items(document);
    row.set("total_questoes", Cell::Int(items.len() as i64));
    row.set(
        "total_categorias_escolhidas",
        Cell::Int(selected_category_total(items)),
    );

    row
}

fn date_cell(date: Option<NaiveDateTime>) -> Cell {
    match date {
        Some(dt) => Cell::DateTime(dt),
        None => Cell::Empty,
    }
}

/// Sum of the `categoriasEscolhidas` sequence lengths across items; items
/// lacking or mistyping the field contribute 0.
fn selected_category_total(items: &[Value]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.get(SELECTED_CATEGORIES_KEY).and_then(Value::as_array))
        .map(|categories| categories.len() as i64)
        .sum()
}
