//! Item explosion builder: one flat row per child item across all documents.

use crate::shape::extract::{object_id, safe_get};
use crate::shape::types::{Cell, Row, ShapeConfig, Table};
use serde_json::Value;

/// Item field holding its identifier wrapper; consumed into `item_id` and
/// excluded from the dynamic field pass.
const ITEM_ID_KEY: &str = "questaoId";

/// How many sequence elements the `<field>_list` preview shows.
const LIST_PREVIEW_LEN: usize = 5;

/// Build the detailed item table.
///
/// Outer iteration follows document order; `item_numero` is the item's
/// 1-based position within its document. Field names vary across items, so
/// the resulting table is ragged by design. This builder never fails.
pub fn build_items(documents: &[Value], config: &ShapeConfig) -> Table {
    let mut table = Table::new();
    for document in documents {
        let resultado_id = object_id(document.get("_id"));
        let audit = document.get(&config.audit_key);
        let aluno_nome = Cell::or_blank(safe_get(audit, &["aluno", "nome"]));

        for (idx, item) in config.child_items(document).iter().enumerate() {
            table.push(item_row(item, idx + 1, &resultado_id, &aluno_nome));
        }
    }
    table
}

fn item_row(item: &Value, position: usize, resultado_id: &str, aluno_nome: &Cell) -> Row {
    let mut row = Row::new();
    row.set("resultado_id", Cell::Str(resultado_id.to_string()));
    row.set("aluno_nome", aluno_nome.clone());
    row.set("item_numero", Cell::Int(position as i64));
    row.set("item_id", Cell::Str(object_id(item.get(ITEM_ID_KEY))));
    row.set("item_formato", Cell::or_blank(item.get("questaoFormato")));
    row.set("item_tipo", Cell::or_blank(item.get("questaoTipo")));

    let Some(fields) = item.as_object() else {
        return row;
    };

    for (key, value) in fields {
        if key == ITEM_ID_KEY {
            continue;
        }
        match value {
            Value::Array(elements) => {
                row.set(format!("{}_count", key), Cell::Int(elements.len() as i64));
                let preview: Vec<String> = elements
                    .iter()
                    .take(LIST_PREVIEW_LEN)
                    .map(scalar_text)
                    .collect();
                row.set(format!("{}_list", key), Cell::Str(preview.join(", ")));
            }
            Value::Object(_) => row.set(key.clone(), Cell::Str(value.to_string())),
            scalar => row.set(key.clone(), Cell::from_value(scalar)),
        }
    }

    row
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn single(document: Value) -> Table {
        build_items(&[document], &ShapeConfig::default())
    }

    #[test]
    fn test_one_row_per_item_with_positions() {
        let table = single(json!({
            "_id": {"$oid": "res1"},
            "questoes": [
                {"questaoId": {"$oid": "q1"}},
                {"questaoId": {"$oid": "q2"}},
                {"questaoId": {"$oid": "q3"}}
            ]
        }));

        assert_eq!(table.len(), 3);
        for (idx, row) in table.rows().iter().enumerate() {
            assert_eq!(row.get("resultado_id"), Some(&Cell::Str("res1".into())));
            assert_eq!(row.get("item_numero"), Some(&Cell::Int(idx as i64 + 1)));
        }
        assert_eq!(table.rows()[2].get("item_id"), Some(&Cell::Str("q3".into())));
    }

    #[test]
    fn test_row_count_sums_across_documents() {
        let documents = vec![
            json!({"questoes": [{}, {}]}),
            json!({"questoes": []}),
            json!({"questoes": [{}]}),
        ];

        let table = build_items(&documents, &ShapeConfig::default());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_sequence_fields_become_count_and_preview() {
        let table = single(json!({
            "questoes": [{
                "alternativas": ["a", "b", "c", "d", "e", "f", "g"]
            }]
        }));
        let row = &table.rows()[0];

        assert_eq!(row.get("alternativas_count"), Some(&Cell::Int(7)));
        assert_eq!(
            row.get("alternativas_list"),
            Some(&Cell::Str("a, b, c, d, e".into()))
        );
    }

    #[test]
    fn test_mapping_fields_become_json_text() {
        let table = single(json!({
            "questoes": [{"resposta": {"valor": 10}}]
        }));

        assert_eq!(
            table.rows()[0].get("resposta"),
            Some(&Cell::Str("{\"valor\":10}".into()))
        );
    }

    #[test]
    fn test_scalar_fields_pass_through_and_id_is_consumed() {
        let table = single(json!({
            "questoes": [{
                "questaoId": {"$oid": "q1"},
                "questaoTipo": "objetiva",
                "peso": 2.5,
                "anulada": false
            }]
        }));
        let row = &table.rows()[0];

        assert_eq!(row.get("item_id"), Some(&Cell::Str("q1".into())));
        assert!(row.get("questaoId").is_none());
        // the dynamic pass re-emits questaoTipo beside item_tipo
        assert_eq!(row.get("questaoTipo"), Some(&Cell::Str("objetiva".into())));
        assert_eq!(row.get("item_tipo"), Some(&Cell::Str("objetiva".into())));
        assert_eq!(row.get("peso"), Some(&Cell::Float(2.5)));
        assert_eq!(row.get("anulada"), Some(&Cell::Bool(false)));
    }

    #[test]
    fn test_heterogeneous_items_produce_ragged_columns() {
        let table = single(json!({
            "questoes": [
                {"nota": 8},
                {"observacao": "revisar"}
            ]
        }));

        assert!(table.columns().contains(&"nota".to_string()));
        assert!(table.columns().contains(&"observacao".to_string()));
        assert!(table.rows()[0].get("observacao").is_none());
        assert!(table.rows()[1].get("nota").is_none());
    }

    #[test]
    fn test_non_mapping_item_keeps_lead_columns() {
        let table = single(json!({
            "_id": {"$oid": "res1"},
            "questoes": ["not an object"]
        }));
        let row = &table.rows()[0];

        assert_eq!(table.len(), 1);
        assert_eq!(row.get("item_numero"), Some(&Cell::Int(1)));
        assert_eq!(row.get("item_id"), Some(&Cell::Str(String::new())));
    }

    #[test]
    fn test_preview_stringifies_mixed_elements() {
        let table = single(json!({
            "questoes": [{"valores": [1, "dois", true, null]}]
        }));

        assert_eq!(
            table.rows()[0].get("valores_list"),
            Some(&Cell::Str("1, dois, true, ".into()))
        );
    }
}
