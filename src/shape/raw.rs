//! Raw preservation builder: a lossless text backup of every document.

use crate::shape::extract::object_id;
use crate::shape::types::{Cell, Row, Table};
use serde_json::Value;

/// Build the raw backup table: one row per document holding its identifier
/// and an indented JSON serialization of the full original structure.
/// Non-ASCII characters are preserved verbatim, not escaped.
pub fn build_raw(documents: &[Value]) -> Table {
    let mut table = Table::new();
    for document in documents {
        let mut row = Row::new();
        row.set("resultado_id", Cell::Str(object_id(document.get("_id"))));
        // serializing a Value to a String cannot fail
        row.set(
            "json_completo",
            Cell::Str(serde_json::to_string_pretty(document).unwrap_or_default()),
        );
        table.push(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_row_per_document() {
        let documents = vec![json!({"_id": {"$oid": "a"}}), json!({"_id": {"$oid": "b"}})];
        let table = build_raw(&documents);

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), &["resultado_id", "json_completo"]);
        assert_eq!(table.rows()[1].get("resultado_id"), Some(&Cell::Str("b".into())));
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let document = json!({
            "_id": {"$oid": "res1"},
            "auditoria": {"aluno": {"nome": "João"}},
            "questoes": [{"nota": 9.5, "categoriasEscolhidas": ["leitura", "escrita"]}]
        });

        let table = build_raw(std::slice::from_ref(&document));
        let Cell::Str(text) = table.rows()[0].get("json_completo").unwrap() else {
            panic!("expected text cell");
        };

        let reparsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_non_ascii_preserved_verbatim() {
        let table = build_raw(&[json!({"nome": "São João do Açaí"})]);
        let Cell::Str(text) = table.rows()[0].get("json_completo").unwrap() else {
            panic!("expected text cell");
        };

        assert!(text.contains("São João do Açaí"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_serialization_is_indented() {
        let table = build_raw(&[json!({"a": {"b": 1}})]);
        let Cell::Str(text) = table.rows()[0].get("json_completo").unwrap() else {
            panic!("expected text cell");
        };

        assert!(text.contains('\n'));
        assert!(text.contains("  \"a\""));
    }
}
