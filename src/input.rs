//! Input loading: one UTF-8 JSON file holding the full document array.
//!
//! The whole file is read and parsed in one shot; there is no streaming.
//! Any error here aborts the conversion before a single table is built.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a conversion before any table is built.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a top-level array of documents in {}, found {}", .path.display(), .found)]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// Load the document array from `path`.
///
/// simd-json makes the first parse attempt; on failure serde_json re-parses
/// the original bytes so its diagnostics reach the user.
pub fn load_documents(path: &Path) -> Result<Vec<Value>, LoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut simd_buf = bytes.clone();
    let parsed: Value = match simd_json::serde::from_slice(&mut simd_buf) {
        Ok(value) => value,
        Err(_) => serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
    };

    match parsed {
        Value::Array(documents) => Ok(documents),
        other => Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
            found: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_a_document_array() {
        let file = write_temp(r#"[{"_id": {"$oid": "a"}}, {"_id": {"$oid": "b"}}]"#);
        let documents = load_documents(file.path()).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0]["_id"]["$oid"], "a");
    }

    #[test]
    fn test_missing_file() {
        let err = load_documents(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_temp("[{\"unterminated\": ");
        let err = load_documents(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_non_array_top_level() {
        let file = write_temp(r#"{"not": "an array"}"#);
        let err = load_documents(file.path()).unwrap_err();
        assert!(err.to_string().contains("an object"));
        assert!(matches!(err, LoadError::NotAnArray { .. }));
    }

    #[test]
    fn test_utf8_content_survives() {
        let file = write_temp(r#"[{"nome": "Ceará"}]"#);
        let documents = load_documents(file.path()).unwrap();
        assert_eq!(documents[0]["nome"], "Ceará");
    }
}
