// src/error.rs
// ============================================================================
// ERRORES - Tipos de error de la librería
// ============================================================================
//
// Los mappers son best-effort: nunca fallan por datos ausentes. Solo hay
// error si la raíz del registro no es un objeto o si falla la E/S.
//
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// La raíz del registro MMuM no es un objeto JSON
    #[error("MMuM record root must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Fallo del writer XML (escritura sobre buffer en memoria)
    #[error("BeerXML writer failed")]
    Xml(#[from] quick_xml::Error),

    #[error("BeerXML output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Nombre del tipo JSON (para mensajes de error)
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "buffer closed");
        let err: ConvertError = quick_xml::Error::from(io).into();
        assert!(matches!(err, ConvertError::Xml(_)));
        assert_eq!(err.to_string(), "BeerXML writer failed");
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&serde_json::json!([1, 2])), "array");
        assert_eq!(json_kind(&serde_json::Value::Null), "null");
    }
}
