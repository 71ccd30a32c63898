// src/record/mod.rs
// ============================================================================
// RECORD - Lectura de exportaciones MMuM (JSON)
// ============================================================================
//
// MMuM no es estricto con los tipos: la misma clave puede llegar como
// número o como texto ("78", "75,5"), y las ranuras sin usar suelen venir
// como "" o null. Todo acceso a campos pasa por estos lectores laxos.
//
// ============================================================================

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// Etiqueta de versión de exportación
pub const EXPORT_VERSION_KEY: &str = "ExportVersion";

/// Lee un fichero de exportación MMuM
pub fn load_record(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    let data = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&data).map_err(|source| ConvertError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Raíz del registro como objeto
pub fn as_object(record: &Value) -> Result<&Map<String, Value>> {
    record
        .as_object()
        .ok_or_else(|| ConvertError::NotAnObject(crate::error::json_kind(record)))
}

/// Un campo está presente si existe, no es null y no es texto vacío.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Número desde número JSON o texto numérico (acepta coma decimal).
pub fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Texto desde string JSON o número (los números se renderizan).
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accesores por clave sobre un objeto
pub trait FieldExt {
    fn field(&self, key: &str) -> Option<&Value>;

    fn has(&self, key: &str) -> bool {
        is_present(self.field(key))
    }

    fn number(&self, key: &str) -> Option<f64> {
        number(self.field(key))
    }

    fn text(&self, key: &str) -> Option<String> {
        text(self.field(key))
    }
}

impl FieldExt for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl FieldExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Entradas de una secuencia MMuM v2 (solo los elementos que son objetos).
/// Clave ausente o que no es array → secuencia vacía.
pub fn entries<'a>(record: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Map<String, Value>> {
    record
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}
