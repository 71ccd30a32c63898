// src/mapping/factory.rs
// ============================================================================
// MAPPER FACTORY - Elige el mapper según ExportVersion
// ============================================================================
//
// Política: solo "2.0" va a v2. Cualquier otro valor (o ausencia de la
// etiqueta) cae en v1; si no es "1.0" se avisa.
//
// ============================================================================

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use super::traits::RecipeMapper;
use super::types::FormatVersion;
use super::v1::V1Mapper;
use super::v2::V2Mapper;
use crate::beerxml::Recipe;
use crate::decode::{EntityDecoder, TextDecoder};
use crate::error::Result;
use crate::record::{FieldExt, EXPORT_VERSION_KEY};

/// Detecta la versión de exportación de un registro
pub fn detect_version(record: &Value) -> FormatVersion {
    let tag = record.text(EXPORT_VERSION_KEY);

    match tag.as_deref().map(str::trim) {
        Some("2.0") => FormatVersion::V2,
        Some("1.0") => FormatVersion::V1,
        Some(other) => {
            warn!("Unknown ExportVersion '{}', trying v1 mapper", other);
            FormatVersion::V1
        }
        None => {
            warn!("No ExportVersion in record, trying v1 mapper");
            FormatVersion::V1
        }
    }
}

/// Crea el mapper de una versión
pub fn create_mapper(version: FormatVersion, decoder: Arc<dyn TextDecoder>) -> Box<dyn RecipeMapper> {
    match version {
        FormatVersion::V1 => Box::new(V1Mapper::new(decoder)),
        FormatVersion::V2 => Box::new(V2Mapper::new(decoder)),
    }
}

/// Convierte con el decoder por defecto (entidades HTML)
pub fn convert(record: &Value) -> Result<Recipe> {
    convert_with(record, Arc::new(EntityDecoder))
}

/// Convierte con un decoder inyectado
pub fn convert_with(record: &Value, decoder: Arc<dyn TextDecoder>) -> Result<Recipe> {
    convert_detected(record, decoder).map(|(_, recipe)| recipe)
}

/// Detecta la versión una sola vez y convierte; devuelve ambas
pub fn convert_detected(record: &Value, decoder: Arc<dyn TextDecoder>) -> Result<(FormatVersion, Recipe)> {
    let version = detect_version(record);
    let mapper = create_mapper(version, decoder);
    debug!("Detected {} → {}", version, mapper.name());

    Ok((version, mapper.map_record(record)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PassthroughDecoder;
    use serde_json::json;

    #[test]
    fn test_detect_version() {
        assert_eq!(detect_version(&json!({"ExportVersion": "1.0"})), FormatVersion::V1);
        assert_eq!(detect_version(&json!({"ExportVersion": "2.0"})), FormatVersion::V2);
        assert_eq!(detect_version(&json!({"ExportVersion": " 2.0 "})), FormatVersion::V2);
        assert_eq!(detect_version(&json!({"ExportVersion": "3.1"})), FormatVersion::V1);
        assert_eq!(detect_version(&json!({"Name": "x"})), FormatVersion::V1);
    }

    #[test]
    fn test_create_mapper() {
        let decoder: Arc<dyn TextDecoder> = Arc::new(PassthroughDecoder);
        assert_eq!(create_mapper(FormatVersion::V1, decoder.clone()).version(), FormatVersion::V1);
        assert_eq!(create_mapper(FormatVersion::V2, decoder).version(), FormatVersion::V2);
    }

    #[test]
    fn test_convert_routes_by_tag() {
        // Mismo contenido, distinta etiqueta: v1 lee Malz1, v2 lee Malze
        let mut rec = json!({
            "ExportVersion": "1.0",
            "Stammwuerze": 12,
            "Malz1": "Pilsner", "Malz1_Menge": 5, "Malz1_Einheit": "kg",
            "Malze": [
                {"Name": "Wiener", "Menge": 3, "Einheit": "kg"},
                {"Name": "Munich", "Menge": 1, "Einheit": "kg"}
            ],
        });

        let v1 = convert(&rec).unwrap();
        assert_eq!(v1.fermentables.len(), 1);
        assert_eq!(v1.fermentables[0].name, "Pilsner");

        rec["ExportVersion"] = json!("2.0");
        let v2 = convert(&rec).unwrap();
        assert_eq!(v2.fermentables.len(), 2);
        assert_eq!(v2.fermentables[0].name, "Wiener");
    }

    #[test]
    fn test_convert_detected_reports_version() {
        let decoder: Arc<dyn TextDecoder> = Arc::new(PassthroughDecoder);
        let (version, recipe) =
            convert_detected(&json!({"ExportVersion": "3.1", "Name": "Alt"}), decoder.clone()).unwrap();
        assert_eq!(version, FormatVersion::V1);
        assert_eq!(recipe.name.as_deref(), Some("Alt"));

        let (version, _) = convert_detected(&json!({"ExportVersion": "2.0"}), decoder).unwrap();
        assert_eq!(version, FormatVersion::V2);
    }

    #[test]
    fn test_convert_is_independent_per_call() {
        let rec = json!({"ExportVersion": "2.0", "Stammwuerze": 12});
        assert_eq!(convert(&rec).unwrap(), convert(&rec).unwrap());
    }
}
