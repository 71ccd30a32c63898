// src/mapping/traits.rs
// ============================================================================
// MAPPER TRAIT - Interfaz para mappers de versiones MMuM
// ============================================================================

use serde_json::Value;

use super::types::FormatVersion;
use crate::beerxml::Recipe;
use crate::error::Result;

/// Trait para mappers de las distintas versiones de exportación.
///
/// El mapper es PURO:
/// - Sin E/S, sin estado compartido entre llamadas
/// - Best-effort: lo que falta se omite, no es un error
/// - Solo falla si la raíz del registro no es un objeto
pub trait RecipeMapper: Send + Sync {
    /// Nombre del mapper (ej: "mmum-v1")
    fn name(&self) -> &str;

    /// Versión de exportación que entiende
    fn version(&self) -> FormatVersion;

    /// Convierte un registro ya parseado en la receta normalizada
    fn map_record(&self, record: &Value) -> Result<Recipe>;
}
