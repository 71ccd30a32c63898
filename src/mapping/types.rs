// src/mapping/types.rs
// ============================================================================
// MAPPING TYPES - Entradas intermedias comunes a v1 y v2
// ============================================================================
//
// Cada mapper traduce su formato a estas entradas de forma fija y después
// se aplican las MISMAS reglas (rules.rs). v1 llega aquí tras reconstruir
// las ranuras numeradas; v2 ya trae secuencias.
//
// ============================================================================

use std::fmt;

use crate::beerxml::HopUse;

/// Versión de exportación MMuM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Registro plano con campos numerados (Malz1, Hopfen_3_Sorte, ...)
    V1,
    /// Registro estructurado con secuencias (Malze, Hopfenkochen, ...)
    V2,
}

impl FormatVersion {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MMuM v{}", self.tag())
    }
}

/// Malta / fermentable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FermentableEntry {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// Ingrediente adicional (fermentación o cocción)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiscEntry {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    /// Solo ingredientes de cocción
    pub boil_time: Option<f64>,
}

/// Lúpulo de cocción (incluye primer mosto y whirlpool). Cantidad en gramos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HopEntry {
    pub variety: Option<String>,
    pub amount: Option<f64>,
    pub alpha: Option<f64>,
    pub time: Option<f64>,
    /// Fase ya resuelta por el adaptador de cada versión
    pub use_: Option<HopUse>,
}

/// Lúpulo en frío (Stopfhopfen). Cantidad en gramos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DryHopEntry {
    pub variety: Option<String>,
    pub amount: Option<f64>,
}

/// Paso de decocción
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecoctionEntry {
    /// Nombre ya compuesto ("Decoction 1", "Dickmaische 2", ...)
    pub label: String,
    pub volume: Option<f64>,
    pub rest_time: Option<f64>,
    pub temperature: Option<f64>,
    pub end_temperature: Option<f64>,
    /// v1 declara el volumen como infusión, v2 como volumen decoccionado
    pub volume_is_infusion: bool,
}

/// Descanso de temperatura
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestEntry {
    pub label: String,
    pub temperature: Option<f64>,
    pub time: Option<f64>,
}

/// Campos escalares de cabecera, tal cual vienen del registro
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeScalars {
    pub name: Option<String>,
    pub date: Option<String>,
    pub style: Option<String>,
    pub brewer: Option<String>,
    pub batch_size: Option<f64>,
    pub boil_size: Option<f64>,
    pub efficiency: Option<f64>,
    pub est_abv: Option<f64>,
    pub est_color: Option<String>,
    pub taste_notes: Option<String>,
    pub notes: Option<String>,
    pub carbonation: Option<f64>,
    pub ibu: Option<f64>,
    pub boil_time: Option<f64>,
    /// Stammwürze (°P)
    pub wort_density: Option<f64>,
    /// Endvergärungsgrad (%)
    pub attenuation: Option<f64>,
    pub fermentation_temperature: Option<String>,
    pub yeast: Option<String>,
    pub mash_in_temperature: Option<f64>,
    pub mash_out_temperature: Option<f64>,
    /// Hauptguss (l), volumen por defecto de los descansos
    pub infusion_volume: Option<f64>,
}

/// Nombres de clave de los campos escalares en cada versión
#[derive(Debug, Clone, Copy)]
pub struct ScalarKeys {
    pub name: &'static str,
    pub date: &'static str,
    pub style: &'static str,
    pub brewer: &'static str,
    pub batch_size: &'static str,
    pub boil_size: &'static str,
    pub efficiency: &'static str,
    pub est_abv: &'static str,
    pub est_color: &'static str,
    pub taste_notes: &'static str,
    pub notes: &'static str,
    pub carbonation: &'static str,
    pub ibu: &'static str,
    pub boil_time: &'static str,
    pub wort_density: &'static str,
    pub attenuation: &'static str,
    pub fermentation_temperature: &'static str,
    pub yeast: &'static str,
    pub mash_in_temperature: &'static str,
    pub mash_out_temperature: &'static str,
    pub infusion_volume: &'static str,
}

/// Registro de origen ya reducido a secuencias, listo para las reglas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRecipe {
    pub scalars: RecipeScalars,
    pub fermentables: Vec<FermentableEntry>,
    pub boil_miscs: Vec<MiscEntry>,
    pub primary_miscs: Vec<MiscEntry>,
    /// En orden de salida
    pub hops: Vec<HopEntry>,
    pub dry_hops: Vec<DryHopEntry>,
    pub decoctions: Vec<DecoctionEntry>,
    pub rests: Vec<RestEntry>,
}
