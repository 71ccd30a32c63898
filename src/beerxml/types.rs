// src/beerxml/types.rs
// ============================================================================
// BEERXML TYPES - Árbol normalizado de receta
// ============================================================================
//
// Unidades BeerXML: masas en kg, volúmenes en litros, tiempos en minutos,
// temperaturas en °C. Los nombres serde son las etiquetas
// BeerXML 1.0, así el volcado JSON usa los mismos nombres.
//
// ============================================================================

use serde::Serialize;

/// Versión de registro BeerXML (siempre 1)
pub const BEERXML_VERSION: u32 = 1;

/// Eficiencia de sala de cocción si la exportación no la trae
pub const DEFAULT_EFFICIENCY: f64 = 65.0;

/// Dosis nominal de levadura (kg)
pub const YEAST_NOMINAL_AMOUNT: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Recipe {
    pub name: Option<String>,
    pub version: u32,
    pub date: Option<String>,
    pub style: Style,
    pub brewer: Option<String>,
    /// Litros de mosto al final de la cocción
    pub batch_size: Option<f64>,
    pub boil_size: Option<f64>,
    pub efficiency: f64,
    pub est_abv: Option<f64>,
    /// Color de exportación, campo de presentación (texto)
    pub est_color: Option<String>,
    pub taste_notes: Option<String>,
    pub notes: Option<String>,
    pub carbonation: Option<f64>,
    pub ibu: Option<f64>,
    pub og: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fg: Option<f64>,
    pub fermentables: Vec<Fermentable>,
    pub miscs: Vec<Misc>,
    pub boil_time: Option<f64>,
    pub hops: Vec<Hop>,
    pub mash: Mash,
    pub yeasts: Vec<Yeast>,
}

impl Recipe {
    /// La receta normalizada siempre lleva exactamente una levadura
    pub fn yeast(&self) -> Option<&Yeast> {
        self.yeasts.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Style {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Fermentable {
    pub name: String,
    /// kg
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MiscUse {
    Boil,
    Primary,
}

impl MiscUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boil => "Boil",
            Self::Primary => "Primary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Misc {
    pub name: String,
    /// kg
    pub amount: f64,
    #[serde(rename = "USE")]
    pub use_: MiscUse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HopUse {
    #[serde(rename = "Dry Hop")]
    DryHop,
    #[serde(rename = "First Wort")]
    FirstWort,
    Aroma,
}

impl HopUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DryHop => "Dry Hop",
            Self::FirstWort => "First Wort",
            Self::Aroma => "Aroma",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Hop {
    pub name: String,
    /// kg
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(rename = "USE", skip_serializing_if = "Option::is_none")]
    pub use_: Option<HopUse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Mash {
    pub version: u32,
    pub mash_steps: Vec<MashStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MashStepType {
    Infusion,
    Temperature,
    Decoction,
}

impl MashStepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infusion => "Infusion",
            Self::Temperature => "Temperature",
            Self::Decoction => "Decoction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct MashStep {
    pub name: String,
    #[serde(rename = "TYPE")]
    pub step_type: MashStepType,
    /// Litros
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infuse_amount: Option<f64>,
    /// Litros de la parte decoccionada
    #[serde(rename = "DECOCTION_AMT", skip_serializing_if = "Option::is_none")]
    pub decoction_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_temp: Option<f64>,
}

impl MashStep {
    pub fn new(name: impl Into<String>, step_type: MashStepType) -> Self {
        Self {
            name: name.into(),
            step_type,
            infuse_amount: None,
            decoction_amount: None,
            step_time: None,
            step_temp: None,
            end_temp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Yeast {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attenuation: Option<f64>,
    pub amount: f64,
    pub amount_is_weight: bool,
}
