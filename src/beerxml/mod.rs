// src/beerxml/mod.rs
// ============================================================================
// BEERXML - Árbol de receta normalizado + serializador
// ============================================================================

pub mod types;
pub mod writer;

// Re-exports
pub use types::{
    Fermentable, Hop, HopUse, Mash, MashStep, MashStepType, Misc, MiscUse, Recipe, Style, Yeast,
    BEERXML_VERSION, DEFAULT_EFFICIENCY, YEAST_NOMINAL_AMOUNT,
};
pub use writer::{BeerXmlWriter, DocumentSerializer, XmlConfig};
