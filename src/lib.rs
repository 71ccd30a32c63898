// src/lib.rs
// ============================================================================
// MMUM-BEERXML - Conversor de recetas MMuM (v1/v2) a BeerXML
// ============================================================================

pub mod beerxml;
pub mod builder;
pub mod decode;
pub mod error;
pub mod mapping;
pub mod record;
pub mod units;

// Re-exports principales
pub use beerxml::{BeerXmlWriter, DocumentSerializer, Recipe, XmlConfig};
pub use builder::{convert_batch, convert_file, BuildStats, ConvertOptions, OutputFormat};
pub use decode::{EntityDecoder, PassthroughDecoder, TextDecoder};
pub use error::ConvertError;
pub use mapping::{convert, convert_with, create_mapper, detect_version, FormatVersion, RecipeMapper};
pub use record::load_record;
