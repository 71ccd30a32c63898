// src/mapping/mod.rs
// ============================================================================
// MAPPING - Conversión de registros MMuM a la receta normalizada
// ============================================================================

pub mod types;
pub mod traits;
pub mod factory;
pub mod rules;
pub mod slots;
pub mod v1;
pub mod v2;

// Re-exports
pub use types::{FormatVersion, SourceRecipe};
pub use traits::RecipeMapper;
pub use factory::{convert, convert_detected, convert_with, create_mapper, detect_version};
pub use slots::{SlotFamily, SlotScan};
pub use v1::{V1Families, V1Mapper};
pub use v2::V2Mapper;
