// src/mapping/v1.rs
// ============================================================================
// V1 MAPPER - MMuM ExportVersion 1.0 (registro plano)
// ============================================================================
//
// Familias numeradas (ver slots.rs):
//   Malz<N>[_Menge|_Einheit]                              → fermentables
//   WeitereZutat_Gaerung_<N>_{Name,Menge,Einheit}         → misc Primary
//   WeitereZutat_Wuerze_<N>_{Name,Menge,Einheit,Kochzeit} → misc Boil
//   Hopfen_VWH_<N>_{Sorte,Menge,alpha}                    → First Wort
//   Hopfen_<N>_{Sorte,Menge,alpha,Kochzeit}               → cocción
//   Stopfhopfen_<N>_{Sorte,Menge}                         → Dry Hop
//   Dekoktion_<N>_{Volumen,Rastzeit,Temperatur_ist,...}   → Decoction (N desde 0)
//   Infusion_Rasttemperatur<N> / Infusion_Rastzeit<N>     → Temperature
//
// Kochzeit = "Whirlpool" en lúpulos de cocción → tiempo 0.
//
// ============================================================================

use std::sync::Arc;

use serde_json::Value;

use super::rules;
use super::slots::{Slot, SlotFamily, SlotScan};
use super::traits::RecipeMapper;
use super::types::*;
use crate::beerxml::{HopUse, Recipe};
use crate::decode::TextDecoder;
use crate::error::Result;
use crate::record::{self, FieldExt};

/// Marca de lúpulo de whirlpool en el campo Kochzeit
pub const WHIRLPOOL: &str = "Whirlpool";

pub const V1_KEYS: ScalarKeys = ScalarKeys {
    name: "Name",
    date: "Datum",
    style: "Sorte",
    brewer: "Autor",
    batch_size: "Ausschlagswuerze",
    boil_size: "Infusion_Hauptguss",
    efficiency: "Sudhausausbeute",
    est_abv: "Alkohol",
    est_color: "Farbe",
    taste_notes: "Anmerkung_Autor",
    notes: "Kurzbeschreibung",
    carbonation: "Karbonisierung",
    ibu: "Bittere",
    boil_time: "Kochzeit_Wuerze",
    wort_density: "Stammwuerze",
    attenuation: "Endvergaerungsgrad",
    fermentation_temperature: "Gaertemperatur",
    yeast: "Hefe",
    mash_in_temperature: "Infusion_Einmaischtemperatur",
    mash_out_temperature: "Abmaischtemperatur",
    infusion_volume: "Infusion_Hauptguss",
};

/// Familias numeradas de MMuM v1
#[derive(Debug, Clone)]
pub struct V1Families {
    pub malts: SlotFamily,
    pub fermentation_miscs: SlotFamily,
    pub boil_miscs: SlotFamily,
    pub first_wort_hops: SlotFamily,
    pub boil_hops: SlotFamily,
    pub dry_hops: SlotFamily,
    pub decoctions: SlotFamily,
    pub rests: SlotFamily,
}

impl V1Families {
    pub fn new() -> Self {
        Self {
            malts: SlotFamily::new(
                "Malz",
                r"^Malz(?P<slot>\d+)(?:_(?P<field>Menge|Einheit))?$",
                &["Name", "Menge", "Einheit"],
            ),
            fermentation_miscs: SlotFamily::new(
                "WeitereZutat_Gaerung",
                r"^WeitereZutat_Gaerung_(?P<slot>\d+)_(?P<field>Name|Menge|Einheit)$",
                &["Name", "Menge", "Einheit"],
            ),
            boil_miscs: SlotFamily::new(
                "WeitereZutat_Wuerze",
                r"^WeitereZutat_Wuerze_(?P<slot>\d+)_(?P<field>Name|Menge|Einheit|Kochzeit)$",
                &["Name", "Menge", "Einheit", "Kochzeit"],
            ),
            first_wort_hops: SlotFamily::new(
                "Hopfen_VWH",
                r"^Hopfen_VWH_(?P<slot>\d+)_(?P<field>Sorte|Menge|alpha)$",
                &["Sorte", "Menge", "alpha"],
            ),
            // Sin token VWH: el índice va justo después de Hopfen_
            boil_hops: SlotFamily::new(
                "Hopfen",
                r"^Hopfen_(?P<slot>\d+)_(?P<field>Sorte|Menge|alpha|Kochzeit)$",
                &["Sorte", "Menge", "alpha", "Kochzeit"],
            ),
            dry_hops: SlotFamily::new(
                "Stopfhopfen",
                r"^Stopfhopfen_(?P<slot>\d+)_(?P<field>Sorte|Menge)$",
                &["Sorte", "Menge"],
            ),
            decoctions: SlotFamily::new(
                "Dekoktion",
                r"^Dekoktion_(?P<slot>\d+)_(?P<field>Volumen|Rastzeit|Temperatur_ist|Temperatur_resultierend)$",
                &["Volumen", "Rastzeit", "Temperatur_ist", "Temperatur_resultierend"],
            ),
            rests: SlotFamily::new(
                "Infusion_Rast",
                r"^Infusion_(?P<field>Rasttemperatur|Rastzeit)(?P<slot>\d+)$",
                &["Rasttemperatur", "Rastzeit"],
            ),
        }
    }

    /// Todas las familias, en orden de salida
    pub fn all(&self) -> [&SlotFamily; 8] {
        [
            &self.malts,
            &self.boil_miscs,
            &self.fermentation_miscs,
            &self.first_wort_hops,
            &self.boil_hops,
            &self.dry_hops,
            &self.decoctions,
            &self.rests,
        ]
    }
}

impl Default for V1Families {
    fn default() -> Self {
        Self::new()
    }
}

pub struct V1Mapper {
    families: V1Families,
    decoder: Arc<dyn TextDecoder>,
}

impl V1Mapper {
    pub fn new(decoder: Arc<dyn TextDecoder>) -> Self {
        Self {
            families: V1Families::new(),
            decoder,
        }
    }

    pub fn families(&self) -> &V1Families {
        &self.families
    }

    /// Reduce el registro plano a secuencias de entradas
    pub fn source_recipe(&self, record: &Value) -> Result<SourceRecipe> {
        let obj = record::as_object(record)?;
        let f = &self.families;

        Ok(SourceRecipe {
            scalars: rules::read_scalars(obj, &V1_KEYS),
            fermentables: complete(f.malts.scan(obj), fermentable),
            boil_miscs: complete(f.boil_miscs.scan(obj), misc),
            primary_miscs: complete(f.fermentation_miscs.scan(obj), misc),
            hops: complete(f.first_wort_hops.scan(obj), first_wort_hop)
                .into_iter()
                .chain(complete(f.boil_hops.scan(obj), boil_hop))
                .collect(),
            dry_hops: complete(f.dry_hops.scan(obj), dry_hop),
            decoctions: complete(f.decoctions.scan(obj), decoction),
            rests: complete(f.rests.scan(obj), rest),
        })
    }
}

fn complete<T>(scan: SlotScan<'_>, build: impl Fn(&Slot<'_>) -> T) -> Vec<T> {
    scan.complete.iter().map(build).collect()
}

fn fermentable(slot: &Slot<'_>) -> FermentableEntry {
    FermentableEntry {
        name: slot.text("Name"),
        amount: slot.number("Menge"),
        unit: slot.text("Einheit"),
    }
}

fn misc(slot: &Slot<'_>) -> MiscEntry {
    MiscEntry {
        name: slot.text("Name"),
        amount: slot.number("Menge"),
        unit: slot.text("Einheit"),
        boil_time: slot.number("Kochzeit"),
    }
}

fn first_wort_hop(slot: &Slot<'_>) -> HopEntry {
    HopEntry {
        variety: slot.text("Sorte"),
        amount: slot.number("Menge"),
        alpha: slot.number("alpha"),
        time: None,
        use_: Some(HopUse::FirstWort),
    }
}

fn boil_hop(slot: &Slot<'_>) -> HopEntry {
    HopEntry {
        variety: slot.text("Sorte"),
        amount: slot.number("Menge"),
        alpha: slot.number("alpha"),
        time: boil_time(slot.get("Kochzeit")),
        use_: None,
    }
}

/// Kochzeit de lúpulo: "Whirlpool" se modela como 0 minutos
fn boil_time(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::String(s)) if s.trim() == WHIRLPOOL => Some(0.0),
        other => record::number(other),
    }
}

fn dry_hop(slot: &Slot<'_>) -> DryHopEntry {
    DryHopEntry {
        variety: slot.text("Sorte"),
        amount: slot.number("Menge"),
    }
}

fn decoction(slot: &Slot<'_>) -> DecoctionEntry {
    DecoctionEntry {
        label: format!("Decoction {}", slot.index.saturating_add(1)),
        volume: slot.number("Volumen"),
        rest_time: slot.number("Rastzeit"),
        temperature: slot.number("Temperatur_ist"),
        end_temperature: slot.number("Temperatur_resultierend"),
        volume_is_infusion: true,
    }
}

fn rest(slot: &Slot<'_>) -> RestEntry {
    RestEntry {
        label: format!("Temperature {}", slot.index.saturating_add(1)),
        temperature: slot.number("Rasttemperatur"),
        time: slot.number("Rastzeit"),
    }
}

impl RecipeMapper for V1Mapper {
    fn name(&self) -> &str {
        "mmum-v1"
    }

    fn version(&self) -> FormatVersion {
        FormatVersion::V1
    }

    fn map_record(&self, record: &Value) -> Result<Recipe> {
        let src = self.source_recipe(record)?;
        Ok(rules::build_recipe(&src, self.decoder.as_ref()))
    }
}
