// src/mapping/v2.rs
// ============================================================================
// V2 MAPPER - MMuM ExportVersion 2.0 (registro estructurado)
// ============================================================================
//
// Las familias ya llegan como secuencias ordenadas:
//   Malze               → fermentables
//   WeitereZutatGaerung → misc Primary
//   Gewuerze_etc        → misc Boil (con Kochzeit)
//   Hopfenkochen        → lúpulos, fase según Typ
//   Stopfhopfen         → Dry Hop
//   Dekoktionen         → Decoction ("<Form> <pos>")
//   Rasten              → Temperature ("Temperature <pos>")
//
// A diferencia de v1, el whirlpool viene como Typ y el tiempo es explícito.
//
// ============================================================================

use std::sync::Arc;

use serde_json::{Map, Value};

use super::rules;
use super::traits::RecipeMapper;
use super::types::*;
use crate::beerxml::{HopUse, Recipe};
use crate::decode::TextDecoder;
use crate::error::Result;
use crate::record::{self, FieldExt};

/// Typ de lúpulo de primer mosto
pub const TYPE_FIRST_WORT: &str = "Vorderwuerze";
/// Typ de lúpulo de whirlpool
pub const TYPE_WHIRLPOOL: &str = "Whirlpool";

/// Nombre de decocción cuando la entrada no trae Form
const DEFAULT_DECOCTION_FORM: &str = "Decoction";

pub const V2_KEYS: ScalarKeys = ScalarKeys {
    name: "Name",
    date: "Datum",
    style: "Sorte",
    brewer: "Autor",
    batch_size: "Ausschlagwuerze",
    boil_size: "Hauptguss",
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
    mash_in_temperature: "Einmaischtemperatur",
    mash_out_temperature: "Abmaischtemperatur",
    infusion_volume: "Hauptguss",
};

/// Claves de las secuencias v2
pub mod keys {
    pub const MALTS: &str = "Malze";
    pub const FERMENTATION_MISCS: &str = "WeitereZutatGaerung";
    pub const SEASONINGS: &str = "Gewuerze_etc";
    pub const HOPS: &str = "Hopfenkochen";
    pub const DRY_HOPS: &str = "Stopfhopfen";
    pub const DECOCTIONS: &str = "Dekoktionen";
    pub const RESTS: &str = "Rasten";
}

pub struct V2Mapper {
    decoder: Arc<dyn TextDecoder>,
}

impl V2Mapper {
    pub fn new(decoder: Arc<dyn TextDecoder>) -> Self {
        Self { decoder }
    }

    pub fn source_recipe(&self, record: &Value) -> Result<SourceRecipe> {
        let obj = record::as_object(record)?;

        // Filtro de volumen antes de numerar: la posición es entre las válidas
        let decoctions = record::entries(obj, keys::DECOCTIONS)
            .filter(|e| e.has("Volumen"))
            .enumerate()
            .map(|(i, e)| decoction(i, e))
            .collect();

        let rests = record::entries(obj, keys::RESTS)
            .filter(|e| e.has("Zeit") && e.has("Temperatur"))
            .enumerate()
            .map(|(i, e)| rest(i, e))
            .collect();

        Ok(SourceRecipe {
            scalars: rules::read_scalars(obj, &V2_KEYS),
            fermentables: record::entries(obj, keys::MALTS).map(fermentable).collect(),
            boil_miscs: record::entries(obj, keys::SEASONINGS).map(misc).collect(),
            primary_miscs: record::entries(obj, keys::FERMENTATION_MISCS).map(misc).collect(),
            hops: record::entries(obj, keys::HOPS).map(hop).collect(),
            dry_hops: record::entries(obj, keys::DRY_HOPS).map(dry_hop).collect(),
            decoctions,
            rests,
        })
    }
}

/// Fase de uso según el Typ declarado
pub fn hop_use(kind: Option<&str>) -> Option<HopUse> {
    match kind? {
        TYPE_FIRST_WORT => Some(HopUse::FirstWort),
        TYPE_WHIRLPOOL => Some(HopUse::Aroma),
        _ => None,
    }
}

fn fermentable(e: &Map<String, Value>) -> FermentableEntry {
    FermentableEntry {
        name: e.text("Name"),
        amount: e.number("Menge"),
        unit: e.text("Einheit"),
    }
}

fn misc(e: &Map<String, Value>) -> MiscEntry {
    MiscEntry {
        name: e.text("Name"),
        amount: e.number("Menge"),
        unit: e.text("Einheit"),
        boil_time: e.number("Kochzeit"),
    }
}

fn hop(e: &Map<String, Value>) -> HopEntry {
    HopEntry {
        variety: e.text("Sorte"),
        amount: e.number("Menge"),
        alpha: e.number("Alpha"),
        time: e.number("Zeit"),
        use_: hop_use(e.text("Typ").as_deref()),
    }
}

fn dry_hop(e: &Map<String, Value>) -> DryHopEntry {
    DryHopEntry {
        variety: e.text("Sorte"),
        amount: e.number("Menge"),
    }
}

fn decoction(position: usize, e: &Map<String, Value>) -> DecoctionEntry {
    let form = e.text("Form").unwrap_or_else(|| DEFAULT_DECOCTION_FORM.to_string());

    DecoctionEntry {
        label: format!("{} {}", form, position + 1),
        volume: e.number("Volumen"),
        rest_time: e.number("Rastzeit"),
        temperature: e.number("Temperatur_ist").or_else(|| e.number("Teilmaische_Temperatur")),
        end_temperature: e.number("Temperatur_resultierend"),
        volume_is_infusion: false,
    }
}

fn rest(position: usize, e: &Map<String, Value>) -> RestEntry {
    RestEntry {
        label: format!("Temperature {}", position + 1),
        temperature: e.number("Temperatur"),
        time: e.number("Zeit"),
    }
}

impl RecipeMapper for V2Mapper {
    fn name(&self) -> &str {
        "mmum-v2"
    }

    fn version(&self) -> FormatVersion {
        FormatVersion::V2
    }

    fn map_record(&self, record: &Value) -> Result<Recipe> {
        let src = self.source_recipe(record)?;
        Ok(rules::build_recipe(&src, self.decoder.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beerxml::{MashStepType, MiscUse};
    use crate::decode::EntityDecoder;
    use crate::units;
    use serde_json::json;

    fn mapper() -> V2Mapper {
        V2Mapper::new(Arc::new(EntityDecoder))
    }

    fn base() -> Value {
        json!({
            "ExportVersion": "2.0",
            "Name": "Bavarian IPA",
            "Ausschlagwuerze": 20,
            "Hauptguss": 17,
            "Stammwuerze": 14,
            "Endvergaerungsgrad": 80,
            "Gaertemperatur": "18-20",
            "Hefe": "Safale US-05",
            "Einmaischtemperatur": 55,
            "Abmaischtemperatur": 78,
            "Malze": [
                {"Name": "Pale Ale", "Menge": 4.5, "Einheit": "kg"},
                {"Name": "Cara Hell", "Menge": 300, "Einheit": "g"},
                {"Name": "Leer", "Menge": 100}
            ],
            "Rasten": [
                {"Temperatur": 66, "Zeit": 60},
                {"Temperatur": 72},
                {"Temperatur": 76, "Zeit": 10}
            ]
        })
    }

    #[test]
    fn test_scalars_and_gravities() {
        let recipe = mapper().map_record(&base()).unwrap();

        assert_eq!(recipe.batch_size, Some(20.0));
        assert_eq!(recipe.boil_size, Some(17.0));
        assert_eq!(recipe.efficiency, 65.0);
        assert_eq!(recipe.og, units::original_gravity(14.0));
        assert_eq!(recipe.fg, Some(units::final_gravity(recipe.og, 0.8)));

        let y = &recipe.yeasts[0];
        assert_eq!(y.attenuation, Some(80.0));
        assert_eq!((y.min_temperature, y.max_temperature), (Some(18), Some(20)));
    }

    #[test]
    fn test_fermentables() {
        let recipe = mapper().map_record(&base()).unwrap();
        assert_eq!(recipe.fermentables.len(), 2);
        assert_eq!(recipe.fermentables[0].amount, 4.5);
        assert_eq!(recipe.fermentables[1].amount, 0.3);
    }

    #[test]
    fn test_hop_use_from_type() {
        let mut rec = base();
        rec["Hopfenkochen"] = json!([
            {"Sorte": "Perle", "Menge": 25, "Alpha": 7.5, "Zeit": 80, "Typ": "Vorderwuerze"},
            {"Sorte": "Magnum", "Menge": 15, "Alpha": 13, "Zeit": 60, "Typ": "Kochen"},
            {"Sorte": "Mosaic", "Menge": 40, "Alpha": 12, "Zeit": 15, "Typ": "Whirlpool"},
            {"Sorte": "Ohne Alpha", "Menge": 10, "Zeit": 5}
        ]);
        rec["Stopfhopfen"] = json!([{"Sorte": "Citra", "Menge": 60}, {"Menge": 10}]);

        let hops = mapper().map_record(&rec).unwrap().hops;
        assert_eq!(hops.len(), 4);
        assert_eq!(hops[0].use_, Some(HopUse::FirstWort));
        assert_eq!(hops[0].time, Some(80.0));
        assert_eq!(hops[1].use_, None);
        // Whirlpool conserva su tiempo explícito
        assert_eq!(hops[2].use_, Some(HopUse::Aroma));
        assert_eq!(hops[2].time, Some(15.0));
        assert_eq!(hops[3].use_, Some(HopUse::DryHop));
        assert_eq!(hops[3].amount, 0.06);
    }

    #[test]
    fn test_miscs() {
        let mut rec = base();
        rec["Gewuerze_etc"] = json!([
            {"Name": "Irish Moss", "Menge": 5, "Einheit": "g", "Kochzeit": 15},
            {"Name": "Ohne Zeit", "Menge": 5, "Einheit": "g"}
        ]);
        rec["WeitereZutatGaerung"] = json!([{"Name": "Kakaonibs", "Menge": 0.1, "Einheit": "kg"}]);

        let miscs = mapper().map_record(&rec).unwrap().miscs;
        assert_eq!(miscs.len(), 2);
        assert_eq!(miscs[0].use_, MiscUse::Boil);
        assert_eq!(miscs[0].time, Some(15.0));
        assert_eq!(miscs[1].use_, MiscUse::Primary);
        assert_eq!(miscs[1].amount, 0.1);
    }

    #[test]
    fn test_rests_numbered_by_position() {
        let recipe = mapper().map_record(&base()).unwrap();
        let steps = &recipe.mash.mash_steps;

        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Einmaischen", "Temperature 1", "Temperature 2", "Abmaischen"]);
        assert_eq!(steps[0].step_temp, Some(55.0));
        assert_eq!(steps[2].step_temp, Some(76.0));
        assert_eq!(steps[2].infuse_amount, Some(17.0));
        assert_eq!(steps[3].step_temp, Some(78.0));
    }

    #[test]
    fn test_decoctions() {
        let mut rec = base();
        rec["Dekoktionen"] = json!([
            {"Form": "Dickmaische", "Volumen": 8, "Rastzeit": 20, "Temperatur_ist": 100, "Temperatur_resultierend": 64},
            {"Form": "Leer"},
            {"Form": "Kochmaische", "Volumen": 5, "Teilmaische_Temperatur": 72, "Temperatur_resultierend": 72}
        ]);

        let steps = mapper().map_record(&rec).unwrap().mash.mash_steps;
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[1].name, "Dickmaische 1");
        assert_eq!(steps[1].step_type, MashStepType::Decoction);
        assert_eq!(steps[1].decoction_amount, Some(8.0));
        assert_eq!(steps[1].step_temp, Some(100.0));
        assert_eq!(steps[2].name, "Kochmaische 2");
        assert_eq!(steps[2].step_temp, Some(72.0));
        assert_eq!(steps.last().unwrap().step_type, MashStepType::Temperature);
    }

    #[test]
    fn test_missing_sequences() {
        let rec = json!({"ExportVersion": "2.0", "Stammwuerze": 11});
        let recipe = mapper().map_record(&rec).unwrap();
        assert!(recipe.fermentables.is_empty());
        assert!(recipe.hops.is_empty());
        assert_eq!(recipe.mash.mash_steps.len(), 2);
        assert!(recipe.fg.is_none());
    }

    #[test]
    fn test_hop_use_mapping() {
        assert_eq!(hop_use(Some("Vorderwuerze")), Some(HopUse::FirstWort));
        assert_eq!(hop_use(Some("Whirlpool")), Some(HopUse::Aroma));
        assert_eq!(hop_use(Some("Kochen")), None);
        assert_eq!(hop_use(None), None);
    }
}
