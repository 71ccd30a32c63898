// src/mapping/rules.rs
// ============================================================================
// RULES - Reglas de negocio comunes a v1 y v2
// ============================================================================
//
// Todas las familias se filtran igual: una entrada sin alguno de sus campos
// identificativos se descarta entera, nunca se emite a medias.
//
//   Fermentables  → nombre + cantidad + unidad, cantidad a kg
//   Misc          → nombre + cantidad + unidad (+ tiempo en cocción)
//   Lúpulos       → variedad + cantidad + alfa, gramos → kg
//   Stopfhopfen   → variedad + cantidad, gramos → kg
//   Maceración    → Einmaischen, decocciones, descansos, Abmaischen
//
// ============================================================================

use log::{debug, warn};
use serde_json::{Map, Value};

use super::types::*;
use crate::beerxml::*;
use crate::decode::TextDecoder;
use crate::record::FieldExt;
use crate::units::{self, grams_to_kg, normalize_mass};

/// Lee los campos escalares de cabecera con la tabla de claves de la versión
pub fn read_scalars(record: &Map<String, Value>, keys: &ScalarKeys) -> RecipeScalars {
    RecipeScalars {
        name: record.text(keys.name),
        date: record.text(keys.date),
        style: record.text(keys.style),
        brewer: record.text(keys.brewer),
        batch_size: record.number(keys.batch_size),
        boil_size: record.number(keys.boil_size),
        efficiency: record.number(keys.efficiency),
        est_abv: record.number(keys.est_abv),
        est_color: record.text(keys.est_color),
        taste_notes: record.text(keys.taste_notes),
        notes: record.text(keys.notes),
        carbonation: record.number(keys.carbonation),
        ibu: record.number(keys.ibu),
        boil_time: record.number(keys.boil_time),
        wort_density: record.number(keys.wort_density),
        attenuation: record.number(keys.attenuation),
        fermentation_temperature: record.text(keys.fermentation_temperature),
        yeast: record.text(keys.yeast),
        mash_in_temperature: record.number(keys.mash_in_temperature),
        mash_out_temperature: record.number(keys.mash_out_temperature),
        infusion_volume: record.number(keys.infusion_volume),
    }
}

pub fn fermentables(entries: &[FermentableEntry], decoder: &dyn TextDecoder) -> Vec<Fermentable> {
    entries
        .iter()
        .filter_map(|e| match (&e.name, e.amount, &e.unit) {
            (Some(name), Some(amount), Some(unit)) => Some(Fermentable {
                name: decoder.decode(name),
                amount: normalize_mass(amount, unit),
            }),
            _ => None,
        })
        .collect()
}

/// Ingredientes de fermentación (USE = Primary)
pub fn primary_miscs(entries: &[MiscEntry], decoder: &dyn TextDecoder) -> Vec<Misc> {
    entries
        .iter()
        .filter_map(|e| match (&e.name, e.amount, &e.unit) {
            (Some(name), Some(amount), Some(unit)) => Some(Misc {
                name: decoder.decode(name),
                amount: normalize_mass(amount, unit),
                use_: MiscUse::Primary,
                time: None,
            }),
            _ => None,
        })
        .collect()
}

/// Ingredientes de cocción (USE = Boil), exigen tiempo de cocción
pub fn boil_miscs(entries: &[MiscEntry], decoder: &dyn TextDecoder) -> Vec<Misc> {
    entries
        .iter()
        .filter_map(|e| match (&e.name, e.amount, &e.unit, e.boil_time) {
            (Some(name), Some(amount), Some(unit), Some(time)) => Some(Misc {
                name: decoder.decode(name),
                amount: normalize_mass(amount, unit),
                use_: MiscUse::Boil,
                time: Some(time),
            }),
            _ => None,
        })
        .collect()
}

pub fn hops(entries: &[HopEntry], decoder: &dyn TextDecoder) -> Vec<Hop> {
    entries
        .iter()
        .filter_map(|e| match (&e.variety, e.amount, e.alpha) {
            (Some(variety), Some(amount), Some(alpha)) => Some(Hop {
                name: decoder.decode(variety),
                amount: grams_to_kg(amount),
                alpha: Some(alpha),
                use_: e.use_,
                time: e.time,
            }),
            _ => None,
        })
        .collect()
}

pub fn dry_hops(entries: &[DryHopEntry], decoder: &dyn TextDecoder) -> Vec<Hop> {
    entries
        .iter()
        .filter_map(|e| match (&e.variety, e.amount) {
            (Some(variety), Some(amount)) => Some(Hop {
                name: decoder.decode(variety),
                amount: grams_to_kg(amount),
                alpha: None,
                use_: Some(HopUse::DryHop),
                time: None,
            }),
            _ => None,
        })
        .collect()
}

/// Paso inicial (agua de empaste)
pub fn mash_in(temperature: Option<f64>) -> MashStep {
    let mut step = MashStep::new("Einmaischen", MashStepType::Infusion);
    step.step_temp = temperature;
    step.step_time = Some(0.0);
    step
}

/// Paso final (Abmaischen)
pub fn mash_out(temperature: Option<f64>) -> MashStep {
    let mut step = MashStep::new("Abmaischen", MashStepType::Temperature);
    step.step_temp = temperature;
    step.step_time = Some(0.0);
    step
}

/// Decocción: exige volumen
pub fn decoction_step(entry: &DecoctionEntry) -> Option<MashStep> {
    let volume = entry.volume?;

    let mut step = MashStep::new(entry.label.clone(), MashStepType::Decoction);
    if entry.volume_is_infusion {
        step.infuse_amount = Some(volume);
    } else {
        step.decoction_amount = Some(volume);
    }
    step.step_time = entry.rest_time;
    step.step_temp = entry.temperature;
    step.end_temp = entry.end_temperature;
    Some(step)
}

/// Descanso de temperatura: exige tiempo y temperatura
pub fn rest_step(entry: &RestEntry, infusion_volume: Option<f64>) -> Option<MashStep> {
    let (temperature, time) = (entry.temperature?, entry.time?);

    let mut step = MashStep::new(entry.label.clone(), MashStepType::Temperature);
    step.step_temp = Some(temperature);
    step.step_time = Some(time);
    step.infuse_amount = infusion_volume;
    Some(step)
}

/// Secuencia completa: Einmaischen, decocciones, descansos, Abmaischen.
pub fn mash_schedule(src: &SourceRecipe) -> Vec<MashStep> {
    let s = &src.scalars;

    let mut steps = Vec::with_capacity(src.decoctions.len() + src.rests.len() + 2);
    steps.push(mash_in(s.mash_in_temperature));
    steps.extend(src.decoctions.iter().filter_map(decoction_step));
    steps.extend(src.rests.iter().filter_map(|r| rest_step(r, s.infusion_volume)));
    steps.push(mash_out(s.mash_out_temperature));
    steps
}

/// (OG, FG). La FG solo existe si hay atenuación.
pub fn gravities(wort_density: Option<f64>, attenuation_percent: Option<f64>) -> (f64, Option<f64>) {
    let wort = wort_density.unwrap_or_else(|| {
        warn!("Stammwuerze missing, computing OG from 0 °P");
        0.0
    });

    let og = units::original_gravity(wort);
    let fg = attenuation_percent.map(|a| units::final_gravity(og, a / 100.0));
    (og, fg)
}

pub fn yeast(s: &RecipeScalars, decoder: &dyn TextDecoder) -> Yeast {
    let range = s
        .fermentation_temperature
        .as_deref()
        .map(units::parse_temperature_range)
        .unwrap_or_default();

    Yeast {
        name: s.yeast.as_deref().map(|n| decoder.decode(n)),
        min_temperature: range.low,
        max_temperature: range.high,
        attenuation: s.attenuation,
        amount: YEAST_NOMINAL_AMOUNT,
        amount_is_weight: true,
    }
}

/// Ensambla la receta normalizada en una sola pasada
pub fn build_recipe(src: &SourceRecipe, decoder: &dyn TextDecoder) -> Recipe {
    let s = &src.scalars;
    let decode = |v: &Option<String>| v.as_deref().map(|t| decoder.decode(t));

    let (og, fg) = gravities(s.wort_density, s.attenuation);

    let fermentables = fermentables(&src.fermentables, decoder);

    let mut miscs = boil_miscs(&src.boil_miscs, decoder);
    miscs.extend(primary_miscs(&src.primary_miscs, decoder));

    let mut hops = hops(&src.hops, decoder);
    hops.extend(dry_hops(&src.dry_hops, decoder));

    let mash_steps = mash_schedule(src);

    debug!(
        "Mapped {} fermentables, {} miscs, {} hops, {} mash steps",
        fermentables.len(),
        miscs.len(),
        hops.len(),
        mash_steps.len()
    );

    Recipe {
        name: decode(&s.name),
        version: BEERXML_VERSION,
        date: s.date.clone(),
        style: Style { name: decode(&s.style) },
        brewer: decode(&s.brewer),
        batch_size: s.batch_size,
        boil_size: s.boil_size,
        efficiency: s.efficiency.unwrap_or(DEFAULT_EFFICIENCY),
        est_abv: s.est_abv,
        est_color: s.est_color.clone(),
        taste_notes: decode(&s.taste_notes),
        notes: decode(&s.notes),
        carbonation: s.carbonation,
        ibu: s.ibu,
        og,
        fg,
        fermentables,
        miscs,
        boil_time: s.boil_time,
        hops,
        mash: Mash {
            version: BEERXML_VERSION,
            mash_steps,
        },
        yeasts: vec![yeast(s, decoder)],
    }
}
