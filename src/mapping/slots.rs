// src/mapping/slots.rs
// ============================================================================
// SLOTS - Reconstrucción de ranuras numeradas de MMuM v1
// ============================================================================
//
// v1 codifica las listas como familias de claves con índice embebido:
//   Malz1, Malz1_Menge, Malz1_Einheit, Malz2, ...
//   Hopfen_3_Sorte, Hopfen_3_Menge, Hopfen_3_alpha, Hopfen_3_Kochzeit
//   Infusion_Rasttemperatur2, Infusion_Rastzeit2
//
// Cada familia es una regex con dos grupos con nombre:
//   slot  → índice de ranura
//   field → subcampo (si no participa, es el primer campo de la familia)
//
// El escaneo agrupa por índice y ordena ascendente. Una ranura es completa
// si todos los subcampos de la familia están presentes.
//
// ============================================================================

use std::collections::BTreeMap;

use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::record::{self, FieldExt};

/// Familia de claves numeradas
#[derive(Debug, Clone)]
pub struct SlotFamily {
    name: &'static str,
    pattern: Regex,
    fields: &'static [&'static str],
}

/// Una ranura reconstruida: subcampo → valor
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<'a> {
    pub index: usize,
    values: BTreeMap<&'static str, &'a Value>,
}

impl<'a> Slot<'a> {
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.values.get(field).copied()
    }
}

impl FieldExt for Slot<'_> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Resultado del escaneo de una familia
#[derive(Debug, Clone, Default)]
pub struct SlotScan<'a> {
    /// Ranuras completas, índice ascendente
    pub complete: Vec<Slot<'a>>,
    /// Índices de ranuras a las que les falta algún subcampo
    pub incomplete: Vec<usize>,
}

impl SlotFamily {
    /// `pattern` debe tener los grupos `slot` y, opcionalmente, `field`.
    pub fn new(name: &'static str, pattern: &str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("static slot pattern"),
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Subcampo de una clave si pertenece a la familia
    fn classify(&self, key: &str) -> Option<(usize, &'static str)> {
        let caps = self.pattern.captures(key)?;
        let index: usize = caps.name("slot")?.as_str().parse().ok()?;

        let field = match caps.name("field") {
            Some(m) => self.fields.iter().copied().find(|f| *f == m.as_str())?,
            None => *self.fields.first()?,
        };
        Some((index, field))
    }

    /// Agrupa las claves del registro por ranura
    pub fn scan<'a>(&self, record: &'a Map<String, Value>) -> SlotScan<'a> {
        let mut slots: BTreeMap<usize, BTreeMap<&'static str, &'a Value>> = BTreeMap::new();

        for (key, value) in record {
            if let Some((index, field)) = self.classify(key) {
                slots.entry(index).or_default().insert(field, value);
            }
        }

        let mut scan = SlotScan::default();
        for (index, values) in slots {
            let complete = self
                .fields
                .iter()
                .all(|f| record::is_present(values.get(f).copied()));

            if complete {
                scan.complete.push(Slot { index, values });
            } else {
                debug!("{}: slot {} incomplete, skipped", self.name, index);
                scan.incomplete.push(index);
            }
        }
        scan
    }
}
