// src/beerxml/writer.rs
// ============================================================================
// BEERXML WRITER - Serializa el árbol normalizado a BeerXML
// ============================================================================
//
// Estructura:
//   <?xml version="1.0" encoding="UTF-8"?>
//   <RECIPES>
//     <RECIPE>
//       NAME, VERSION, DATE, STYLE, BREWER, ... , OG, FG
//       <FERMENTABLES><FERMENTABLE>...</FERMENTABLE></FERMENTABLES>
//       <MISCS>, BOIL_TIME, <HOPS>, <MASH><MASH_STEPS>, <YEASTS>
//     </RECIPE>
//   </RECIPES>
//
// Los campos opcionales ausentes no se escriben.
//
// ============================================================================

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::types::*;
use crate::error::Result;

/// Configuración de formato del documento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlConfig {
    /// Espacios por nivel de anidamiento
    pub indent: usize,
    /// false → todo en una línea
    pub pretty: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self { indent: 2, pretty: true }
    }
}

/// Capacidad de serialización de documentos inyectable
pub trait DocumentSerializer: Send + Sync {
    fn serialize(&self, recipe: &Recipe, config: &XmlConfig) -> Result<String>;
}

/// Serializador BeerXML v1 basado en quick-xml
#[derive(Debug, Clone, Copy, Default)]
pub struct BeerXmlWriter;

impl DocumentSerializer for BeerXmlWriter {
    fn serialize(&self, recipe: &Recipe, config: &XmlConfig) -> Result<String> {
        let mut w = if config.pretty && config.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', config.indent)
        } else {
            Writer::new(Vec::new())
        };

        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        open(&mut w, "RECIPES")?;
        write_recipe(&mut w, recipe)?;
        close(&mut w, "RECIPES")?;

        let mut xml = String::from_utf8(w.into_inner())?;
        if config.pretty {
            xml.push('\n');
        }
        Ok(xml)
    }
}

type XmlWriter = Writer<Vec<u8>>;

fn open(w: &mut XmlWriter, tag: &str) -> quick_xml::Result<()> {
    w.write_event(Event::Start(BytesStart::new(tag)))
}

fn close(w: &mut XmlWriter, tag: &str) -> quick_xml::Result<()> {
    w.write_event(Event::End(BytesEnd::new(tag)))
}

fn leaf(w: &mut XmlWriter, tag: &str, value: impl Display) -> quick_xml::Result<()> {
    open(w, tag)?;
    w.write_event(Event::Text(BytesText::new(&value.to_string())))?;
    close(w, tag)
}

fn leaf_opt<T: Display>(w: &mut XmlWriter, tag: &str, value: Option<T>) -> quick_xml::Result<()> {
    match value {
        Some(v) => leaf(w, tag, v),
        None => Ok(()),
    }
}

fn leaf_bool(w: &mut XmlWriter, tag: &str, value: bool) -> quick_xml::Result<()> {
    leaf(w, tag, if value { "TRUE" } else { "FALSE" })
}

fn write_recipe(w: &mut XmlWriter, r: &Recipe) -> quick_xml::Result<()> {
    open(w, "RECIPE")?;

    leaf_opt(w, "NAME", r.name.as_deref())?;
    leaf(w, "VERSION", r.version)?;
    leaf_opt(w, "DATE", r.date.as_deref())?;

    open(w, "STYLE")?;
    leaf_opt(w, "NAME", r.style.name.as_deref())?;
    close(w, "STYLE")?;

    leaf_opt(w, "BREWER", r.brewer.as_deref())?;
    leaf_opt(w, "BATCH_SIZE", r.batch_size)?;
    leaf_opt(w, "BOIL_SIZE", r.boil_size)?;
    leaf(w, "EFFICIENCY", r.efficiency)?;
    leaf_opt(w, "EST_ABV", r.est_abv)?;
    leaf_opt(w, "EST_COLOR", r.est_color.as_deref())?;
    leaf_opt(w, "TASTE_NOTES", r.taste_notes.as_deref())?;
    leaf_opt(w, "NOTES", r.notes.as_deref())?;
    leaf_opt(w, "CARBONATION", r.carbonation)?;
    leaf_opt(w, "IBU", r.ibu)?;
    leaf(w, "OG", r.og)?;
    leaf_opt(w, "FG", r.fg)?;

    open(w, "FERMENTABLES")?;
    for f in &r.fermentables {
        open(w, "FERMENTABLE")?;
        leaf(w, "NAME", &f.name)?;
        leaf(w, "AMOUNT", f.amount)?;
        close(w, "FERMENTABLE")?;
    }
    close(w, "FERMENTABLES")?;

    open(w, "MISCS")?;
    for m in &r.miscs {
        open(w, "MISC")?;
        leaf(w, "NAME", &m.name)?;
        leaf(w, "AMOUNT", m.amount)?;
        leaf(w, "USE", m.use_.as_str())?;
        leaf_opt(w, "TIME", m.time)?;
        close(w, "MISC")?;
    }
    close(w, "MISCS")?;

    leaf_opt(w, "BOIL_TIME", r.boil_time)?;

    open(w, "HOPS")?;
    for h in &r.hops {
        open(w, "HOP")?;
        leaf(w, "NAME", &h.name)?;
        leaf(w, "AMOUNT", h.amount)?;
        leaf_opt(w, "ALPHA", h.alpha)?;
        leaf_opt(w, "USE", h.use_.map(|u| u.as_str()))?;
        leaf_opt(w, "TIME", h.time)?;
        close(w, "HOP")?;
    }
    close(w, "HOPS")?;

    write_mash(w, &r.mash)?;

    open(w, "YEASTS")?;
    for y in &r.yeasts {
        open(w, "YEAST")?;
        leaf_opt(w, "NAME", y.name.as_deref())?;
        leaf_opt(w, "MIN_TEMPERATURE", y.min_temperature)?;
        leaf_opt(w, "MAX_TEMPERATURE", y.max_temperature)?;
        leaf_opt(w, "ATTENUATION", y.attenuation)?;
        leaf(w, "AMOUNT", y.amount)?;
        leaf_bool(w, "AMOUNT_IS_WEIGHT", y.amount_is_weight)?;
        close(w, "YEAST")?;
    }
    close(w, "YEASTS")?;

    close(w, "RECIPE")
}

fn write_mash(w: &mut XmlWriter, mash: &Mash) -> quick_xml::Result<()> {
    open(w, "MASH")?;
    leaf(w, "VERSION", mash.version)?;

    open(w, "MASH_STEPS")?;
    for s in &mash.mash_steps {
        open(w, "MASH_STEP")?;
        leaf(w, "NAME", &s.name)?;
        leaf(w, "TYPE", s.step_type.as_str())?;
        leaf_opt(w, "INFUSE_AMOUNT", s.infuse_amount)?;
        leaf_opt(w, "DECOCTION_AMT", s.decoction_amount)?;
        leaf_opt(w, "STEP_TIME", s.step_time)?;
        leaf_opt(w, "STEP_TEMP", s.step_temp)?;
        leaf_opt(w, "END_TEMP", s.end_temp)?;
        close(w, "MASH_STEP")?;
    }
    close(w, "MASH_STEPS")?;

    close(w, "MASH")
}
