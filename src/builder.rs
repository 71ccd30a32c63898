// src/builder.rs
// ============================================================================
// BUILDER - Orquestador de conversión de ficheros
// ============================================================================
//
// El builder es TONTO:
// - NO decide la versión (lo hace la factory)
// - NO decide el formato de salida (lo hace el CLI)
// - Solo lee, convierte, serializa, escribe
//
// Cada fichero es independiente: el batch corre en paralelo con rayon y un
// fichero roto no detiene a los demás.
//
// ============================================================================

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use crate::beerxml::{BeerXmlWriter, DocumentSerializer, Recipe, XmlConfig};
use crate::decode::EntityDecoder;
use crate::mapping::{self, FormatVersion};
use crate::record::load_record;

/// Formato del fichero de salida
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// BeerXML v1
    #[default]
    BeerXml,
    /// Volcado JSON del árbol normalizado
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::BeerXml => "xml",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" | "beerxml" => Ok(Self::BeerXml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected xml or json)", other)),
        }
    }
}

/// Opciones de salida
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    pub xml: XmlConfig,
}

/// Un fichero a convertir
#[derive(Debug, Clone)]
pub struct ConvertJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Estadísticas de un fichero convertido
#[derive(Debug, Clone)]
pub struct FileStats {
    pub input: PathBuf,
    pub output: PathBuf,
    pub version: FormatVersion,
    pub fermentables: usize,
    pub hops: usize,
    pub miscs: usize,
    pub mash_steps: usize,
    pub bytes: usize,
}

/// Estadísticas agregadas de un batch
#[derive(Debug, Default)]
pub struct BuildStats {
    pub v1_count: usize,
    pub v2_count: usize,
    pub failed_count: usize,
    pub total_bytes: usize,
}

impl BuildStats {
    pub fn converted(&self) -> usize {
        self.v1_count + self.v2_count
    }

    pub fn record(&mut self, stats: &FileStats) {
        match stats.version {
            FormatVersion::V1 => self.v1_count += 1,
            FormatVersion::V2 => self.v2_count += 1,
        }
        self.total_bytes += stats.bytes;
    }
}

/// Resultado de un batch: un resultado por trabajo, en el orden de entrada
pub struct BatchReport {
    pub results: Vec<(ConvertJob, Result<FileStats>)>,
    pub stats: BuildStats,
}

/// Ruta de salida para una entrada.
///
/// - con `out_dir`: `<out_dir>/<stem>.<ext>`
/// - sin él: la misma ruta con la extensión cambiada
pub fn resolve_output(input: &Path, out_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let file_name = input
        .file_stem()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("recipe"))
        .with_extension(format.extension());

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Serializa la receta en el formato pedido
pub fn render(recipe: &Recipe, options: &ConvertOptions) -> Result<String> {
    match options.format {
        OutputFormat::BeerXml => Ok(BeerXmlWriter.serialize(recipe, &options.xml)?),
        OutputFormat::Json => {
            let mut json = if options.xml.pretty {
                serde_json::to_string_pretty(recipe)?
            } else {
                serde_json::to_string(recipe)?
            };
            json.push('\n');
            Ok(json)
        }
    }
}

/// Convierte un fichero MMuM y escribe el resultado
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<FileStats> {
    let record = load_record(input)?;

    let (version, recipe) = mapping::convert_detected(&record, Arc::new(EntityDecoder))
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    let text = render(&recipe, options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    std::fs::write(output, &text).with_context(|| format!("Cannot write {}", output.display()))?;

    info!("{} ({}) → {}", input.display(), version, output.display());

    Ok(FileStats {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        version,
        fermentables: recipe.fermentables.len(),
        hops: recipe.hops.len(),
        miscs: recipe.miscs.len(),
        mash_steps: recipe.mash.mash_steps.len(),
        bytes: text.len(),
    })
}

/// Convierte varios ficheros en paralelo
pub fn convert_batch(jobs: Vec<ConvertJob>, options: &ConvertOptions, progress: bool) -> BatchReport {
    let bar = if progress {
        let bar = ProgressBar::new(jobs.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("  {bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<(ConvertJob, Result<FileStats>)> = jobs
        .into_par_iter()
        .progress_with(bar.clone())
        .map(|job| {
            let result = convert_file(&job.input, &job.output, options);
            (job, result)
        })
        .collect();

    bar.finish_and_clear();

    let mut stats = BuildStats::default();
    for (job, result) in &results {
        match result {
            Ok(file) => stats.record(file),
            Err(e) => {
                warn!("{}: {:#}", job.input.display(), e);
                stats.failed_count += 1;
            }
        }
    }

    BatchReport { results, stats }
}
