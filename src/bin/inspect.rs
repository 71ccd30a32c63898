// src/bin/inspect.rs
// ============================================================================
// MMUM INSPECTOR - Inspecciona una exportación MMuM sin escribir nada
// ============================================================================
//
// Uso: mmum-inspect rezept.json [--slots] [--json]
//
// ============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use mmum_beerxml::{
    beerxml::Recipe,
    mapping::{self, v2, FormatVersion, V1Families},
    record::{self, load_record},
};

#[derive(Parser)]
#[command(name = "mmum-inspect")]
#[command(about = "Inspect an MMuM recipe export")]
struct Args {
    /// MMuM JSON export
    file: PathBuf,

    /// Show v1 slot scan per family
    #[arg(long)]
    slots: bool,

    /// Print the normalized recipe as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();

    let record = load_record(&args.file)?;
    let version = mapping::detect_version(&record);
    let recipe = mapping::convert(&record)
        .with_context(|| format!("Failed to convert {}", args.file.display()))?;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  MMUM INSPECTOR");
    println!("═══════════════════════════════════════════════════════════════");
    println!("  File:     {}", args.file.display());
    println!("  Version:  {}", version);
    println!("  Recipe:   {}", recipe.name.as_deref().unwrap_or("(unnamed)"));
    println!("  Style:    {}", recipe.style.name.as_deref().unwrap_or("-"));

    match version {
        FormatVersion::V1 => print_v1_slots(&record, args.slots)?,
        FormatVersion::V2 => print_v2_sequences(&record)?,
    }

    print_recipe(&recipe);

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(&recipe)?);
    }

    Ok(())
}

fn print_v1_slots(record: &serde_json::Value, detailed: bool) -> Result<()> {
    let obj = record::as_object(record)?;
    let families = V1Families::new();

    println!("\n  Slot families:");
    for family in families.all() {
        let scan = family.scan(obj);
        if scan.complete.is_empty() && scan.incomplete.is_empty() {
            continue;
        }

        println!(
            "    {:<22} complete: {:>2}   incomplete: {:>2}",
            family.name(),
            scan.complete.len(),
            scan.incomplete.len()
        );

        if detailed {
            let complete: Vec<String> = scan.complete.iter().map(|s| s.index.to_string()).collect();
            println!("      fields:     {}", family.fields().join(", "));
            println!("      complete:   [{}]", complete.join(", "));
            println!("      incomplete: {:?}", scan.incomplete);
        }
    }
    Ok(())
}

fn print_v2_sequences(record: &serde_json::Value) -> Result<()> {
    let obj = record::as_object(record)?;

    println!("\n  Sequences:");
    for key in [
        v2::keys::MALTS,
        v2::keys::SEASONINGS,
        v2::keys::FERMENTATION_MISCS,
        v2::keys::HOPS,
        v2::keys::DRY_HOPS,
        v2::keys::DECOCTIONS,
        v2::keys::RESTS,
    ] {
        println!("    {:<22} entries: {:>2}", key, record::entries(obj, key).count());
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("\n  Gravity:");
    println!("    OG:  {:.3}", recipe.og);
    match recipe.fg {
        Some(fg) => println!("    FG:  {:.3}", fg),
        None => println!("    FG:  - (no attenuation)"),
    }
    println!("    Efficiency: {}%", recipe.efficiency);

    println!("\n  Ingredients:");
    println!("    Fermentables: {}", recipe.fermentables.len());
    for f in &recipe.fermentables {
        println!("      - {:<30} {:.3} kg", f.name, f.amount);
    }
    println!("    Hops: {}", recipe.hops.len());
    for h in &recipe.hops {
        let use_ = h.use_.map(|u| u.as_str()).unwrap_or("-");
        println!("      - {:<30} {:.3} kg  [{}]", h.name, h.amount, use_);
    }
    println!("    Miscs: {}", recipe.miscs.len());

    println!("\n  Mash schedule:");
    for step in &recipe.mash.mash_steps {
        let temp = step.step_temp.map(|t| format!("{} °C", t)).unwrap_or_else(|| "-".to_string());
        let time = step.step_time.map(|t| format!("{} min", t)).unwrap_or_else(|| "-".to_string());
        println!("    {:<16} {:<12} {:>8} {:>8}", step.name, step.step_type.as_str(), temp, time);
    }

    if let Some(y) = recipe.yeast() {
        println!("\n  Yeast: {}", y.name.as_deref().unwrap_or("-"));
        if let (Some(lo), Some(hi)) = (y.min_temperature, y.max_temperature) {
            println!("    Fermentation: {}-{} °C", lo, hi);
        }
    }
    println!("═══════════════════════════════════════════════════════════════");
}
