// src/main.rs
// ============================================================================
// MMUM2BEERXML CLI
// ============================================================================
//
// Uso simple:
//   mmum2beerxml rezept.json -o rezept.xml
//
// Batch:
//   mmum2beerxml exports/*.json --out-dir beerxml/
//
// Volcado del árbol normalizado:
//   mmum2beerxml rezept.json --format json
//
// ============================================================================

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use mmum_beerxml::{
    beerxml::XmlConfig,
    builder::{convert_batch, resolve_output, ConvertJob, ConvertOptions, OutputFormat},
};

#[derive(Parser, Debug)]
#[command(name = "mmum2beerxml")]
#[command(about = "Convert MMuM recipe exports (v1/v2) to BeerXML")]
#[command(version)]
struct Args {
    /// MMuM JSON export(s)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Output directory (one file per input)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output format: xml | json
    #[arg(short, long, default_value = "xml")]
    format: OutputFormat,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Single-line output
    #[arg(long)]
    compact: bool,

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

    let start = Instant::now();

    let format = args.format;

    if args.output.is_some() && args.inputs.len() > 1 {
        anyhow::bail!("--output takes a single input; use --out-dir for several files");
    }

    let options = ConvertOptions {
        format,
        xml: XmlConfig {
            indent: args.indent,
            pretty: !args.compact,
        },
    };

    let jobs: Vec<ConvertJob> = args
        .inputs
        .iter()
        .map(|input| ConvertJob {
            input: input.clone(),
            output: args
                .output
                .clone()
                .unwrap_or_else(|| resolve_output(input, args.out_dir.as_deref(), format)),
        })
        .collect();

    println!("═══════════════════════════════════════════════════════════════");
    println!("  MMUM → BEERXML v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Inputs:  {}", jobs.len());
    println!("  Format:  {}", format.extension());
    if let Some(dir) = &args.out_dir {
        println!("  Out dir: {}", dir.display());
    }
    println!("═══════════════════════════════════════════════════════════════");

    let report = convert_batch(jobs, &options, args.inputs.len() > 1);

    for (job, result) in &report.results {
        match result {
            Ok(stats) => {
                println!("\n[{}] {}", stats.version, job.input.display());
                println!(
                    "  ✓ {} fermentables, {} hops, {} miscs, {} mash steps",
                    stats.fermentables, stats.hops, stats.miscs, stats.mash_steps
                );
                println!("  → {} ({} bytes)", stats.output.display(), stats.bytes);
            }
            Err(e) => {
                println!("\n[FAILED] {}", job.input.display());
                println!("  ✗ {:#}", e);
            }
        }
    }

    let stats = &report.stats;
    let elapsed = start.elapsed();

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  CONVERSION COMPLETE");
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Time:      {:.2}s", elapsed.as_secs_f64());
    println!("  Converted: {} (v1:{}, v2:{})", stats.converted(), stats.v1_count, stats.v2_count);
    println!("  Failed:    {}", stats.failed_count);
    println!("  Written:   {:.1} KB", stats.total_bytes as f64 / 1024.0);
    println!("═══════════════════════════════════════════════════════════════");

    if stats.failed_count > 0 {
        anyhow::bail!("{} of {} files failed", stats.failed_count, report.results.len());
    }

    Ok(())
}
