//! Genoconv CLI entry point
//!
//! Converts HapMap genotype tables into legend, haplotype and statistics files.

use anyhow::Context;
use clap::{Parser, Subcommand};
use genoconv::core::{create_output, open_input};
use genoconv::formats;
use genoconv::{Legend, LegendBuilder, Population};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "genoconv")]
#[command(about = "Genotype format conversion with allele recoding")]
#[command(version)]
#[command(author = "Genoconv Contributors")]
struct Cli {
    /// Population name used in log messages
    #[arg(long, global = true, default_value = "population")]
    population: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a legend from a HapMap genotype file
    Legend {
        /// Input HapMap file (plain, .gz or .bz2; '-' for stdin)
        input: PathBuf,
        /// Output legend file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Code the reference sample's first allele as 1 instead of the minor allele
        #[arg(short = 'r', long)]
        reference: Option<String>,
    },
    /// Write legend, haplotype and sample files from a HapMap genotype file
    Haps {
        /// Input HapMap file (plain, .gz or .bz2; '-' for stdin)
        input: PathBuf,
        /// Output prefix (.legend, .haps and .samples are appended)
        prefix: PathBuf,
        /// Code the reference sample's first allele as 1 instead of the minor allele
        #[arg(short = 'r', long, conflicts_with = "legend")]
        reference: Option<String>,
        /// Use an existing legend file instead of building one
        #[arg(short = 'l', long, requires = "chrom")]
        legend: Option<PathBuf>,
        /// Chromosome of the existing legend file
        #[arg(short = 'c', long)]
        chrom: Option<String>,
    },
    /// Report per-locus allele statistics
    Stats {
        /// Input HapMap file (plain, .gz or .bz2; '-' for stdin)
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
    },
}

fn load_hapmap(input: &Path, name: &str) -> anyhow::Result<Population> {
    let start = Instant::now();
    eprintln!("Loading HapMap file: {:?}", input);

    let reader = open_input(input).with_context(|| format!("Failed to open {:?}", input))?;
    let (population, stats) = formats::load_population(reader, name)
        .with_context(|| format!("Failed to load HapMap file {:?}", input))?;

    eprintln!("\n=== Loading Statistics ===");
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Successful:      {}", stats.success);
    eprintln!("Failed:          {}", stats.failed);
    eprintln!("Samples:         {}", population.len());
    eprintln!("SNPs:            {}", population.snps().len());
    eprintln!("Loaded in {:.2}s", start.elapsed().as_secs_f64());

    Ok(population)
}

fn build_legend(population: &Population, reference: Option<&str>) -> anyhow::Result<Legend> {
    let builder = LegendBuilder::from_population(population);
    let legend = match reference {
        Some(name) => {
            let sample = population
                .sample(name)
                .with_context(|| format!("Reference sample {} not found", name))?;
            Legend::reference_sample(builder, sample)
        }
        None => Legend::minor_allele(builder),
    };
    Ok(legend)
}

fn output_or_stdout(output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from("-"))
}

/// Write quarantined SNPs next to `path` as `<path>.bad`
fn write_bad_snps(legend: &Legend, path: &Path) -> anyhow::Result<()> {
    if legend.bad_snps().is_empty() {
        return Ok(());
    }
    let bad_path = if path.as_os_str() == "-" {
        PathBuf::from("legend.bad")
    } else {
        path.with_extension(match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.bad", ext),
            None => "bad".to_string(),
        })
    };
    let mut out = create_output(&bad_path)?;
    for snp in legend.bad_snps() {
        let alleles = legend.alleles_for_bad_snp(snp)?;
        writeln!(out, "{} {} {}", snp.name(), snp.position(), alleles.join(","))?;
    }
    out.flush()?;
    eprintln!("Quarantined SNPs written to {:?}", bad_path);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Legend { input, output, reference } => {
            let population = load_hapmap(&input, &cli.population)?;
            let legend = build_legend(&population, reference.as_deref())?;
            let output_path = output_or_stdout(output);

            let mut out = create_output(&output_path)?;
            legend.write_to(&mut out)?;
            out.flush()?;
            write_bad_snps(&legend, &output_path)?;

            eprintln!("\n=== Legend Statistics ===");
            eprintln!("Legend SNPs:     {}", legend.len());
            eprintln!("Quarantined:     {}", legend.bad_snps().len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Haps { input, prefix, reference, legend, chrom } => {
            let population = load_hapmap(&input, &cli.population)?;
            let legend = match (legend, chrom) {
                (Some(path), Some(chrom)) => formats::read_legend(&path, &chrom)
                    .with_context(|| format!("Failed to read legend {:?}", path))?,
                _ => build_legend(&population, reference.as_deref())?,
            };

            let legend_path = prefix.with_extension("legend");
            let haps_path = prefix.with_extension("haps");
            let samples_path = prefix.with_extension("samples");
            eprintln!("Writing {:?}, {:?}, {:?}", legend_path, haps_path, samples_path);

            let mut out = create_output(&legend_path)?;
            legend.write_to(&mut out)?;
            out.flush()?;
            write_bad_snps(&legend, &legend_path)?;

            let mut out = create_output(&haps_path)?;
            let stats = formats::write_haps(&population, &legend, &mut out)?;
            out.flush()?;

            let mut out = create_output(&samples_path)?;
            formats::write_samples(&population, &mut out)?;
            out.flush()?;

            eprintln!("\n=== Haplotype Statistics ===");
            eprintln!("SNPs written:    {}", stats.snps);
            eprintln!("Coded alleles:   {}", stats.coded);
            eprintln!("Missing codes:   {}", stats.missing);
            eprintln!("Quarantined:     {}", legend.bad_snps().len());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Stats { input, output } => {
            let population = load_hapmap(&input, &cli.population)?;
            let mut out = create_output(&output_or_stdout(output))?;
            formats::write_stats(&population, &mut out)?;
            out.flush()?;
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
