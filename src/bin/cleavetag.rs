use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;

use cleavetag::catalog::Catalog;
use cleavetag::config::DesignConfig;
use cleavetag::design::{with_threads, Designer};
use cleavetag::digest::Digester;
use cleavetag::reference::{GeneTable, Reference};
use cleavetag::report;
use cleavetag::transcript::Transcript;

/// cleavetag CLI
#[derive(Parser)]
#[command(name = "cleavetag")]
#[command(version)]
#[command(
    about = "Design RE/B oligo pairs that tag transcripts at an enzymatic cut site",
    long_about = None
)]
struct Cli {
    /// Enzyme catalog JSON (default: built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log candidate decisions (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all enzymes in the catalog
    ListEnzymes,

    /// Describe an enzyme by name or isoschizomer (e.g., "HaeIII")
    Describe {
        /// Enzyme name
        name: String,
    },

    /// Digest an ad-hoc sequence and print its fragments
    Digest {
        /// Enzyme name
        #[arg(long)]
        enzyme: String,
        /// RNA or DNA sequence
        sequence: String,
    },

    /// Design oligo pairs for every transcript of a gene
    Design {
        /// Gene name
        #[arg(long)]
        gene: String,
        /// Tab-separated gene → transcript table
        #[arg(long)]
        genes: PathBuf,
        /// Transcript FASTA (plain or gzip)
        #[arg(long)]
        reference: PathBuf,
        /// Restrict to these enzymes (repeatable; default: whole catalog)
        #[arg(long = "enzyme")]
        enzymes: Vec<String>,
        /// Design parameters JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Threads (0/None = all)
        #[arg(long)]
        threads: Option<usize>,
        /// Emit tables as CSV to stdout
        #[arg(long)]
        csv: bool,
        /// Write a JSON summary to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let catalog = match &cli.catalog {
        Some(p) => Catalog::from_path(p)
            .with_context(|| format!("loading catalog {}", p.display()))?,
        None => Catalog::builtin(),
    };

    match cli.command {
        Commands::ListEnzymes => cmd_list_enzymes(&catalog),
        Commands::Describe { name } => cmd_describe(&catalog, &name),
        Commands::Digest { enzyme, sequence } => cmd_digest(&catalog, &enzyme, &sequence),
        Commands::Design { gene, genes, reference, enzymes, config, threads, csv, json } => {
            let config = match config {
                Some(p) => DesignConfig::from_path(&p)
                    .with_context(|| format!("loading config {}", p.display()))?,
                None => DesignConfig::default(),
            };
            let enzymes = catalog.select(&enzymes)?;
            let genes = GeneTable::from_tsv(&genes)?;
            let reference = Reference::from_fasta(&reference)?;
            log::info!("loaded {} reference sequences", reference.len());

            let designer = Designer::new(config);
            let result = with_threads(threads, || {
                cleavetag::design_gene(&gene, &genes, &reference, &enzymes, &designer)
            })??;

            report::configure_table_display();
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if result.designs.is_empty() {
                log::warn!("{gene}: no enzyme produced a design");
            }
            for design in &result.designs {
                report::write_enzyme_design(&mut out, design, csv)?;
            }

            if let Some(path) = json {
                let ids = result.transcript_ids();
                let summary = report::GeneSummary::new(&result.gene, ids, &result.designs);
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(file, &summary)?;
                log::info!("wrote summary to {}", path.display());
            }
            Ok(())
        }
    }
}

fn cmd_list_enzymes(catalog: &Catalog) -> Result<()> {
    let df = report::enzymes_df(catalog.enzymes())?;
    report::configure_table_display();
    println!("{df}");
    Ok(())
}

fn cmd_describe(catalog: &Catalog, name: &str) -> Result<()> {
    let e = catalog
        .get(name)
        .ok_or_else(|| cleavetag::error::DesignError::UnknownEnzyme(name.to_string()))?;
    println!("name: {}", e.name);
    println!("motif: {}", e.display_motif);
    println!("pattern: {}", e.pattern);
    println!("cut offset: {}", e.cut_offset);
    println!("incubation: {} °C", e.incubation_temp);
    match e.inactivation_temp {
        Some(t) => println!("inactivation: {t} °C"),
        None => println!("inactivation: none"),
    }
    println!("palindromic: {}", e.is_palindromic());
    if let Some(f) = e.min_flank {
        println!("min flank: {f}");
    }
    if !e.isoschizomers.is_empty() {
        println!("isoschizomers: {}", e.isoschizomers.join(", "));
    }
    if let Some(src) = &e.source {
        println!("source: {} ({})", src.reference, src.url);
        if !src.notes.is_empty() {
            println!("notes: {}", src.notes);
        }
    }
    Ok(())
}

fn cmd_digest(catalog: &Catalog, enzyme: &str, sequence: &str) -> Result<()> {
    let e = catalog
        .get(enzyme)
        .ok_or_else(|| cleavetag::error::DesignError::UnknownEnzyme(enzyme.to_string()))?;
    let query = Transcript::new("query", sequence)?;
    let fragments = Digester::new(e)?.digest(query.sequence());
    let df = df!(
        "fragment" => fragments.iter().map(|f| f.index as u64).collect::<Vec<_>>(),
        "start"    => fragments.iter().map(|f| f.start as u64).collect::<Vec<_>>(),
        "length"   => fragments.iter().map(|f| f.len() as u64).collect::<Vec<_>>(),
        "sequence" => fragments.iter().map(|f| f.sequence.to_string()).collect::<Vec<_>>(),
    )?;
    report::configure_table_display();
    println!("{df}");
    Ok(())
}
