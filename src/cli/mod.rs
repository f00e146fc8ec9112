//! Command line interface for the `seal-manifest` binary.
//!
//! Thin dispatch only: corpus loading, sealing and verification all live
//! in the library. `build` turns a local corpus file into a manifest JSON
//! on disk; `verify` re-derives every seal of an existing manifest.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;

use crate::config::Config;
use crate::core::seal_chapter;
use crate::corpus::Work;
use crate::error::Result;
use crate::manifest::{Manifest, Provenance};
use crate::verify::verify_manifest;

#[derive(Parser)]
#[command(author, version, about = "Scripture seal manifest builder", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file; defaults apply when absent.
    #[arg(long, default_value = "seal.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a manifest from a verse-per-line corpus file
    Build {
        /// Corpus file, one `CHAPTER:UNIT|TEXT` line per unit
        #[arg(long)]
        corpus: PathBuf,
        /// Output path; defaults to `<output.dir>/<work_id>_manifest.json`
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Re-verify every chapter seal of an existing manifest
    Verify {
        /// Manifest JSON file to check
        #[arg(long)]
        manifest: PathBuf,
    },
}

/// Parses arguments and runs the selected subcommand.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_logger(&config.logging.level);

    match cli.command {
        Commands::Build { corpus, out } => build(&config, &corpus, out),
        Commands::Verify { manifest } => verify(&manifest),
    }
}

fn build(config: &Config, corpus: &PathBuf, out: Option<PathBuf>) -> Result<()> {
    let source = &config.source;
    info!(
        "building manifest for work '{}' from {}",
        source.work_id,
        corpus.display()
    );
    let work = Work::load_verse_file(&source.work_id, corpus, &source.chapter_prefix)?;

    // Any failed chapter fails the whole build; publishing a manifest
    // with a missing or partial chapter would be a misleading commitment.
    let mut seals = Vec::with_capacity(work.chapters.len());
    for chapter in &work.chapters {
        seals.push(seal_chapter(&work.id, chapter)?);
    }

    let manifest = Manifest::assemble(
        Provenance::new(&source.name, &source.edition, Utc::now()),
        seals,
    );

    let out = match out {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.output.dir)?;
            PathBuf::from(&config.output.dir).join(format!(
                "{}_manifest.json",
                source.work_id.to_lowercase()
            ))
        }
    };
    manifest.write_to_file(&out)?;
    info!(
        "wrote manifest with {} chapters to {}",
        manifest.chapters.len(),
        out.display()
    );
    Ok(())
}

fn verify(path: &PathBuf) -> Result<()> {
    let manifest = Manifest::read_from_file(path)?;
    let report = verify_manifest(&manifest)?;
    info!(
        "manifest {} verified: {} chapters, {} unit digests",
        path.display(),
        report.chapters_verified,
        report.units_covered
    );
    println!(
        "OK: {} chapters, {} unit digests, modulus {}",
        report.chapters_verified, report.units_covered, manifest.provenance.modulus
    );
    Ok(())
}

fn init_logger(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // try_init so tests invoking run() twice don't panic
    let _ = env_logger::Builder::from_env(env).try_init();
}
