mod db;
mod docset;
mod error;
mod render;
mod settings;
mod ucd;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::docset::{DocsetLayout, Manifest};
use crate::settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "ucd_docset", about = "Build an offline Unicode character docset from the UCD XML")]
struct Cli {
    /// UCD flat XML export (default: ucd.nounihan.flat.xml)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Docset bundle to (re)generate (default: UnicodeCharacters.docset)
    #[arg(short, long)]
    docset_dir: Option<PathBuf>,
    /// Manifest output (default: docset.json)
    #[arg(short, long)]
    manifest: Option<PathBuf>,
    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(Overrides {
        input: cli.input,
        docset_dir: cli.docset_dir,
        manifest: cli.manifest,
    })?;

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
                .progress_chars("=> "),
        );
        pb
    };

    let summary = run(&settings, &pb)?;
    println!(
        "Generated {} character pages, {} block pages, {} index rows (version {})",
        summary.characters, summary.blocks, summary.indexed, summary.version
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

struct Summary {
    version: String,
    characters: usize,
    blocks: usize,
    indexed: usize,
}

/// Load → render → index → table of contents → manifest. The manifest is
/// only written once everything before it succeeded.
fn run(settings: &Settings, pb: &ProgressBar) -> anyhow::Result<Summary> {
    let db = ucd::load(&settings.input)
        .with_context(|| format!("failed to load UCD from {}", settings.input.display()))?;
    let version = docset::docset_version(&db.version, Utc::now());
    info!("Generating docset version {}", version);

    let layout = DocsetLayout::new(&settings.docset_dir);
    layout
        .prepare()
        .with_context(|| format!("failed to prepare {}", settings.docset_dir.display()))?;

    let (entries, stats) = render::write_documents(&db, &layout.generated_dir(), pb)?;

    let conn = db::recreate(&layout.index_path())?;
    let indexed = db::insert_entries(&conn, &entries)?;
    for (kind, n) in db::count_by_kind(&conn)? {
        info!("  {}: {}", kind, n);
    }
    drop(conn);

    let toc = docset::write_toc(&layout, &db)?;
    info!("Wrote table of contents {}", toc.display());

    docset::write_manifest(&settings.manifest, &Manifest::new(version.clone()))?;

    Ok(Summary {
        version,
        characters: stats.characters,
        blocks: stats.blocks,
        indexed,
    })
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
