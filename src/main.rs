//! # threema2html CLI
//!
//! Command-line interface for the threema2html library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use threema2html::cli::Args;
use threema2html::config::Config;
use threema2html::index::FileIndex;
use threema2html::outfile::output_path;
use threema2html::parser::ArchiveParser;
use threema2html::render::render_document;
use threema2html::{ArchiveError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        eprintln!("   Run with --help for usage and archive preparation steps.");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    println!("📦 threema2html v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Directory: {}", args.directory.display());

    // Configuration: a rejected file warns and falls back, never aborts
    let load = Config::load(&args.directory);
    if let Some(warning) = &load.warning {
        eprintln!("⚠️  Warning: {}", warning);
    }
    if let Some(source) = &load.source {
        println!("🔧 Config:    {}", source.display());
    }
    let config = load.config;

    let messages_filename = args
        .messages_filename
        .clone()
        .unwrap_or_else(|| config.messages_filename.clone());
    println!("📄 Messages:  {}", messages_filename);
    println!();

    println!("⏳ Reading all files from '{}'...", args.directory.display());
    let index = FileIndex::build(&args.directory)?;
    println!("   Found {} files", index.len());

    let messages_file = index
        .lookup(&messages_filename)
        .ok_or_else(|| {
            ArchiveError::missing_messages_file(messages_filename.as_str(), &args.directory)
        })?
        .clone();

    println!("⏳ Parsing '{}'...", messages_file.path.display());
    let parse_start = Instant::now();
    let outcome = ArchiveParser::new().parse_file(&messages_file.path, &index)?;
    println!(
        "   {} messages from {} senders ({:.2}s)",
        outcome.messages.len(),
        outcome.senders.len(),
        parse_start.elapsed().as_secs_f64()
    );

    let html = render_document(&outcome.messages, &outcome.senders, &config);

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.directory));
    println!("💾 Writing '{}'...", out_path.display());
    fs::write(&out_path, html).map_err(|e| ArchiveError::file_system(&out_path, e))?;

    println!();
    println!("✅ Done! Output saved to {}", out_path.display());
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
