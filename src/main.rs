//! # propchat CLI
//!
//! Command-line interface for the propchat library.

use std::io;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use propchat::cli::Args;
use propchat::format::{OutputFormat, write_to_format};
use propchat::{Pipeline, PropchatError, Record};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), PropchatError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    println!("🏠 propchat v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Inputs:  {}", args.inputs.len());
    println!("💾 Output:  {output_path}");
    println!("📄 Format:  {format}");
    if let Some(rules) = &args.rules {
        println!("📐 Rules:   {}", rules.display());
    }
    if args.redact_phones {
        println!("🙈 Redacting phones in message column");
    }
    println!();

    let mut pipeline = Pipeline::with_config(&args.extraction_config()?)?;
    let output_config = args.output_config()?;

    let mut records: Vec<Record> = Vec::new();
    let mut failed = 0usize;
    for input in &args.inputs {
        println!("⏳ Processing {}...", input.display());
        let start = Instant::now();
        match pipeline.process_file(input) {
            Ok(batch) => {
                println!(
                    "   {} records ({:.2}s)",
                    batch.len(),
                    start.elapsed().as_secs_f64()
                );
                records.extend(batch);
            }
            Err(e) => {
                error!(path = %input.display(), error = %e, "skipping source");
                println!("   ⚠️  Skipped: {e}");
                failed += 1;
            }
        }
    }

    if failed == args.inputs.len() {
        eprintln!("❌ Error: none of the {failed} source(s) could be processed");
        process::exit(1);
    }

    println!("💾 Writing {format}...");
    let write_start = Instant::now();
    write_to_format(&records, &output_path, format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {output_path}");

    println!();
    println!("📊 Summary:");
    print!("{}", pipeline.stats());
    if failed > 0 {
        println!("   {:<14} {failed}", "Skipped:");
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
