//! # chatscope CLI
//!
//! Command-line interface for the chatscope library.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatscope::ChatscopeError;
use chatscope::analytics::ChatAnalytics;
use chatscope::cli::{Args, render_summary};
use chatscope::format::{OutputFormat, write_to_format};
use chatscope::parser::TranscriptParser;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), ChatscopeError> {
    let args = <Args as ClapParser>::parse();

    let parser = TranscriptParser::with_config(args.parser_config());
    let entries = parser.parse(&args.input)?;
    let analytics = ChatAnalytics::from_entries(&entries);

    if let Some(ref output) = args.output {
        let format: OutputFormat = args.format.into();
        write_to_format(&entries, output, format, &args.output_config())?;
        println!(
            "💾 Wrote {} entries to {} ({})",
            entries.len(),
            output.display(),
            format
        );
    }

    if let Some(ref path) = args.analytics {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &analytics)?;
        writer.flush()?;
        println!("📊 Wrote analytics to {}", path.display());
    }

    print!("{}", render_summary(&entries, &analytics, args.show));
    Ok(())
}
