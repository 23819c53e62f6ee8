use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process::ExitCode;

use rvm_disasm::{load_program, FileListing, TrailingPolicy};
use rvm_rs::disasm::Columns;

#[derive(Parser, Debug)]
#[command(author, version, about = "RVM bytecode disassembler", long_about=None)]
struct Cli {
    /// Input binary paths (flat native-endian 32-bit words)
    #[arg(value_name = "BINFILE", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Handling of a file length that is not a multiple of 4
    #[arg(long, value_enum, default_value_t = TrailingPolicy::Warn)]
    trailing: TrailingPolicy,
    /// Omit the byte address column
    #[arg(long)]
    no_addr: bool,
    /// Omit the raw instruction word column
    #[arg(long)]
    no_bytes: bool,
    /// Omit trailing value annotations
    #[arg(long)]
    no_comments: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

impl Cli {
    fn columns(&self) -> Columns {
        let mut cols = Columns::default();
        cols.set(Columns::ADDR, !self.no_addr);
        cols.set(Columns::BYTES, !self.no_bytes);
        cols.set(Columns::COMMENTS, !self.no_comments);
        cols
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let prog_name = std::env::args().next().unwrap_or_else(|| "rvm-disasm".into());
    let cols = cli.columns();

    let mut listings = Vec::new();
    let mut failed = 0usize;
    for path in &cli.inputs {
        match load_program(path, cli.trailing) {
            Ok(prog) => {
                info!(path = %path.display(), words = prog.words.len(), "loaded");
                listings.push(FileListing::new(path.display().to_string(), &prog));
            }
            Err(e) => {
                if e.is::<std::io::Error>() {
                    eprintln!("{prog_name}: Could not read file: {}: {e:#}", path.display());
                } else {
                    eprintln!("{prog_name}: Rejected file: {}: {e:#}", path.display());
                }
                failed += 1;
            }
        }
    }

    let buf = match cli.format {
        OutputFormat::Text => listings.iter().map(|l| l.to_text(cols)).collect::<String>(),
        OutputFormat::Json => serde_json::to_string_pretty(&listings)? + "\n",
    };
    if let Some(path) = &cli.out { std::fs::write(path, buf)?; } else { print!("{}", buf); }

    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
