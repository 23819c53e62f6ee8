use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rvm_rs::{IncludeStack, TokenKind, MAX_INCLUDE_DEPTH};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "RVM bytecode assembler front end (tokenizes and echoes a source file)"
)]
struct Opts {
    /// Maximum nesting depth for included files
    #[arg(long, default_value_t = MAX_INCLUDE_DEPTH)]
    max_depth: usize,
    /// Output format: text (annotated source) or json (token records)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(value_name = "SRCFILE")]
    input: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Serialize)]
struct TokenOut<'a> {
    file: &'a str,
    kind: TokenKind,
    text: &'a str,
    line: u32,
    col: u32,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let mut stack = IncludeStack::with_max_depth(opts.max_depth);

    let lexer = match stack.push(&opts.input) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Could not open file: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut status = ExitCode::SUCCESS;
    let mut records = Vec::new();
    while lexer.is_active() {
        let tok = lexer.next_token();
        if tok.kind == TokenKind::Unknown {
            error!(file = lexer.file(), line = tok.line, col = tok.col, "unrecognized token");
            status = ExitCode::FAILURE;
        }
        match opts.format {
            OutputFormat::Text => print!("{}", lexer.render(&tok, Some(&format!("tok: {}", tok.kind)))),
            OutputFormat::Json => records.push(tok),
        }
    }

    if let OutputFormat::Json = opts.format {
        let out: Vec<TokenOut> = records
            .iter()
            .map(|t| TokenOut { file: lexer.file(), kind: t.kind, text: lexer.text(t), line: t.line, col: t.col })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    stack.clear();
    Ok(status)
}
