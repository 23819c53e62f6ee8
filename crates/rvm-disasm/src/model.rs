use anyhow::Result;
use std::path::Path;
use tracing::warn;

/// What to do with a file whose length is not a multiple of 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TrailingPolicy {
    /// Drop the partial word and log a warning
    #[default]
    Warn,
    /// Refuse the file
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub words: Vec<u32>,
    /// Bytes past the last whole word (0..=3), not decoded.
    pub trailing: usize,
}

/// Split raw bytes into host-order words.
pub fn words_from_bytes(bytes: &[u8]) -> Program {
    let chunks = bytes.chunks_exact(4);
    let trailing = chunks.remainder().len();
    let words = chunks.map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]])).collect();
    Program { words, trailing }
}

pub fn load_program(path: &Path, policy: TrailingPolicy) -> Result<Program> {
    let file = std::fs::read(path)?;
    let prog = words_from_bytes(&file);
    if prog.trailing != 0 {
        anyhow::ensure!(
            policy == TrailingPolicy::Warn,
            "file length {} is not a multiple of 4",
            file.len()
        );
        warn!(path = %path.display(), trailing = prog.trailing, "ignoring partial trailing word");
    }
    Ok(prog)
}
