use std::fmt::Write as _;

use serde::Serialize;

use rvm_rs::disasm::{disassemble, Columns, Line};
use rvm_rs::isa::rvm::RvmDecoder;

use crate::model::Program;

/// Disassembly of one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileListing {
    pub path: String,
    pub lines: Vec<Line>,
}

impl FileListing {
    pub fn new(path: impl Into<String>, prog: &Program) -> Self {
        let dec = RvmDecoder::new();
        Self { path: path.into(), lines: disassemble(&dec, &prog.words) }
    }

    /// Header, blank line, one line per word, blank line.
    pub fn to_text(&self, cols: Columns) -> String {
        let mut buf = String::new();
        let _ = writeln!(buf, "Disassembly of file:    {}", self.path);
        buf.push('\n');
        for line in &self.lines {
            let _ = writeln!(buf, "{}", line.to_text(cols));
        }
        buf.push('\n');
        buf
    }
}
