use std::fmt::{self, Write as _};

use bitflags::bitflags;
use serde::Serialize;

use crate::decoder::{Decoded, Decoder, Operands};

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Columns: u8 {
const ADDR = 1 << 0; // byte address
const BYTES = 1 << 1; // raw word in hex
const COMMENTS = 1 << 2; // trailing "; value" annotations
}
}

impl Default for Columns {
    fn default() -> Self {
        Columns::all()
    }
}

/// One rendered listing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub addr: u32,
    pub raw: u32,
    pub mnemonic: &'static str,
    pub operands: String,
    pub comment: Option<String>,
}

impl Line {
    pub fn to_text(&self, cols: Columns) -> String {
        let mut s = String::new();
        if cols.contains(Columns::ADDR) {
            let _ = write!(s, " {:6x}:    ", self.addr);
        }
        if cols.contains(Columns::BYTES) {
            let _ = write!(s, "{:08x}    ", self.raw);
        }
        let _ = write!(s, "{:<10}{}", self.mnemonic, self.operands);
        if cols.contains(Columns::COMMENTS) {
            if let Some(c) = &self.comment {
                let _ = write!(s, "\t\t; {c}");
            }
        }
        s
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(Columns::all()))
    }
}

fn operands(d: &Decoded, pc_next: u32) -> (String, Option<String>) {
    let target = d.target(pc_next).unwrap_or(0);
    match d.operands {
        Operands::None => (String::new(), None),
        Operands::RegReg { a, b } => (format!("{a}, {b}"), None),
        Operands::Reg { a } => (a.to_string(), None),
        Operands::RegRegReg { a, b, c } => (format!("{a}, {b}, {c}"), None),
        Operands::RegRegImm { a, b, imm } => {
            (format!("{a}, {b}, #{:#x}", imm.field), Some(imm.value.to_string()))
        }
        Operands::RegImm { a, imm } => (format!("{a}, #{:#x}", imm.field), Some(imm.value.to_string())),
        Operands::RegPcRel { a, offset } => (format!("{a}, {target:x}"), Some(format!("{offset:+}"))),
        Operands::PcRel { offset } => (format!("{target:x}"), Some(format!("{offset:+}"))),
        Operands::Mem { a, base, offset } => (format!("{a}, [{base} + #{offset}]"), None),
        Operands::Trap { code } => (format!("#{code:#x}"), Some(code.to_string())),
    }
}

/// Render `d` as `mnemonic operands`, resolving PC-relative targets
/// against `pc_next` (the word index following `d`).
pub fn fmt_decoded(d: &Decoded, pc_next: u32) -> String {
    let (ops, _) = operands(d, pc_next);
    if ops.is_empty() {
        d.mnemonic().to_string()
    } else {
        format!("{} {}", d.mnemonic(), ops)
    }
}

/// Build the listing record for the word at word index `pc_next - 1`.
pub fn render_line(d: &Decoded, pc_next: u32) -> Line {
    let (operands, comment) = operands(d, pc_next);
    Line {
        addr: pc_next.wrapping_sub(1) << 2,
        raw: d.raw,
        mnemonic: d.mnemonic(),
        operands,
        comment,
    }
}

/// Disassemble a flat program, one line per word, in order.
pub fn disassemble<D: Decoder>(dec: &D, words: &[u32]) -> Vec<Line> {
    words
        .iter()
        .enumerate()
        .map(|(i, &raw)| render_line(&dec.decode(raw), i as u32 + 1))
        .collect()
}
