use std::fmt;

use serde::Serialize;

use crate::fields::RSP;
use crate::instructions::{self, Op, Shape};

/// A register index (0..=15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reg(pub u8);

impl Reg {
    pub fn is_sp(self) -> bool {
        self.0 == RSP
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sp() {
            f.write_str("sp")
        } else {
            write!(f, "r{}", self.0)
        }
    }
}

/// An immediate: the masked field as encoded and its extended value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Imm {
    pub field: u32,
    pub width: u8,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operands {
    None,
    RegReg { a: Reg, b: Reg },
    Reg { a: Reg },
    RegRegReg { a: Reg, b: Reg, c: Reg },
    RegRegImm { a: Reg, b: Reg, imm: Imm },
    RegImm { a: Reg, imm: Imm },
    /// `offset` is in words, relative to the next instruction.
    RegPcRel { a: Reg, offset: i32 },
    PcRel { offset: i32 },
    Mem { a: Reg, base: Reg, offset: i32 },
    Trap { code: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub raw: u32,
    /// Raw opcode field, kept even when unmapped.
    pub opcode: u16,
    pub op: Option<Op>,
    pub operands: Operands,
}

impl Decoded {
    pub fn mnemonic(&self) -> &'static str {
        instructions::mnemonic(self.opcode)
    }

    /// `None` for unmapped opcodes.
    pub fn shape(&self) -> Option<Shape> {
        self.op.map(Op::shape)
    }

    /// Resolve a PC-relative operand to a byte address.
    ///
    /// `pc_next` is the word index of the instruction *after* this one;
    /// the target is `(pc_next + offset) * 4`, wrapping at 32 bits.
    pub fn target(&self, pc_next: u32) -> Option<u32> {
        match self.operands {
            Operands::RegPcRel { offset, .. } | Operands::PcRel { offset } => {
                Some(pc_next.wrapping_add_signed(offset) << 2)
            }
            _ => None,
        }
    }
}

pub trait Decoder {
    /// Total: every word decodes, unmapped opcodes included.
    fn decode(&self, raw: u32) -> Decoded;
}
