pub mod decoder;
pub mod disasm;
pub mod fields;
pub mod include;
pub mod instructions;
pub mod lexer;

pub mod isa {
    pub mod rvm;
}

pub use decoder::{Decoded, Decoder, Imm, Operands, Reg};
pub use disasm::{disassemble, fmt_decoded, Columns, Line};
pub use include::{IncludeError, IncludeStack, MAX_INCLUDE_DEPTH};
pub use instructions::{Op, Shape};
pub use isa::rvm::RvmDecoder;
pub use lexer::{Lexer, Token, TokenKind};
