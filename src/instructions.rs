use serde::Serialize;

/// Operand layout of an opcode. Every mapped opcode has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    /// no operands
    None,
    /// rA, rB
    RegReg,
    /// rA
    Reg,
    /// rA, rB, rC
    RegRegReg,
    /// rA, rB, imm15
    RegRegImm15,
    /// rA, imm19
    RegImm19,
    /// rA, pc + imm19
    RegPcRel19,
    /// pc + imm23
    PcRel23,
    /// rA, [rB + imm15]
    Mem,
    /// 8-bit trap code
    Trap,
}

/// How an immediate field is widened for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ext {
    Signed,
    Unsigned,
}

macro_rules! opcodes {
    ($( $op:ident = $val:literal, $mn:literal, $shape:ident, $ext:ident; )*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[repr(u16)]
        pub enum Op {
            $( $op = $val, )*
        }

        pub const TABLE: &[InstrDesc] = &[
            $( InstrDesc { op: Op::$op, mnemonic: $mn, shape: Shape::$shape, ext: Ext::$ext }, )*
        ];
    };
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub shape: Shape,
    pub ext: Ext,
}

// TABLE is indexed by opcode value; keep entries dense and in order.
opcodes! {
    Nop   = 0,  "nop",   None,        Unsigned;
    Mov   = 1,  "mov",   RegReg,      Unsigned;
    Cmp   = 2,  "cmp",   RegReg,      Unsigned;
    Cpl   = 3,  "cpl",   RegReg,      Unsigned;
    Neg   = 4,  "neg",   RegReg,      Unsigned;
    Swp   = 5,  "swp",   RegReg,      Unsigned;
    Trap  = 6,  "trap",  Trap,        Unsigned;
    Li    = 7,  "li",    RegImm19,    Signed;
    Cmpi  = 8,  "cmpi",  RegImm19,    Signed;
    Adr   = 9,  "adr",   RegPcRel19,  Signed;
    Loop  = 10, "loop",  RegPcRel19,  Signed;
    J     = 11, "j",     PcRel23,     Signed;
    Je    = 12, "je",    PcRel23,     Signed;
    Jne   = 13, "jne",   PcRel23,     Signed;
    Jg    = 14, "jg",    PcRel23,     Signed;
    Ja    = 15, "ja",    PcRel23,     Signed;
    Jl    = 16, "jl",    PcRel23,     Signed;
    Jb    = 17, "jb",    PcRel23,     Signed;
    Jge   = 18, "jge",   PcRel23,     Signed;
    Jae   = 19, "jae",   PcRel23,     Signed;
    Jle   = 20, "jle",   PcRel23,     Signed;
    Jbe   = 21, "jbe",   PcRel23,     Signed;
    Call  = 22, "call",  PcRel23,     Signed;
    Ret   = 23, "ret",   None,        Unsigned;
    Inc   = 24, "inc",   Reg,         Unsigned;
    Dec   = 25, "dec",   Reg,         Unsigned;
    Jr    = 26, "jr",    Reg,         Unsigned;
    Callr = 27, "callr", Reg,         Unsigned;
    Add   = 28, "add",   RegRegReg,   Unsigned;
    Sub   = 29, "sub",   RegRegReg,   Unsigned;
    Mul   = 30, "mul",   RegRegReg,   Unsigned;
    Div   = 31, "div",   RegRegReg,   Unsigned;
    Mod   = 32, "mod",   RegRegReg,   Unsigned;
    Muls  = 33, "muls",  RegRegReg,   Signed;
    Divs  = 34, "divs",  RegRegReg,   Signed;
    And   = 35, "and",   RegRegReg,   Unsigned;
    Orr   = 36, "orr",   RegRegReg,   Unsigned;
    Xor   = 37, "xor",   RegRegReg,   Unsigned;
    Shl   = 38, "shl",   RegRegReg,   Unsigned;
    Shr   = 39, "shr",   RegRegReg,   Unsigned;
    Addi  = 40, "addi",  RegRegImm15, Signed;
    Subi  = 41, "subi",  RegRegImm15, Signed;
    Muli  = 42, "muli",  RegRegImm15, Unsigned;
    Divi  = 43, "divi",  RegRegImm15, Unsigned;
    Modi  = 44, "modi",  RegRegImm15, Unsigned;
    Mulsi = 45, "mulsi", RegRegImm15, Signed;
    Divsi = 46, "divsi", RegRegImm15, Signed;
    Andi  = 47, "andi",  RegRegImm15, Unsigned;
    Orri  = 48, "orri",  RegRegImm15, Unsigned;
    Xori  = 49, "xori",  RegRegImm15, Unsigned;
    Shli  = 50, "shli",  RegRegImm15, Unsigned;
    Shri  = 51, "shri",  RegRegImm15, Unsigned;
    Rd8   = 52, "rd8",   Mem,         Signed;
    Wr8   = 53, "wr8",   Mem,         Signed;
    Rd16  = 54, "rd16",  Mem,         Signed;
    Wr16  = 55, "wr16",  Mem,         Signed;
    Rd32  = 56, "rd32",  Mem,         Signed;
    Wr32  = 57, "wr32",  Mem,         Signed;
    Rd64  = 58, "rd64",  Mem,         Signed;
    Wr64  = 59, "wr64",  Mem,         Signed;
}

/// Mnemonic used for words whose opcode is not in [`TABLE`].
pub const RAW_MNEMONIC: &str = ".raw";

impl Op {
    pub fn from_opcode(opc: u16) -> Option<Op> {
        TABLE.get(opc as usize).map(|d| d.op)
    }

    /// Exact, case-sensitive mnemonic lookup.
    pub fn from_mnemonic(name: &str) -> Option<Op> {
        TABLE.iter().find(|d| d.mnemonic == name).map(|d| d.op)
    }

    pub fn desc(self) -> &'static InstrDesc {
        &TABLE[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn shape(self) -> Shape {
        self.desc().shape
    }

    pub fn ext(self) -> Ext {
        self.desc().ext
    }
}

/// Mnemonic for any opcode value, falling back to [`RAW_MNEMONIC`].
pub fn mnemonic(opc: u16) -> &'static str {
    Op::from_opcode(opc).map_or(RAW_MNEMONIC, Op::mnemonic)
}

/// Assembly names accepted for registers; `sp` aliases r15.
pub const REGISTER_NAMES: &[(&str, u8)] = &[
    ("r0", 0),
    ("r1", 1),
    ("r2", 2),
    ("r3", 3),
    ("r4", 4),
    ("r5", 5),
    ("r6", 6),
    ("r7", 7),
    ("r8", 8),
    ("r9", 9),
    ("r10", 10),
    ("r11", 11),
    ("r12", 12),
    ("r13", 13),
    ("r14", 14),
    ("r15", 15),
    ("sp", crate::fields::RSP),
];

pub fn register_index(name: &str) -> Option<u8> {
    REGISTER_NAMES.iter().find(|(n, _)| *n == name).map(|&(_, idx)| idx)
}
