use crate::decoder::{Decoded, Decoder, Imm, Operands, Reg};
use crate::fields::{
    fnc, opc, rga, rgb, rgc, sign_extend, zero_extend, F15_MASK, F19_MASK, F23_MASK, TRAP_MASK,
};
use crate::instructions::{Ext, Op, Shape};

/// Decoder for the RVM word format described in [`crate::fields`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RvmDecoder;

impl RvmDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn imm(raw: u32, width: u32, ext: Ext) -> Imm {
    let field = zero_extend(fnc(raw), width);
    let value = match ext {
        Ext::Signed => sign_extend(field, width),
        Ext::Unsigned => field as i32,
    };
    Imm { field, width: width as u8, value }
}

impl Decoder for RvmDecoder {
    fn decode(&self, raw: u32) -> Decoded {
        let opcode = opc(raw);
        let op = Op::from_opcode(opcode);
        let a = Reg(rga(raw));
        let b = Reg(rgb(raw));

        let operands = match op.map(|o| (o.shape(), o.ext())) {
            None => Operands::None,
            Some((Shape::None, _)) => Operands::None,
            Some((Shape::RegReg, _)) => Operands::RegReg { a, b },
            Some((Shape::Reg, _)) => Operands::Reg { a },
            Some((Shape::RegRegReg, _)) => Operands::RegRegReg { a, b, c: Reg(rgc(raw)) },
            Some((Shape::RegRegImm15, ext)) => Operands::RegRegImm { a, b, imm: imm(raw, 15, ext) },
            Some((Shape::RegImm19, ext)) => Operands::RegImm { a, imm: imm(raw, 19, ext) },
            Some((Shape::RegPcRel19, _)) => Operands::RegPcRel {
                a,
                offset: sign_extend(fnc(raw) & F19_MASK, 19),
            },
            Some((Shape::PcRel23, _)) => Operands::PcRel {
                offset: sign_extend(fnc(raw) & F23_MASK, 23),
            },
            Some((Shape::Mem, _)) => Operands::Mem {
                a,
                base: b,
                offset: sign_extend(fnc(raw) & F15_MASK, 15),
            },
            Some((Shape::Trap, _)) => Operands::Trap { code: (fnc(raw) & TRAP_MASK) as u8 },
        };

        Decoded { raw, opcode, op, operands }
    }
}
