//! Bit-field layout of an RVM instruction word.
//!
//! ```text
//!  31   28 27   24 23   20 19                  9 8         0
//! +-------+-------+-------+---------------------+-----------+
//! |  rgA  |  rgB  |  rgC  |         ...         |  opcode   |
//! +-------+-------+-------+---------------------+-----------+
//!         |<-------------- fnc (23 bits) ------>|
//! ```
//!
//! Immediates always occupy the low bits of the function field, so an
//! instruction with two register operands has 15 bits left for its immediate,
//! one register leaves 19, and none leaves the full 23.

pub const OPC_BITS: u32 = 9;
pub const OPC_MASK: u32 = (1 << OPC_BITS) - 1;
pub const FNC_SHIFT: u32 = OPC_BITS;

pub const RGA_SHIFT: u32 = 28;
pub const RGB_SHIFT: u32 = 24;
pub const RGC_SHIFT: u32 = 20;
pub const REG_MASK: u32 = 0xF;

pub const F15_MASK: u32 = 0x7FFF;
pub const F19_MASK: u32 = 0x7_FFFF;
pub const F23_MASK: u32 = 0x7F_FFFF;
pub const TRAP_MASK: u32 = 0xFF;

/// Register index of the stack pointer (aliases `r15`).
pub const RSP: u8 = 15;

#[inline]
pub fn opc(raw: u32) -> u16 {
    (raw & OPC_MASK) as u16
}

#[inline]
pub fn rga(raw: u32) -> u8 {
    ((raw >> RGA_SHIFT) & REG_MASK) as u8
}

#[inline]
pub fn rgb(raw: u32) -> u8 {
    ((raw >> RGB_SHIFT) & REG_MASK) as u8
}

#[inline]
pub fn rgc(raw: u32) -> u8 {
    ((raw >> RGC_SHIFT) & REG_MASK) as u8
}

/// The function field: everything above the opcode.
#[inline]
pub fn fnc(raw: u32) -> u32 {
    raw >> FNC_SHIFT
}

/// Mask for a `width`-bit field (1..=32).
#[inline]
pub fn mask(width: u32) -> u32 {
    debug_assert!((1..=32).contains(&width));
    u32::MAX >> (32 - width)
}

/// Interpret the low `width` bits of `v` as two's complement.
#[inline]
pub fn sign_extend(v: u32, width: u32) -> i32 {
    debug_assert!((1..=32).contains(&width));
    let s = 32 - width;
    ((v << s) as i32) >> s
}

#[inline]
pub fn zero_extend(v: u32, width: u32) -> u32 {
    v & mask(width)
}
