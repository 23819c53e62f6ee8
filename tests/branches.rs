use rvm_rs::decoder::Decoder;
use rvm_rs::disasm::{disassemble, fmt_decoded, render_line};
use rvm_rs::instructions::Op;
use rvm_rs::isa::rvm::RvmDecoder;

fn enc_pcrel23(op: Op, off: i32) -> u32 {
    (((off as u32) & 0x7F_FFFF) << 9) | op as u32
}

fn enc_pcrel19(op: Op, a: u32, off: i32) -> u32 {
    (a << 28) | (((off as u32) & 0x7_FFFF) << 9) | op as u32
}

const NOP: u32 = Op::Nop as u32;

#[test]
fn branch_to_self_at_word_2() {
    let dec = RvmDecoder::new();
    // 0x0: nop, 0x4: nop, 0x8: j <-1>
    let words = [NOP, NOP, enc_pcrel23(Op::J, -1)];
    let d = dec.decode(words[2]);
    assert_eq!(d.target(3), Some(0x8));

    let lines = disassemble(&dec, &words);
    assert_eq!(lines[2].addr, 0x8);
    assert_eq!(lines[2].operands, "8");
    assert_eq!(lines[2].comment.as_deref(), Some("-1"));
}

#[test]
fn zero_offset_targets_next_instruction() {
    let dec = RvmDecoder::new();
    let d = dec.decode(enc_pcrel23(Op::Call, 0));
    assert_eq!(d.target(5), Some(0x14));
    assert_eq!(fmt_decoded(&d, 5), "call 14");
}

#[test]
fn forward_and_backward_conditional_branches() {
    let dec = RvmDecoder::new();
    let fwd = dec.decode(enc_pcrel23(Op::Jne, 4));
    assert_eq!(fwd.target(1), Some(0x14));
    let back = dec.decode(enc_pcrel23(Op::Jle, -3));
    assert_eq!(back.target(10), Some(0x1C));
}

#[test]
fn offset_extremes_of_23_bit_field() {
    let dec = RvmDecoder::new();
    let d = dec.decode(enc_pcrel23(Op::J, (1 << 22) - 1));
    assert_eq!(d.target(1), Some((1 + (1 << 22) - 1) << 2));
    let d = dec.decode(enc_pcrel23(Op::J, -(1 << 22)));
    // below address zero wraps modulo 2^32
    assert_eq!(d.target(1), Some(1u32.wrapping_sub(1 << 22) << 2));
}

#[test]
fn adr_and_loop_resolve_against_next_pc() {
    let dec = RvmDecoder::new();
    let adr = dec.decode(enc_pcrel19(Op::Adr, 2, 6));
    assert_eq!(adr.target(4), Some(0x28));
    assert_eq!(fmt_decoded(&adr, 4), "adr r2, 28");

    let lp = dec.decode(enc_pcrel19(Op::Loop, 1, -2));
    let line = render_line(&lp, 8);
    assert_eq!(line.addr, 0x1C);
    assert_eq!(line.operands, "r1, 18");
    assert_eq!(line.comment.as_deref(), Some("-2"));
}

#[test]
fn non_pc_relative_has_no_target() {
    let dec = RvmDecoder::new();
    assert_eq!(dec.decode(NOP).target(1), None);
    assert_eq!(dec.decode(0x1FF).target(1), None);
}
