use pretty_assertions::assert_eq;

use rvm_rs::decoder::Decoder;
use rvm_rs::disasm::{disassemble, fmt_decoded, Columns};
use rvm_rs::instructions::Op;
use rvm_rs::isa::rvm::RvmDecoder;

fn enc(op: Op, a: u32, b: u32, c: u32, imm: u32) -> u32 {
    (a << 28) | (b << 24) | (c << 20) | (imm << 9) | op as u32
}

#[test]
fn disasm_register_forms() {
    let dec = RvmDecoder::new();
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Nop, 0, 0, 0, 0)), 1), "nop");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Mov, 0, 1, 0, 0)), 1), "mov r0, r1");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Inc, 15, 0, 0, 0)), 1), "inc sp");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Add, 1, 2, 3, 0)), 1), "add r1, r2, r3");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Swp, 15, 14, 0, 0)), 1), "swp sp, r14");
}

#[test]
fn disasm_immediates() {
    let dec = RvmDecoder::new();
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Li, 2, 0, 0, 0x7_FFFF)), 1), "li r2, #0x7ffff");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Addi, 1, 1, 0, 0x10)), 1), "addi r1, r1, #0x10");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Wr8, 3, 15, 0, 0x7FFC)), 1), "wr8 r3, [sp + #-4]");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Rd64, 0, 1, 0, 16)), 1), "rd64 r0, [r1 + #16]");
    assert_eq!(fmt_decoded(&dec.decode(enc(Op::Trap, 0, 0, 0, 0x2A)), 1), "trap #0x2a");
}

#[test]
fn annotations_follow_field_semantics() {
    let dec = RvmDecoder::new();
    let words = [
        enc(Op::Li, 2, 0, 0, 0x7_FFFF),
        enc(Op::Subi, 1, 2, 0, 0x7FFF),
        enc(Op::Xori, 1, 2, 0, 0x7FFF),
        enc(Op::Trap, 0, 0, 0, 0x2A),
        enc(Op::Wr8, 3, 15, 0, 0x7FFC),
    ];
    let comments: Vec<_> = disassemble(&dec, &words).into_iter().map(|l| l.comment).collect();
    assert_eq!(
        comments,
        vec![Some("-1".to_string()), Some("-1".to_string()), Some("32767".to_string()), Some("42".to_string()), None]
    );
}

#[test]
fn listing_text_layout() {
    let dec = RvmDecoder::new();
    let words = [
        enc(Op::Mov, 0, 1, 0, 0),
        enc(Op::Li, 2, 0, 0, 5),
        0x0000_01FF,
    ];
    let text: Vec<String> = disassemble(&dec, &words).iter().map(|l| l.to_string()).collect();
    let mov = enc(Op::Mov, 0, 1, 0, 0);
    let li = enc(Op::Li, 2, 0, 0, 5);
    assert_eq!(
        text,
        vec![
            format!("      0:    {mov:08x}    mov       r0, r1"),
            format!("      4:    {li:08x}    li        r2, #0x5\t\t; 5"),
            "      8:    000001ff    .raw      ".to_string(),
        ]
    );
}

#[test]
fn column_switches() {
    let dec = RvmDecoder::new();
    let lines = disassemble(&dec, &[enc(Op::Li, 2, 0, 0, 5)]);
    let l = &lines[0];
    assert_eq!(l.to_text(Columns::empty()), "li        r2, #0x5");
    assert_eq!(l.to_text(Columns::ADDR), "      0:    li        r2, #0x5");
    assert_eq!(l.to_text(Columns::COMMENTS), "li        r2, #0x5\t\t; 5");
    assert_eq!(Columns::default(), Columns::all());
}

#[test]
fn addresses_advance_by_four() {
    let dec = RvmDecoder::new();
    let words = vec![0u32; 70];
    let lines = disassemble(&dec, &words);
    assert_eq!(lines.len(), 70);
    for (i, l) in lines.iter().enumerate() {
        assert_eq!(l.addr, i as u32 * 4);
        assert_eq!(l.mnemonic, "nop");
    }
    assert_eq!(lines[69].to_string(), "    114:    00000000    nop       ");
}
