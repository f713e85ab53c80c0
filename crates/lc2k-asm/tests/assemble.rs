use lc2k_asm::{assemble, AsmConfig, AsmError, Emitted};
use lc2k_rs::decoder::Decoder;
use lc2k_rs::disasm::fmt_instr;
use lc2k_rs::exec::IntExecutor;
use lc2k_rs::isa::lc2k::Lc2kDecoder;
use lc2k_rs::{Cpu, CpuConfig, WordMemory};
use pretty_assertions::assert_eq;

const SKIP: &str = "start add 0 0 1\n\tbeq 0 1 end\n\tnoop\nend halt\n";

fn asm(src: &str) -> Result<lc2k_asm::Assembly, AsmError> {
    assemble(src, &AsmConfig::default())
}

fn simulate(image: &[i32]) -> (Cpu, u64) {
    let mut mem = WordMemory::new(256);
    mem.load_image(image).unwrap();
    let mut cpu = Cpu::new(CpuConfig::default());
    let summary = cpu
        .run(&mut mem, &Lc2kDecoder::new(), &IntExecutor, |_, _| {})
        .unwrap();
    assert!(summary.halted);
    (cpu, summary.instructions)
}

#[test]
fn skip_program_words() {
    let out = asm(SKIP).unwrap();
    assert_eq!(out.symbols.get("end"), Some(3));
    assert_eq!(out.render(), "1\n16842753\n29360128\n25165824");
    // beq offset field = 3 - (1 + 1)
    assert_eq!(out.words[1], Emitted::Word(16842753));
    assert_eq!(16842753 & 0xFFFF, 1);
}

#[test]
fn space_indented_lines_carry_no_label() {
    let src = "start add 0 0 1\n beq 0 1 end\n noop\nend halt\n";
    let out = asm(src).unwrap();
    assert_eq!(out.words, asm(SKIP).unwrap().words);
    let names: Vec<_> = out.symbols.export().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["start", "end"]);
    // a space-indented label is read as the opcode
    let err = asm("start add 0 0 1\n noop\n end halt\n").unwrap_err();
    assert_eq!(
        err,
        AsmError::UnrecognizedOpcode {
            line: 3,
            opcode: "end".into()
        }
    );
}

#[test]
fn skip_program_runs() {
    let out = asm(SKIP).unwrap();
    let (cpu, executed) = simulate(&out.image());
    assert_eq!(executed, 3);
    assert_eq!(cpu.pc, 4);
    assert_eq!(cpu.reg[1], 0);
}

#[test]
fn write_to_has_no_trailing_newline() {
    let out = asm("\tnoop\nneg .fill -5\n").unwrap();
    let mut buf = Vec::new();
    out.write_to(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "29360128\n-5");
}

#[test]
fn forward_and_backward_references() {
    let src = "\
\tlw 0 1 count
\tlw 0 2 neg1
loop beq 1 0 done
\tadd 1 2 1
\tadd 3 3 3
\tbeq 0 0 loop
done halt
count .fill 4
neg1 .fill -1
addr .fill loop
";
    let out = asm(src).unwrap();
    assert_eq!(out.symbols.get("loop"), Some(2));
    // beq 0 0 loop at address 5 => 2 - 6
    assert_eq!(out.words[5], Emitted::Word((4 << 22) | 0xFFFC));
    // beq 1 0 done at address 2 => 6 - 3
    assert_eq!(out.words[2], Emitted::Word((4 << 22) | (1 << 19) | 3));
    assert_eq!(out.words[0], Emitted::Word((2 << 22) | (1 << 16) | 7));
    assert_eq!(out.words[9], Emitted::Fill(2));

    let (cpu, executed) = simulate(&out.image());
    assert_eq!(cpu.reg[1], 0);
    assert_eq!(cpu.reg[2], -1);
    // 2 loads, 4 iterations of 4, final beq, halt
    assert_eq!(executed, 2 + 4 * 4 + 2);
}

#[test]
fn multiply_by_repeated_addition() {
    let src = "\
\tlw 0 1 mcand
\tlw 0 2 mplier
\tlw 0 4 neg1
loop beq 2 0 end
\tadd 3 1 3
\tadd 2 4 2
\tbeq 0 0 loop
end sw 0 3 result
\thalt
mcand .fill 32766
mplier .fill 3
neg1 .fill -1
result .fill 0
";
    let out = asm(src).unwrap();
    let mut mem = WordMemory::new(64);
    mem.load_image(&out.image()).unwrap();
    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.run(&mut mem, &Lc2kDecoder::new(), &IntExecutor, |_, _| {})
        .unwrap();
    assert_eq!(cpu.reg[3], 98298);
    assert_eq!(mem.words[out.symbols.get("result").unwrap() as usize], 98298);
}

#[test]
fn disassembly_reassembles_to_same_words() {
    let out = asm(SKIP).unwrap();
    let dec = Lc2kDecoder::new();
    let text: String = out
        .words
        .iter()
        .map(|w| format!("\t{}\n", fmt_instr(&dec.decode(w.as_word() as u32))))
        .collect();
    let again = asm(&text).unwrap();
    assert_eq!(again.words, out.words);
}

#[test]
fn duplicate_label_anywhere() {
    let err = asm("\tnoop\nx noop\n\thalt\n\tnoop\nx .fill 0\n").unwrap_err();
    assert!(matches!(err, AsmError::DuplicateLabel { line: 5, first: 1, .. }));
    let err = asm("y halt\ny halt\n").unwrap_err();
    assert!(matches!(err, AsmError::DuplicateLabel { line: 2, first: 0, .. }));
}

#[test]
fn duplicate_label_beats_later_encode_errors() {
    // pass 1 completes before anything is encoded
    let err = asm("\tbogus\nz noop\nz noop\n").unwrap_err();
    assert!(matches!(err, AsmError::DuplicateLabel { .. }));
}

#[test]
fn first_encode_error_aborts() {
    let err = asm("\tnoop\n\tlw 0 1 missing\n\tmul 1 2 3\n").unwrap_err();
    assert_eq!(
        err,
        AsmError::UndefinedLabel {
            line: 2,
            position: 2,
            label: "missing".into()
        }
    );
}

#[test]
fn line_too_long_is_fatal() {
    let cfg = AsmConfig {
        max_line_length: 16,
        ..AsmConfig::default()
    };
    let src = "\tnoop\n\tadd 1 2 3   # way too long\n";
    let err = assemble(src, &cfg).unwrap_err();
    assert_eq!(err, AsmError::LineTooLong { line: 2, max: 16 });
}

#[test]
fn error_messages_name_the_offender() {
    let err = asm("\tbeq 0 0 99999\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 1: arg2 value 99999 out of range for beq"
    );
    let err = asm("\tjump 0 0\n").unwrap_err();
    assert_eq!(err.to_string(), "line 1: unrecognized opcode \"jump\"");
}
