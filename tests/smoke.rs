use lc2k_rs::exec::IntExecutor;
use lc2k_rs::isa::lc2k::Lc2kDecoder;
use lc2k_rs::{Cpu, CpuConfig, Instr, Opcode, Step, WordMemory};
use pretty_assertions::assert_eq;

fn word(i: Instr) -> i32 {
    i.encode() as i32
}

#[test]
fn add_beq_skip_noop_halt() {
    // start add 0 0 1
    //       beq 0 1 end
    //       noop
    // end   halt
    let image = [
        word(Instr::R { op: Opcode::Add, reg_a: 0, reg_b: 0, dest: 1 }),
        word(Instr::I { op: Opcode::Beq, reg_a: 0, reg_b: 1, offset: 1 }),
        word(Instr::O { op: Opcode::Noop }),
        word(Instr::O { op: Opcode::Halt }),
    ];
    let mut mem = WordMemory::new(64);
    mem.load_image(&image).unwrap();

    let mut cpu = Cpu::new(CpuConfig::default());
    cpu.reset(0);
    let dec = Lc2kDecoder::new();
    let exec = IntExecutor;

    let mut pcs = Vec::new();
    let summary = cpu
        .run(&mut mem, &dec, &exec, |cpu, _| pcs.push(cpu.pc))
        .unwrap();
    assert!(summary.halted);
    assert_eq!(summary.instructions, 3);
    assert_eq!(pcs, vec![0, 1, 3]);
    assert_eq!(cpu.pc, 4);
    assert_eq!(cpu.reg, [0; 8]);
}

#[test]
fn halt_step_reports_halted_and_advances_pc() {
    let mut mem = WordMemory::new(4);
    mem.load_image(&[word(Instr::O { op: Opcode::Halt })]).unwrap();
    let mut cpu = Cpu::new(CpuConfig::default());
    let step = cpu.step(&mut mem, &Lc2kDecoder::new(), &IntExecutor).unwrap();
    assert_eq!(step, Step::Halted);
    assert_eq!(cpu.pc, 1);
}

#[test]
fn step_cap_stops_endless_loop() {
    // beq 0 0 -1 spins on itself
    let mut mem = WordMemory::new(4);
    mem.load_image(&[word(Instr::I { op: Opcode::Beq, reg_a: 0, reg_b: 0, offset: -1 })])
        .unwrap();
    let mut cpu = Cpu::new(CpuConfig {
        max_steps: Some(25),
        ..CpuConfig::default()
    });
    let summary = cpu
        .run(&mut mem, &Lc2kDecoder::new(), &IntExecutor, |_, _| {})
        .unwrap();
    assert!(!summary.halted);
    assert_eq!(summary.instructions, 25);
    assert_eq!(cpu.pc, 0);
}
