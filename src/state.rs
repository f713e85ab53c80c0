use std::fmt;

use serde::Serialize;

use crate::cpu::Cpu;
use crate::isa::lc2k::NUM_REGS;
use crate::memory::WordMemory;

/// Diagnostic snapshot of the whole machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineState {
    pub pc: u32,
    pub memory: Vec<i32>,
    pub registers: [i32; NUM_REGS],
}

impl MachineState {
    pub fn capture(cpu: &Cpu, mem: &WordMemory) -> Self {
        Self {
            pc: cpu.pc,
            memory: mem.used_words().to_vec(),
            registers: cpu.reg,
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n@@@\nstate:")?;
        writeln!(f, "\tpc {}", self.pc)?;
        writeln!(f, "\tmemory:")?;
        for (i, v) in self.memory.iter().enumerate() {
            writeln!(f, "\t\tmem[ {i} ] {v}")?;
        }
        writeln!(f, "\tregisters:")?;
        for (i, v) in self.registers.iter().enumerate() {
            writeln!(f, "\t\treg[ {i} ] {v}")?;
        }
        write!(f, "end state")
    }
}
