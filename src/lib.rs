pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod instructions;
pub mod loader;
pub mod memory;
pub mod state;

pub mod isa {
    pub mod lc2k;
}

pub use cpu::{Cpu, CpuConfig, RunSummary, Step, Trap};
pub use decoder::{Format, Instr, Opcode};
pub use memory::{Bus, WordMemory};
pub use state::MachineState;
