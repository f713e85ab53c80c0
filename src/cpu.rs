use crate::decoder::{Decoder, Opcode};
use crate::disasm::fmt_instr;
use crate::exec::{handler_sets_pc, Executor};
use crate::isa::lc2k::NUM_REGS;
use crate::memory::{Bus, MemoryError};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpuConfig {
    pub memory_words: usize,
    /// Stop after this many instructions even without a HALT. `None` runs until HALT.
    pub max_steps: Option<u64>,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            memory_words: 65536,
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: u32,
    /// General purpose registers; r0 is not hardwired to zero.
    pub reg: [i32; NUM_REGS],
    pub cfg: CpuConfig,
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Invalid instruction at pc {pc}")]
    InvalidInstruction { pc: u32 },
    #[error("Bus error at pc {pc}: {source}")]
    Bus {
        pc: u32,
        #[source]
        source: MemoryError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub instructions: u64,
    pub halted: bool,
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            pc: 0,
            reg: [0; NUM_REGS],
            cfg,
        }
    }

    pub fn reset(&mut self, reset_pc: u32) {
        self.pc = reset_pc;
    }

    /// One fetch-decode-execute cycle.
    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<Step, Trap> {
        let pc = self.pc;
        let raw = bus
            .read_word(pc)
            .map_err(|source| Trap::Bus { pc, source })?;
        let d = dec.decode(raw as u32);
        trace!(pc, "{}", fmt_instr(&d));
        exec.exec(self, bus, d)?;
        if !handler_sets_pc(d.op()) {
            self.pc = pc.wrapping_add(1);
        }
        Ok(if d.op() == Opcode::Halt {
            Step::Halted
        } else {
            Step::Continue
        })
    }

    /// Steps until HALT (or the configured step cap), calling `observe`
    /// before every cycle.
    pub fn run<B, D, X, F>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
        mut observe: F,
    ) -> Result<RunSummary, Trap>
    where
        B: Bus,
        D: Decoder,
        X: Executor,
        F: FnMut(&Cpu, &B),
    {
        let mut instructions = 0u64;
        loop {
            if self.cfg.max_steps.is_some_and(|cap| instructions >= cap) {
                debug!(instructions, "step cap reached");
                return Ok(RunSummary {
                    instructions,
                    halted: false,
                });
            }
            observe(self, bus);
            let step = self.step(bus, dec, exec)?;
            instructions += 1;
            if step == Step::Halted {
                debug!(instructions, pc = self.pc, "halted");
                return Ok(RunSummary {
                    instructions,
                    halted: true,
                });
            }
        }
    }
}
