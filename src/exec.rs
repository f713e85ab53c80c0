use crate::cpu::{Cpu, Trap};
use crate::decoder::{Instr, Opcode};
use crate::memory::Bus;

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Instr) -> Result<(), Trap>;
}

/// Opcodes whose handler leaves pc at its final value for the cycle.
/// Keyed on opcode alone: a not-taken BEQ still owns its pc update.
pub fn handler_sets_pc(op: Opcode) -> bool {
    matches!(op, Opcode::Beq | Opcode::Jalr)
}

fn effective_addr(cpu: &Cpu, reg_a: u8, offset: i16) -> u32 {
    cpu.reg[reg_a as usize].wrapping_add(offset as i32) as u32
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Instr) -> Result<(), Trap> {
        let pc = cpu.pc;
        match d {
            Instr::R { op: Opcode::Add, reg_a, reg_b, dest } => {
                cpu.reg[dest as usize] =
                    cpu.reg[reg_a as usize].wrapping_add(cpu.reg[reg_b as usize]);
            }
            Instr::R { op: Opcode::Nor, reg_a, reg_b, dest } => {
                cpu.reg[dest as usize] = !(cpu.reg[reg_a as usize] | cpu.reg[reg_b as usize]);
            }
            Instr::I { op: Opcode::Lw, reg_a, reg_b, offset } => {
                let addr = effective_addr(cpu, reg_a, offset);
                let val = bus
                    .read_word(addr)
                    .map_err(|source| Trap::Bus { pc, source })?;
                cpu.reg[reg_b as usize] = val;
            }
            Instr::I { op: Opcode::Sw, reg_a, reg_b, offset } => {
                let addr = effective_addr(cpu, reg_a, offset);
                bus.write_word(addr, cpu.reg[reg_b as usize])
                    .map_err(|source| Trap::Bus { pc, source })?;
            }
            Instr::I { op: Opcode::Beq, reg_a, reg_b, offset } => {
                let next = pc.wrapping_add(1);
                cpu.pc = if cpu.reg[reg_a as usize] == cpu.reg[reg_b as usize] {
                    next.wrapping_add(offset as i32 as u32)
                } else {
                    next
                };
            }
            Instr::J { op: Opcode::Jalr, reg_a, reg_b } => {
                // Link first: with regA == regB the jump lands on pc + 1.
                cpu.reg[reg_b as usize] = pc.wrapping_add(1) as i32;
                cpu.pc = cpu.reg[reg_a as usize] as u32;
            }
            Instr::O { op: Opcode::Halt } | Instr::O { op: Opcode::Noop } => {}
            // Only reachable for a hand-built Instr; the decoder never pairs an
            // opcode with another opcode's format.
            _ => return Err(Trap::InvalidInstruction { pc }),
        }
        Ok(())
    }
}
