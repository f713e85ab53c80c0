use crate::decoder::{Decoder, Format, Instr, Opcode};

// Field positions within the 32-bit word. Bits [31:25] are always zero.
pub const OPCODE_SHIFT: u32 = 22;
pub const REG_A_SHIFT: u32 = 19;
pub const REG_B_SHIFT: u32 = 16;
pub const DEST_SHIFT: u32 = 0;

pub const OPCODE_MASK: u32 = 0b111;
pub const REG_MASK: u32 = 0b111;
pub const OFFSET_MASK: u32 = 0xFFFF;

pub const NUM_REGS: usize = 8;

/// Signed range of the I-format offset field.
pub const OFFSET_MIN: i64 = i16::MIN as i64;
pub const OFFSET_MAX: i64 = i16::MAX as i64;

/// LC-2K decoder: shift-and-mask unpacking of the four formats.
pub struct Lc2kDecoder;

impl Lc2kDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Lc2kDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for Lc2kDecoder {
    fn decode(&self, raw32: u32) -> Instr {
        unpack(raw32)
    }
}

fn reg(raw32: u32, shift: u32) -> u8 {
    ((raw32 >> shift) & REG_MASK) as u8
}

pub fn unpack(raw32: u32) -> Instr {
    let op = Opcode::from_bits(raw32 >> OPCODE_SHIFT);
    let reg_a = reg(raw32, REG_A_SHIFT);
    let reg_b = reg(raw32, REG_B_SHIFT);
    match op.format() {
        Format::R => Instr::R { op, reg_a, reg_b, dest: reg(raw32, DEST_SHIFT) },
        Format::I => Instr::I { op, reg_a, reg_b, offset: (raw32 & OFFSET_MASK) as u16 as i16 },
        Format::J => Instr::J { op, reg_a, reg_b },
        Format::O => Instr::O { op },
    }
}

/// Packs an instruction; every bit not owned by the active format is zero.
pub fn pack(instr: &Instr) -> u32 {
    let opcode = (instr.op().bits() & OPCODE_MASK) << OPCODE_SHIFT;
    let regs = |a: u8, b: u8| {
        ((a as u32 & REG_MASK) << REG_A_SHIFT) | ((b as u32 & REG_MASK) << REG_B_SHIFT)
    };
    match *instr {
        Instr::R { reg_a, reg_b, dest, .. } => {
            opcode | regs(reg_a, reg_b) | ((dest as u32 & REG_MASK) << DEST_SHIFT)
        }
        Instr::I { reg_a, reg_b, offset, .. } => {
            opcode | regs(reg_a, reg_b) | (offset as u16 as u32 & OFFSET_MASK)
        }
        Instr::J { reg_a, reg_b, .. } => opcode | regs(reg_a, reg_b),
        Instr::O { .. } => opcode,
    }
}

impl Instr {
    pub fn encode(&self) -> u32 {
        pack(self)
    }
}
