use serde::{Deserialize, Serialize};

/// Layout of the low 25 bits of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// opcode, regA, regB, 13 unused bits, destReg
    R,
    /// opcode, regA, regB, signed 16-bit offset
    I,
    /// opcode, regA, regB, 16 unused bits
    J,
    /// opcode only
    O,
}

/// The 3-bit opcode field. All eight encodings are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Add = 0,
    Nor = 1,
    Lw = 2,
    Sw = 3,
    Beq = 4,
    Jalr = 5,
    Halt = 6,
    Noop = 7,
}

impl Opcode {
    /// Total over the 3-bit field; higher bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0 => Opcode::Add,
            1 => Opcode::Nor,
            2 => Opcode::Lw,
            3 => Opcode::Sw,
            4 => Opcode::Beq,
            5 => Opcode::Jalr,
            6 => Opcode::Halt,
            _ => Opcode::Noop,
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn format(self) -> Format {
        match self {
            Opcode::Add | Opcode::Nor => Format::R,
            Opcode::Lw | Opcode::Sw | Opcode::Beq => Format::I,
            Opcode::Jalr => Format::J,
            Opcode::Halt | Opcode::Noop => Format::O,
        }
    }
}

/// A decoded instruction word, one variant per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instr {
    R { op: Opcode, reg_a: u8, reg_b: u8, dest: u8 },
    I { op: Opcode, reg_a: u8, reg_b: u8, offset: i16 },
    J { op: Opcode, reg_a: u8, reg_b: u8 },
    O { op: Opcode },
}

impl Instr {
    pub fn op(&self) -> Opcode {
        match *self {
            Instr::R { op, .. } | Instr::I { op, .. } | Instr::J { op, .. } | Instr::O { op } => op,
        }
    }
}

pub trait Decoder {
    /// Decoding cannot fail: every opcode value selects exactly one format.
    fn decode(&self, raw32: u32) -> Instr;
}
