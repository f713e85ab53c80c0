use crate::decoder::{Format, Opcode};

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
    pub format: Format,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Opcode::Add,
        mnemonic: "add",
        format: Format::R,
    },
    InstrDesc {
        op: Opcode::Nor,
        mnemonic: "nor",
        format: Format::R,
    },
    InstrDesc {
        op: Opcode::Lw,
        mnemonic: "lw",
        format: Format::I,
    },
    InstrDesc {
        op: Opcode::Sw,
        mnemonic: "sw",
        format: Format::I,
    },
    InstrDesc {
        op: Opcode::Beq,
        mnemonic: "beq",
        format: Format::I,
    },
    InstrDesc {
        op: Opcode::Jalr,
        mnemonic: "jalr",
        format: Format::J,
    },
    InstrDesc {
        op: Opcode::Halt,
        mnemonic: "halt",
        format: Format::O,
    },
    InstrDesc {
        op: Opcode::Noop,
        mnemonic: "noop",
        format: Format::O,
    },
];

/// Directive emitting a raw data word instead of an instruction.
pub const FILL: &str = ".fill";

/// Case-sensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

pub fn mnemonic(op: Opcode) -> &'static str {
    TABLE[op as usize].mnemonic
}
