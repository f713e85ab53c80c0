use std::fmt;

use lc2k_rs::instructions::{lookup, FILL};
use lc2k_rs::isa::lc2k::{NUM_REGS, OFFSET_MAX, OFFSET_MIN};
use lc2k_rs::{Format, Instr, Opcode};

use crate::error::AsmError;
use crate::source::ParsedLine;
use crate::symbols::SymbolTable;

/// One output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// Encoded instruction, written unsigned.
    Word(u32),
    /// `.fill` data, written signed.
    Fill(i32),
}

impl Emitted {
    /// The value as it is stored in a memory word.
    pub fn as_word(self) -> i32 {
        match self {
            Emitted::Word(w) => w as i32,
            Emitted::Fill(v) => v,
        }
    }
}

impl fmt::Display for Emitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emitted::Word(w) => write!(f, "{w}"),
            Emitted::Fill(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Number(i64),
    /// Decimal syntax, but too large for any field.
    Oversized(&'a str),
    Label(&'a str),
}

fn is_decimal(token: &str) -> bool {
    let digits = token
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl<'a> Operand<'a> {
    /// An optionally signed run of decimal digits is a number; anything else
    /// names a label.
    pub fn classify(token: &'a str) -> Self {
        if !is_decimal(token) {
            return Operand::Label(token);
        }
        match token.parse::<i64>() {
            Ok(n) => Operand::Number(n),
            Err(_) => Operand::Oversized(token),
        }
    }
}

struct Ctx<'a, 's> {
    line: usize,
    addr: u32,
    opcode: &'a str,
    args: [Option<&'a str>; 3],
    symbols: &'s SymbolTable,
}

impl<'a> Ctx<'a, '_> {
    fn require(&self, count: usize) -> Result<(), AsmError> {
        if self.args[..count].iter().any(Option::is_none) {
            return Err(AsmError::NotEnoughArguments {
                line: self.line,
                opcode: self.opcode.to_string(),
            });
        }
        Ok(())
    }

    fn arg(&self, position: usize) -> &'a str {
        self.args[position].unwrap_or_default()
    }

    fn register(&self, position: usize) -> Result<u8, AsmError> {
        let token = self.arg(position);
        match Operand::classify(token) {
            Operand::Number(n) if (0..NUM_REGS as i64).contains(&n) => Ok(n as u8),
            _ => Err(AsmError::InvalidArgument {
                line: self.line,
                opcode: self.opcode.to_string(),
                position,
                value: token.to_string(),
            }),
        }
    }

    fn overflow(&self, position: usize, value: impl ToString) -> AsmError {
        AsmError::ArgOverflow {
            line: self.line,
            opcode: self.opcode.to_string(),
            position,
            value: value.to_string(),
        }
    }

    fn resolve(&self, position: usize, label: &str) -> Result<u32, AsmError> {
        self.symbols
            .get(label)
            .ok_or_else(|| AsmError::UndefinedLabel {
                line: self.line,
                position,
                label: label.to_string(),
            })
    }

    /// I-format offset field. Numbers are used verbatim; labels become an
    /// absolute address, or for BEQ a displacement from the next instruction.
    fn offset(&self, op: Opcode, position: usize) -> Result<i16, AsmError> {
        let value = match Operand::classify(self.arg(position)) {
            Operand::Number(n) => n,
            Operand::Oversized(token) => return Err(self.overflow(position, token)),
            Operand::Label(label) => {
                let target = self.resolve(position, label)? as i64;
                if op == Opcode::Beq {
                    target - (self.addr as i64 + 1)
                } else {
                    target
                }
            }
        };
        if !(OFFSET_MIN..=OFFSET_MAX).contains(&value) {
            return Err(self.overflow(position, value));
        }
        Ok(value as i16)
    }

    fn fill(&self) -> Result<Emitted, AsmError> {
        self.require(1)?;
        match Operand::classify(self.arg(0)) {
            Operand::Number(n) if (i32::MIN as i64..=u32::MAX as i64).contains(&n) => {
                Ok(Emitted::Fill(n as u32 as i32))
            }
            Operand::Number(n) => Err(self.overflow(0, n)),
            Operand::Oversized(token) => Err(self.overflow(0, token)),
            Operand::Label(label) => Ok(Emitted::Fill(self.resolve(0, label)? as i32)),
        }
    }
}

/// Encodes one parsed line sitting at `addr`.
///
/// Checks run in a fixed order so the first reported error is stable:
/// opcode, argument count, register syntax, offset range, label lookup.
pub fn encode_line(
    parsed: &ParsedLine<'_>,
    addr: u32,
    line: usize,
    symbols: &SymbolTable,
) -> Result<Emitted, AsmError> {
    let opcode = parsed.opcode.unwrap_or_default();
    let ctx = Ctx {
        line,
        addr,
        opcode,
        args: parsed.args,
        symbols,
    };
    if opcode == FILL {
        return ctx.fill();
    }
    let desc = lookup(opcode).ok_or_else(|| AsmError::UnrecognizedOpcode {
        line,
        opcode: opcode.to_string(),
    })?;
    let op = desc.op;
    let instr = match desc.format {
        Format::R => {
            ctx.require(3)?;
            Instr::R {
                op,
                reg_a: ctx.register(0)?,
                reg_b: ctx.register(1)?,
                dest: ctx.register(2)?,
            }
        }
        Format::I => {
            ctx.require(3)?;
            let reg_a = ctx.register(0)?;
            let reg_b = ctx.register(1)?;
            Instr::I {
                op,
                reg_a,
                reg_b,
                offset: ctx.offset(op, 2)?,
            }
        }
        Format::J => {
            ctx.require(2)?;
            Instr::J {
                op,
                reg_a: ctx.register(0)?,
                reg_b: ctx.register(1)?,
            }
        }
        Format::O => Instr::O { op },
    };
    Ok(Emitted::Word(instr.encode()))
}
