use crate::decoder::Instr;
use crate::instructions::mnemonic;

/// Renders a decoded word in assembler syntax.
pub fn fmt_instr(d: &Instr) -> String {
    let mn = mnemonic(d.op());
    match *d {
        Instr::R { reg_a, reg_b, dest, .. } => format!("{mn} {reg_a} {reg_b} {dest}"),
        Instr::I { reg_a, reg_b, offset, .. } => format!("{mn} {reg_a} {reg_b} {offset}"),
        Instr::J { reg_a, reg_b, .. } => format!("{mn} {reg_a} {reg_b}"),
        Instr::O { .. } => mn.to_string(),
    }
}
