/// Assembly errors. Each is fatal for the whole run; `line` is 1-based.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unrecognized opcode {opcode:?}")]
    UnrecognizedOpcode { line: usize, opcode: String },
    #[error("line {line}: use of undefined label {label:?} in arg{position}")]
    UndefinedLabel {
        line: usize,
        position: usize,
        label: String,
    },
    #[error("line {line}: not enough arguments for {opcode}")]
    NotEnoughArguments { line: usize, opcode: String },
    #[error("line {line}: invalid arg{position} {value:?} for {opcode}")]
    InvalidArgument {
        line: usize,
        opcode: String,
        position: usize,
        value: String,
    },
    #[error("line {line}: arg{position} value {value} out of range for {opcode}")]
    ArgOverflow {
        line: usize,
        opcode: String,
        position: usize,
        value: String,
    },
    #[error("line {line}: duplicate label {label:?} (already at address {first})")]
    DuplicateLabel {
        line: usize,
        label: String,
        first: u32,
    },
    #[error("line {line}: line too long (limit {max} characters)")]
    LineTooLong { line: usize, max: usize },
    #[error("line {line}: too many labels (limit {max})")]
    TooManyLabels { line: usize, max: usize },
}
