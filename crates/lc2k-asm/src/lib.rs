pub mod assemble;
pub mod encode;
pub mod error;
pub mod source;
pub mod symbols;

pub use assemble::{assemble, Assembly};
pub use encode::Emitted;
pub use error::AsmError;
pub use symbols::{Symbol, SymbolTable};

#[derive(Debug, Clone, Copy)]
pub struct AsmConfig {
    /// Line buffer size, newline included.
    pub max_line_length: usize,
    pub max_labels: usize,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            max_line_length: 1000,
            max_labels: 1024,
        }
    }
}
