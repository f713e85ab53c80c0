use std::io::{self, Write};

use tracing::{debug, debug_span};

use crate::encode::{encode_line, Emitted};
use crate::error::AsmError;
use crate::source::{lines, parse_line};
use crate::symbols::SymbolTable;
use crate::AsmConfig;

#[derive(Debug, Clone)]
pub struct Assembly {
    /// One entry per source line, in source order.
    pub words: Vec<Emitted>,
    pub symbols: SymbolTable,
}

/// Two passes over `src`: pass 1 freezes the symbol table, pass 2 re-reads
/// the source from the start and encodes every line against it.
pub fn assemble(src: &str, cfg: &AsmConfig) -> Result<Assembly, AsmError> {
    let symbols = {
        let _pass = debug_span!("pass1").entered();
        SymbolTable::build(src, cfg)?
    };
    debug!(labels = symbols.len(), "pass 1 complete");

    let _pass = debug_span!("pass2").entered();
    let mut words = Vec::new();
    for line in lines(src, cfg.max_line_length) {
        let line = line?;
        let parsed = parse_line(line.text);
        words.push(encode_line(&parsed, line.addr, line.number, &symbols)?);
    }
    debug!(words = words.len(), "pass 2 complete");
    Ok(Assembly { words, symbols })
}

impl Assembly {
    /// Memory image as the simulator loads it.
    pub fn image(&self) -> Vec<i32> {
        self.words.iter().map(|w| w.as_word()).collect()
    }

    /// One decimal value per line, no newline after the last.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\n")?;
            }
            write!(out, "{w}")?;
        }
        out.flush()
    }

    pub fn render(&self) -> String {
        self.words
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
