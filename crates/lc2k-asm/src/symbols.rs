use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AsmError;
use crate::source::{lines, parse_line};
use crate::AsmConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub addr: u32,
    pub name: String,
}

/// Label name to address. Filled by pass 1, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    addrs: HashMap<String, u32>,
    max: usize,
}

impl SymbolTable {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            addrs: HashMap::with_capacity(max),
            max,
        }
    }

    /// Pass 1: every line consumes one address; labelled lines are recorded.
    pub fn build(src: &str, cfg: &AsmConfig) -> Result<Self, AsmError> {
        let mut table = Self::with_capacity(cfg.max_labels);
        for line in lines(src, cfg.max_line_length) {
            let line = line?;
            if let Some(label) = parse_line(line.text).label {
                table.insert(label, line.addr, line.number)?;
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, label: &str, addr: u32, line: usize) -> Result<(), AsmError> {
        if let Some(&first) = self.addrs.get(label) {
            return Err(AsmError::DuplicateLabel {
                line,
                label: label.to_string(),
                first,
            });
        }
        if self.addrs.len() >= self.max {
            return Err(AsmError::TooManyLabels {
                line,
                max: self.max,
            });
        }
        debug!(label, addr, "label");
        self.addrs.insert(label.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.addrs.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// All labels ordered by address.
    pub fn export(&self) -> Vec<Symbol> {
        let mut out: Vec<Symbol> = self
            .addrs
            .iter()
            .map(|(name, &addr)| Symbol {
                addr,
                name: name.clone(),
            })
            .collect();
        out.sort_by_key(|s| s.addr);
        out
    }
}
