//! Machine-code files: one decimal word per line, loaded from address 0.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::memory::{MemoryError, WordMemory};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("can't open file {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error in reading address {addr}: {text:?} is not a decimal word")]
    MalformedMachineWord { addr: usize, text: String },
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Accepts the signed form (`.fill` data) and the unsigned form (instruction
/// words); unsigned values are kept by bit pattern.
pub fn parse_word(text: &str) -> Option<i32> {
    let t = text.trim();
    t.parse::<i32>()
        .ok()
        .or_else(|| t.parse::<u32>().ok().map(|v| v as i32))
}

/// One word per `\n`-terminated line; a final newline does not start a new
/// line. Lines that are not UTF-8 are malformed like any other bad word.
pub fn parse_machine_code(data: impl AsRef<[u8]>) -> Result<Vec<i32>, LoadError> {
    let data = data.as_ref();
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    body.split(|&b| b == b'\n')
        .enumerate()
        .map(|(addr, line)| {
            std::str::from_utf8(line)
                .ok()
                .and_then(parse_word)
                .ok_or_else(|| LoadError::MalformedMachineWord {
                    addr,
                    text: String::from_utf8_lossy(line).into_owned(),
                })
        })
        .collect()
}

/// Parses `data` and copies it into `mem`; returns the number of words loaded.
pub fn load_into(mem: &mut WordMemory, data: impl AsRef<[u8]>) -> Result<usize, LoadError> {
    let image = parse_machine_code(data)?;
    mem.load_image(&image)?;
    debug!(words = image.len(), "loaded machine code");
    Ok(image.len())
}

pub fn load_file(mem: &mut WordMemory, path: &Path) -> Result<usize, LoadError> {
    let data = std::fs::read(path).map_err(|source| {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::FileNotFound { path, source }
        } else {
            LoadError::Io { path, source }
        }
    })?;
    load_into(mem, data)
}
