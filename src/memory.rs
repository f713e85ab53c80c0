use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {addr} outside memory of {capacity} words")]
    OutOfBounds { addr: u32, capacity: usize },
    #[error("image of {words} words does not fit in memory of {capacity} words")]
    ImageTooLarge { words: usize, capacity: usize },
}

/// Word-addressed memory as seen by the core.
pub trait Bus {
    fn read_word(&mut self, addr: u32) -> Result<i32, MemoryError>;
    fn write_word(&mut self, addr: u32, val: i32) -> Result<(), MemoryError>;
}

/// Flat, fixed-capacity word memory holding both code and data.
#[derive(Clone, Serialize, Deserialize)]
pub struct WordMemory {
    pub words: Vec<i32>,
    /// Number of words covered by the state report: the loaded image, widened
    /// by any store above it.
    pub used: usize,
}

impl WordMemory {
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; size],
            used: 0,
        }
    }

    /// Copies `image` to address 0 onward.
    pub fn load_image(&mut self, image: &[i32]) -> Result<(), MemoryError> {
        if image.len() > self.words.len() {
            return Err(MemoryError::ImageTooLarge {
                words: image.len(),
                capacity: self.words.len(),
            });
        }
        self.words[..image.len()].copy_from_slice(image);
        self.used = self.used.max(image.len());
        Ok(())
    }

    pub fn used_words(&self) -> &[i32] {
        &self.words[..self.used]
    }

    fn index(&self, addr: u32) -> Result<usize, MemoryError> {
        let idx = addr as usize;
        if idx < self.words.len() {
            Ok(idx)
        } else {
            Err(MemoryError::OutOfBounds {
                addr,
                capacity: self.words.len(),
            })
        }
    }
}

impl Bus for WordMemory {
    fn read_word(&mut self, addr: u32) -> Result<i32, MemoryError> {
        let idx = self.index(addr)?;
        Ok(self.words[idx])
    }

    fn write_word(&mut self, addr: u32, val: i32) -> Result<(), MemoryError> {
        let idx = self.index(addr)?;
        self.words[idx] = val;
        self.used = self.used.max(idx + 1);
        Ok(())
    }
}
