//! The `memory` module provides the flat byte-addressable bus shared by the
//! processor and the display engine. Words are stored big-endian, matching
//! the instruction encoding. The bus length is fixed at construction (4 KiB
//! for CHIP-8 and Super-CHIP, 64 KiB for XO-CHIP); addressing past the end
//! is a programming error and panics rather than wrapping.

use std::fs;
use std::ops::{Index, IndexMut};
use std::path::Path;

use crate::error::Error;

/// Signature some HP48 transfer tools prepend to Super-CHIP images.
const HP48_SIGNATURE: &[u8; 8] = b"HPHP48-A";

/// Full length of that legacy header.
const HP48_HEADER_LENGTH: usize = 13;

/// The memory bus. Owned exclusively by the processor for the lifetime of a
/// session.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zeroed bus of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Length of the bus in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The whole bus as a byte slice.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the whole bus.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[must_use]
    pub fn get(&self, address: usize) -> u8 {
        self.bytes[address]
    }

    pub fn set(&mut self, address: usize, value: u8) {
        self.bytes[address] = value;
    }

    /// Reads the big-endian word at `address`.
    #[must_use]
    pub fn word(&self, address: usize) -> u16 {
        (u16::from(self.get(address)) << 8) | u16::from(self.get(address + 1))
    }

    /// Stores `value` big-endian at `address`.
    pub fn set_word(&mut self, address: usize, value: u16) {
        self.set(address, (value >> 8) as u8);
        self.set(address + 1, (value & 0xff) as u8);
    }

    /// Zero-fills the bus.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Reads a ROM image from `path` and copies it onto the bus at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::RomTooLarge`] if the image does not fit the bus.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P, offset: u16) -> Result<(), Error> {
        let data = fs::read(path)?;
        self.load_rom_bytes(&data, offset)
    }

    /// Copies a ROM image onto the bus at `offset`, stripping the legacy
    /// HP48 header when present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RomTooLarge`] if the image does not fit the bus.
    pub fn load_rom_bytes(&mut self, data: &[u8], offset: u16) -> Result<(), Error> {
        let hp48 = data.len() >= HP48_HEADER_LENGTH && data.starts_with(HP48_SIGNATURE);
        let body = if hp48 {
            &data[HP48_HEADER_LENGTH..]
        } else {
            data
        };

        let destination = usize::from(offset);
        if destination + body.len() > self.bytes.len() {
            return Err(Error::RomTooLarge {
                size: body.len(),
                offset,
                capacity: self.bytes.len(),
            });
        }

        self.bytes[destination..destination + body.len()].copy_from_slice(body);
        Ok(())
    }
}

impl Index<usize> for Memory {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bytes[index]
    }
}

impl IndexMut<usize> for Memory {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bytes[index]
    }
}
