//! Fatal conditions raised by the interpreter core.

use std::io;

/// Errors surfaced synchronously by [`crate::Processor::step`] and by ROM
/// loading. Every variant indicates a broken ROM or a wrong configuration
/// rather than a transient fault, so the driver is expected to stop the
/// session instead of retrying.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No dispatch level recognised the opcode. Usually means the configured
    /// processor level is too low for the ROM.
    #[error("illegal instruction {opcode:04X} at {address:04X} (is the processor level set correctly?)")]
    IllegalInstruction {
        /// The raw instruction word that failed to decode.
        opcode: u16,
        /// Address the instruction was fetched from.
        address: u16,
    },

    /// The program counter landed on an odd address while
    /// `allow_misaligned_opcodes` is off.
    #[error("instruction at {address:04X} is not on an aligned address")]
    MisalignedInstruction {
        /// The offending program counter value.
        address: u16,
    },

    /// The ROM does not fit between the load offset and the end of the
    /// configured memory bus.
    #[error("{size} byte ROM at offset {offset:04X} exceeds the {capacity} byte bus (is this an XO-CHIP game?)")]
    RomTooLarge {
        /// ROM size in bytes, after any header has been stripped.
        size: usize,
        /// Load offset the ROM was destined for.
        offset: u16,
        /// Total length of the memory bus.
        capacity: usize,
    },

    /// The ROM file could not be read.
    #[error("failed to read ROM: {0}")]
    Io(#[from] io::Error),
}
