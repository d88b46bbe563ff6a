//! Session configuration: which processor variant to emulate and which of
//! the historical behaviour quirks it should exhibit. A [`Configuration`] is
//! consumed when the processor is built and never changes for the lifetime
//! of the session.

/// The interpreter family a session emulates. Later levels layer extra
/// instructions over the earlier ones.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessorLevel {
    /// The base COSMAC VIP instruction set.
    #[default]
    Chip8,
    /// Super-CHIP 1.1: high resolution, scrolling, calculator registers.
    SuperChip,
    /// XO-CHIP: a second display plane, 64 KiB addressing, audio patterns.
    XoChip,
}

/// Quirk and sizing record for one emulation session.
///
/// The defaults describe a plain CHIP-8 machine. Note that the three
/// `chip8_*` flags default to `false`, which selects Super-CHIP-style shift,
/// indexed-jump and save/load semantics even at the [`ProcessorLevel::Chip8`]
/// level; set them to `true` to restore the original VIP behaviour.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Which instruction-set tier to dispatch through.
    pub processor_level: ProcessorLevel,

    /// Allow the program counter to rest on odd addresses. When `false`,
    /// fetching from an odd address is a fatal error.
    pub allow_misaligned_opcodes: bool,

    /// Whether the driver should lock presentation to the display refresh.
    /// Consumed by the driver only.
    pub vsync_locked: bool,

    /// Timer tick and frame rate, in Hz. Consumed by the driver only.
    pub frames_per_second: u32,

    /// Instructions the driver should execute per frame.
    pub cycles_per_frame: u32,

    /// Address execution starts from after initialisation.
    pub start_address: u16,

    /// Address ROM images are loaded at.
    pub load_address: u16,

    /// Length of the memory bus in bytes.
    pub memory_size: usize,

    /// Number of display planes to allocate.
    pub graphic_planes: usize,

    /// When `true`, sprite pixels outside the display are dropped; when
    /// `false`, they wrap round by modulo.
    pub graphics_clip: bool,

    /// Count sprite rows that fall outside the pixel buffer as collisions.
    pub graphics_count_exceeded_rows: bool,

    /// Report the number of colliding sprite rows in VF rather than a 0/1
    /// collision flag.
    pub graphics_count_row_hits: bool,

    /// Shift Vy into Vx for 8XY6/8XYE instead of shifting Vx in place.
    pub chip8_shifts: bool,

    /// Have FX55/FX65 advance I as they copy, from the start of the session.
    pub chip8_load_and_save: bool,

    /// Have BNNN jump relative to V0 rather than the register named by the
    /// address's top nibble.
    pub chip8_indexed_jumps: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            processor_level: ProcessorLevel::Chip8,
            allow_misaligned_opcodes: false,
            vsync_locked: true,
            frames_per_second: 60,
            cycles_per_frame: 13,
            start_address: 0x200,
            load_address: 0x200,
            memory_size: 4096,
            graphic_planes: 1,
            graphics_clip: true,
            graphics_count_exceeded_rows: false,
            graphics_count_row_hits: false,
            chip8_shifts: false,
            chip8_load_and_save: false,
            chip8_indexed_jumps: false,
        }
    }
}

impl Configuration {
    /// A Super-CHIP machine: faster, and collisions are enumerated per
    /// sprite row, including rows pushed past the end of the buffer.
    #[must_use]
    pub fn super_chip() -> Self {
        Self {
            processor_level: ProcessorLevel::SuperChip,
            cycles_per_frame: 22,
            graphics_count_exceeded_rows: true,
            graphics_count_row_hits: true,
            ..Self::default()
        }
    }

    /// An XO-CHIP machine: a Super-CHIP with 64 KiB of memory and a second
    /// display plane.
    #[must_use]
    pub fn xo_chip() -> Self {
        Self {
            processor_level: ProcessorLevel::XoChip,
            memory_size: 0x10000,
            graphic_planes: 2,
            ..Self::super_chip()
        }
    }
}
