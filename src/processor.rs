//! The processor: register file, stack, timers, opcode fetch/decode and the
//! base CHIP-8 instruction set. The Super-CHIP and XO-CHIP layers extend the
//! dispatch in their own modules; this module owns the state they all share.
//!
//! A driver runs the machine by calling [`Processor::step`] for each
//! instruction and [`Processor::update_timers`] once per 60 Hz tick. The
//! core never blocks: waiting for a key press is an explicit state that
//! `step` polls until the driver reports a key down.

use std::collections::VecDeque;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::{Configuration, ProcessorLevel};
use crate::error::Error;
use crate::graphics::BitmappedGraphics;
use crate::input::Keyboard;
use crate::memory::Memory;

/// How many executed instructions the trace buffer retains.
const INSTRUCTION_BUFFER_LENGTH: usize = 100;

/// Where the 5-byte hex glyphs live on the bus.
pub const STANDARD_FONT_OFFSET: usize = 0x1b0;

/// Height of a standard font glyph in bytes.
pub const STANDARD_FONT_HEIGHT: usize = 5;

const STANDARD_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Sound timer transitions reported by [`Processor::update_timers`]. The
/// driver starts and stops its tone generator on these.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    /// The sound timer became non-zero: start beeping.
    Started,
    /// The sound timer ran down to zero: stop beeping.
    Stopped,
}

/// One executed instruction, as retained by the trace buffer.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Address the instruction was fetched from.
    pub address: u16,
    /// The raw instruction word.
    pub opcode: u16,
    /// Disassembled form, e.g. `LD V1,0A`.
    pub mnemonic: String,
}

/// The operand fields of the current opcode.
#[derive(Clone, Copy)]
pub(crate) struct Decoded {
    pub(crate) nnn: u16,
    pub(crate) nn: u8,
    pub(crate) n: u8,
    pub(crate) x: usize,
    pub(crate) y: usize,
}

impl Decoded {
    fn new(opcode: u16) -> Self {
        Self {
            nnn: opcode & 0xfff,
            nn: (opcode & 0xff) as u8,
            n: (opcode & 0xf) as u8,
            x: usize::from((opcode >> 8) & 0xf),
            y: usize::from((opcode >> 4) & 0xf),
        }
    }
}

fn seeded_rng() -> StdRng {
    let mut seed = <StdRng as SeedableRng>::Seed::default();
    if getrandom::getrandom(&mut seed).is_err() {
        log::warn!("entropy source unavailable, falling back to a fixed RNG seed");
    }
    StdRng::from_seed(seed)
}

/// The virtual machine: registers, stack, timers, memory, display and key
/// state for one emulation session.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug)]
pub struct Processor {
    pub(crate) configuration: Configuration,
    pub(crate) memory: Memory,
    pub(crate) display: BitmappedGraphics,
    pub(crate) keyboard: Keyboard,

    pub(crate) v: [u8; 16],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) sp: u16,
    pub(crate) stack: [u16; 16],

    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,

    pub(crate) opcode: u16,
    pub(crate) finished: bool,
    pub(crate) sound_playing: bool,
    pub(crate) waiting_for_keypress: Option<usize>,

    // Super-CHIP state.
    pub(crate) calculator_registers: [u8; 8],
    pub(crate) compatibility: bool,

    // XO-CHIP state.
    pub(crate) audio_pattern_buffer: [u8; 16],

    pub(crate) mnemonic: String,
    pub(crate) instructions: VecDeque<Instruction>,

    #[cfg_attr(
        feature = "persistence",
        serde(skip, default = "seeded_rng")
    )]
    rng: StdRng,
}

impl Processor {
    /// Builds a machine sized for `configuration`. Call
    /// [`initialise`](Self::initialise) before stepping.
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        let memory = Memory::new(configuration.memory_size);
        let display = BitmappedGraphics::new(
            configuration.graphic_planes,
            configuration.graphics_clip,
            configuration.graphics_count_exceeded_rows,
            configuration.graphics_count_row_hits,
        );
        Self {
            configuration,
            memory,
            display,
            keyboard: Keyboard::new(),
            v: [0; 16],
            i: 0,
            pc: 0,
            sp: 0,
            stack: [0; 16],
            delay_timer: 0,
            sound_timer: 0,
            opcode: 0,
            finished: false,
            sound_playing: false,
            waiting_for_keypress: None,
            calculator_registers: [0; 8],
            compatibility: false,
            audio_pattern_buffer: [0; 16],
            mnemonic: String::new(),
            instructions: VecDeque::new(),
            rng: seeded_rng(),
        }
    }

    /// Resets the whole session: zeroes registers, stack, timers and memory,
    /// reloads the fonts, reseeds the random source and points the program
    /// counter at the configured start address.
    pub fn initialise(&mut self) {
        self.finished = false;

        self.pc = self.configuration.start_address;
        self.i = 0;
        self.sp = 0;

        self.display.initialise();

        self.stack.fill(0);
        self.v.fill(0);
        self.memory.clear();

        let font = STANDARD_FONT_OFFSET;
        self.memory.bytes_mut()[font..font + STANDARD_FONT.len()].copy_from_slice(&STANDARD_FONT);
        if self.configuration.processor_level >= ProcessorLevel::SuperChip {
            self.load_high_font();
        }

        self.delay_timer = 0;
        self.sound_timer = 0;
        self.sound_playing = false;
        self.waiting_for_keypress = None;

        self.calculator_registers.fill(0);
        self.compatibility = self.configuration.chip8_load_and_save;
        self.audio_pattern_buffer.fill(0);

        self.mnemonic.clear();
        self.instructions.clear();
        self.rng = seeded_rng();
    }

    /// Loads a ROM image from `path` at the configured load address.
    ///
    /// # Errors
    ///
    /// See [`Memory::load_rom`].
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        self.memory.load_rom(path, self.configuration.load_address)
    }

    /// Loads a ROM image from a byte slice at the configured load address.
    ///
    /// # Errors
    ///
    /// See [`Memory::load_rom_bytes`].
    pub fn load_rom_bytes(&mut self, data: &[u8]) -> Result<(), Error> {
        self.memory
            .load_rom_bytes(data, self.configuration.load_address)
    }

    /// Executes one instruction, or polls the pad if the machine is waiting
    /// on a key press.
    ///
    /// # Errors
    ///
    /// Fatal decode conditions: [`Error::IllegalInstruction`] and
    /// [`Error::MisalignedInstruction`]. The session should not be stepped
    /// further after either.
    pub fn step(&mut self) -> Result<(), Error> {
        if self.waiting_for_keypress.is_some() {
            self.wait_for_keypress();
            Ok(())
        } else {
            self.emulate_cycle()
        }
    }

    /// Counts both timers down one tick. The driver calls this at the
    /// configured frame rate, independently of `step`.
    ///
    /// Returns the sound transition the tick produced, if any.
    pub fn update_timers(&mut self) -> Option<SoundEvent> {
        self.update_delay_timer();
        self.update_sound_timer()
    }

    // --- state queries -----------------------------------------------------

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    #[must_use]
    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn registers_mut(&mut self) -> &mut [u8; 16] {
        &mut self.v
    }

    /// The index register I.
    #[must_use]
    pub fn indirector(&self) -> u16 {
        self.i
    }

    pub fn set_indirector(&mut self, value: u16) {
        self.i = value;
    }

    #[must_use]
    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    #[must_use]
    pub fn stack(&self) -> &[u16; 16] {
        &self.stack
    }

    #[must_use]
    pub fn stack_pointer(&self) -> u16 {
        self.sp
    }

    #[must_use]
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    #[must_use]
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[must_use]
    pub fn display(&self) -> &BitmappedGraphics {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut BitmappedGraphics {
        &mut self.display
    }

    #[must_use]
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    /// Forwards a key press or release to the pad.
    pub fn update_key(&mut self, key_code: u8, pressed: bool) {
        self.keyboard.update(key_code, pressed);
    }

    /// Set once the Super-CHIP `EXIT` instruction runs; drivers poll this to
    /// end the session.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn set_finished(&mut self, value: bool) {
        self.finished = value;
    }

    /// Whether the display changed since the flag was last cleared.
    #[must_use]
    pub fn draw_needed(&self) -> bool {
        self.display.dirty()
    }

    pub fn set_draw_needed(&mut self, value: bool) {
        self.display.set_dirty(value);
    }

    /// The register a pending wait-for-key will deliver into, if the
    /// machine is currently suspended.
    #[must_use]
    pub fn waiting_for_keypress(&self) -> Option<usize> {
        self.waiting_for_keypress
    }

    #[must_use]
    pub fn sound_playing(&self) -> bool {
        self.sound_playing
    }

    /// The most recently executed instructions, newest first.
    #[must_use]
    pub fn instructions(&self) -> &VecDeque<Instruction> {
        &self.instructions
    }

    // --- fetch/decode/dispatch ---------------------------------------------

    fn emulate_cycle(&mut self) -> Result<(), Error> {
        if self.pc % 2 == 1 && !self.configuration.allow_misaligned_opcodes {
            return Err(Error::MisalignedInstruction { address: self.pc });
        }

        self.opcode = self.memory.word(usize::from(self.pc));
        let decoded = Decoded::new(self.opcode);

        let program_counter = self.pc;
        self.pc = self.pc.wrapping_add(2);
        self.mnemonic.clear();

        // Outermost variant first; each layer reports whether it recognised
        // the opcode and passes otherwise.
        let handled = match self.configuration.processor_level {
            ProcessorLevel::XoChip => {
                self.execute_xochip(decoded)
                    || self.execute_schip(decoded)
                    || self.execute_chip8(decoded)
            }
            ProcessorLevel::SuperChip => {
                self.execute_schip(decoded) || self.execute_chip8(decoded)
            }
            ProcessorLevel::Chip8 => self.execute_chip8(decoded),
        };

        if !handled {
            log::error!(
                "illegal instruction {:04X} at {program_counter:04X}",
                self.opcode
            );
            return Err(Error::IllegalInstruction {
                opcode: self.opcode,
                address: program_counter,
            });
        }

        self.record_instruction(program_counter);
        Ok(())
    }

    fn record_instruction(&mut self, address: u16) {
        log::trace!("{address:04X}  {:04X}  {}", self.opcode, self.mnemonic);
        self.instructions.push_front(Instruction {
            address,
            opcode: self.opcode,
            mnemonic: self.mnemonic.clone(),
        });
        if self.instructions.len() > INSTRUCTION_BUFFER_LENGTH {
            self.instructions.pop_back();
        }
    }

    fn wait_for_keypress(&mut self) {
        if let Some(register) = self.waiting_for_keypress {
            if let Some(key) = self.keyboard.first_pressed() {
                self.waiting_for_keypress = None;
                self.v[register] = key;
            }
        }
    }

    fn update_delay_timer(&mut self) {
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
    }

    fn update_sound_timer(&mut self) -> Option<SoundEvent> {
        if self.sound_timer > 0 {
            let event = if self.sound_playing {
                None
            } else {
                self.sound_playing = true;
                Some(SoundEvent::Started)
            };
            self.sound_timer -= 1;
            event
        } else if self.sound_playing {
            self.sound_playing = false;
            Some(SoundEvent::Stopped)
        } else {
            None
        }
    }

    fn execute_chip8(&mut self, decoded: Decoded) -> bool {
        let Decoded { nnn, nn, n, x, y } = decoded;
        match self.opcode & 0xf000 {
            0x0000 => match nn {
                0xe0 => self.op_00e0(),
                0xee => self.op_00ee(),
                _ => return false,
            },
            0x1000 => self.op_1nnn(nnn),
            0x2000 => self.op_2nnn(nnn),
            0x3000 => self.op_3xnn(x, nn),
            0x4000 => self.op_4xnn(x, nn),
            0x5000 => self.op_5xy0(x, y),
            0x6000 => self.op_6xnn(x, nn),
            0x7000 => self.op_7xnn(x, nn),
            0x8000 => return self.chip8_family_8(decoded),
            0x9000 => match n {
                0 => self.op_9xy0(x, y),
                _ => return false,
            },
            0xa000 => self.op_annn(nnn),
            0xb000 => self.op_bnnn(nnn),
            0xc000 => self.op_cxnn(x, nn),
            0xd000 => self.op_dxyn(x, y, n),
            0xe000 => match nn {
                0x9e => self.op_ex9e(x),
                0xa1 => self.op_exa1(x),
                _ => return false,
            },
            0xf000 => return self.chip8_family_f(decoded),
            _ => return false,
        }
        true
    }

    fn chip8_family_8(&mut self, decoded: Decoded) -> bool {
        let Decoded { n, x, y, .. } = decoded;
        match n {
            0x0 => self.op_8xy0(x, y),
            0x1 => self.op_8xy1(x, y),
            0x2 => self.op_8xy2(x, y),
            0x3 => self.op_8xy3(x, y),
            0x4 => self.op_8xy4(x, y),
            0x5 => self.op_8xy5(x, y),
            0x6 => self.op_8xy6(x, y),
            0x7 => self.op_8xy7(x, y),
            0xe => self.op_8xye(x, y),
            _ => return false,
        }
        true
    }

    fn chip8_family_f(&mut self, decoded: Decoded) -> bool {
        let Decoded { nn, x, .. } = decoded;
        match nn {
            0x07 => self.op_fx07(x),
            0x0a => self.op_fx0a(x),
            0x15 => self.op_fx15(x),
            0x18 => self.op_fx18(x),
            0x1e => self.op_fx1e(x),
            0x29 => self.op_fx29(x),
            0x33 => self.op_fx33(x),
            0x55 => self.op_fx55(x),
            0x65 => self.op_fx65(x),
            _ => return false,
        }
        true
    }

    // --- base instruction set ----------------------------------------------

    fn op_00e0(&mut self) {
        self.mnemonic = "CLS".into();
        self.display.clear();
    }

    fn op_00ee(&mut self) {
        self.mnemonic = "RET".into();
        self.sp = self.sp.wrapping_sub(1);
        self.pc = self.stack[usize::from(self.sp & 0xf)];
    }

    fn op_1nnn(&mut self, nnn: u16) {
        self.mnemonic = format!("JP {nnn:03X}");
        self.pc = nnn;
    }

    fn op_2nnn(&mut self, nnn: u16) {
        self.mnemonic = format!("CALL {nnn:03X}");
        self.stack[usize::from(self.sp & 0xf)] = self.pc;
        self.sp = self.sp.wrapping_add(1);
        self.pc = nnn;
    }

    fn op_3xnn(&mut self, x: usize, nn: u8) {
        self.mnemonic = format!("SE V{x:X},{nn:02X}");
        if self.v[x] == nn {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_4xnn(&mut self, x: usize, nn: u8) {
        self.mnemonic = format!("SNE V{x:X},{nn:02X}");
        if self.v[x] != nn {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_5xy0(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SE V{x:X},V{y:X}");
        if self.v[x] == self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_6xnn(&mut self, x: usize, nn: u8) {
        self.mnemonic = format!("LD V{x:X},{nn:02X}");
        self.v[x] = nn;
    }

    fn op_7xnn(&mut self, x: usize, nn: u8) {
        self.mnemonic = format!("ADD V{x:X},{nn:02X}");
        self.v[x] = self.v[x].wrapping_add(nn);
    }

    fn op_8xy0(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("LD V{x:X},V{y:X}");
        self.v[x] = self.v[y];
    }

    fn op_8xy1(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("OR V{x:X},V{y:X}");
        self.v[x] |= self.v[y];
    }

    fn op_8xy2(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("AND V{x:X},V{y:X}");
        self.v[x] &= self.v[y];
    }

    fn op_8xy3(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("XOR V{x:X},V{y:X}");
        self.v[x] ^= self.v[y];
    }

    fn op_8xy4(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("ADD V{x:X},V{y:X}");
        // The overflow test runs before the add, against the pre-add VF
        // ordering the original machines exhibit when X or Y is VF itself.
        self.v[0xf] = u8::from(self.v[y] > 0xff - self.v[x]);
        self.v[x] = self.v[x].wrapping_add(self.v[y]);
    }

    fn op_8xy5(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SUB V{x:X},V{y:X}");
        self.v[0xf] = u8::from(self.v[x] >= self.v[y]);
        self.v[x] = self.v[x].wrapping_sub(self.v[y]);
    }

    pub(crate) fn op_8xy6(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SHR V{x:X},V{y:X}");
        self.v[0xf] = self.v[y] & 0x1;
        self.v[y] >>= 1;
        self.v[x] = self.v[y];
    }

    fn op_8xy7(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SUBN V{x:X},V{y:X}");
        self.v[0xf] = u8::from(self.v[x] <= self.v[y]);
        self.v[x] = self.v[y].wrapping_sub(self.v[x]);
    }

    pub(crate) fn op_8xye(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SHL V{x:X},V{y:X}");
        self.v[0xf] = u8::from(self.v[y] & 0x80 != 0);
        self.v[y] <<= 1;
        self.v[x] = self.v[y];
    }

    fn op_9xy0(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SNE V{x:X},V{y:X}");
        if self.v[x] != self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_annn(&mut self, nnn: u16) {
        self.mnemonic = format!("LD I,{nnn:03X}");
        self.i = nnn;
    }

    pub(crate) fn op_bnnn(&mut self, nnn: u16) {
        self.mnemonic = format!("JP V0,{nnn:03X}");
        self.pc = nnn.wrapping_add(u16::from(self.v[0]));
    }

    fn op_cxnn(&mut self, x: usize, nn: u8) {
        self.mnemonic = format!("RND V{x:X},{nn:02X}");
        let random: u8 = self.rng.gen();
        self.v[x] = random & nn;
    }

    fn op_dxyn(&mut self, x: usize, y: usize, n: u8) {
        self.mnemonic = format!("DRW V{x:X},V{y:X},{n:X}");
        self.draw(x, y, 8, usize::from(n));
    }

    fn op_ex9e(&mut self, x: usize) {
        self.mnemonic = format!("SKP V{x:X}");
        if self.keyboard.is_key_pressed(self.v[x]) {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_exa1(&mut self, x: usize) {
        self.mnemonic = format!("SKNP V{x:X}");
        if !self.keyboard.is_key_pressed(self.v[x]) {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    fn op_fx07(&mut self, x: usize) {
        self.mnemonic = format!("LD V{x:X},DT");
        self.v[x] = self.delay_timer;
    }

    fn op_fx0a(&mut self, x: usize) {
        self.mnemonic = format!("LD V{x:X},K");
        self.waiting_for_keypress = Some(x);
    }

    fn op_fx15(&mut self, x: usize) {
        self.mnemonic = format!("LD DT,V{x:X}");
        self.delay_timer = self.v[x];
    }

    fn op_fx18(&mut self, x: usize) {
        self.mnemonic = format!("LD ST,V{x:X}");
        self.sound_timer = self.v[x];
    }

    fn op_fx1e(&mut self, x: usize) {
        // VF reports a range overflow past 0xFFF; undocumented, but games
        // such as Spacefight 2091! depend on it.
        self.mnemonic = format!("ADD I,V{x:X}");
        let sum = u32::from(self.i) + u32::from(self.v[x]);
        let masked = sum & 0xfff;
        self.v[0xf] = u8::from(sum != masked);
        self.i = masked as u16;
    }

    fn op_fx29(&mut self, x: usize) {
        self.mnemonic = format!("LD F,V{x:X}");
        self.i = (STANDARD_FONT_OFFSET + STANDARD_FONT_HEIGHT * usize::from(self.v[x])) as u16;
    }

    fn op_fx33(&mut self, x: usize) {
        self.mnemonic = format!("LD B,V{x:X}");
        let content = self.v[x];
        let address = usize::from(self.i);
        self.memory.set(address, content / 100);
        self.memory.set(address + 1, (content / 10) % 10);
        self.memory.set(address + 2, content % 10);
    }

    pub(crate) fn op_fx55(&mut self, x: usize) {
        self.mnemonic = format!("LD [I],V{x:X}");
        let address = usize::from(self.i);
        for (offset, &value) in self.v[..=x].iter().enumerate() {
            self.memory.set(address + offset, value);
        }
        self.i = self.i.wrapping_add(x as u16 + 1);
    }

    pub(crate) fn op_fx65(&mut self, x: usize) {
        self.mnemonic = format!("LD V{x:X},[I]");
        let address = usize::from(self.i);
        for (offset, value) in self.v[..=x].iter_mut().enumerate() {
            *value = self.memory.get(address + offset);
        }
        self.i = self.i.wrapping_add(x as u16 + 1);
    }

    /// Draws `width` x `height` pixels from memory at I, placing the
    /// collision result in VF.
    pub(crate) fn draw(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let hits = self.display.draw(
            &self.memory,
            usize::from(self.i),
            usize::from(self.v[x]),
            usize::from(self.v[y]),
            width,
            height,
        );
        self.v[0xf] = hits as u8;
    }
}
