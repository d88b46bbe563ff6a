//! A virtual machine for the CHIP-8 family: the base COSMAC VIP instruction
//! set plus the Super-CHIP and XO-CHIP supersets, selected and tuned by a
//! per-session [`Configuration`]. The crate is the machine only — no window,
//! sound device or key mapping; a driver owns the pacing and presentation.
//!
//! ```no_run
//! use chip8_vm::{Configuration, Processor};
//!
//! let configuration = Configuration::super_chip();
//! let cycles_per_frame = configuration.cycles_per_frame;
//!
//! let mut processor = Processor::new(configuration);
//! processor.initialise();
//! processor.load_rom("game.ch8")?;
//!
//! // Once per 60 Hz frame:
//! while !processor.finished() {
//!     for _ in 0..cycles_per_frame {
//!         processor.step()?;
//!     }
//!     if let Some(_event) = processor.update_timers() {
//!         // start or stop the beeper
//!     }
//!     if processor.draw_needed() {
//!         // present processor.display().planes(), then:
//!         processor.set_draw_needed(false);
//!     }
//! }
//! # Ok::<(), chip8_vm::Error>(())
//! ```

pub mod configuration;
pub mod error;
pub mod graphics;
pub mod input;
pub mod memory;
pub mod processor;
mod schip;
mod xochip;

pub use configuration::{Configuration, ProcessorLevel};
pub use error::Error;
pub use graphics::{BitmappedGraphics, GraphicsPlane};
pub use input::Keyboard;
pub use memory::Memory;
pub use processor::{Instruction, Processor, SoundEvent};
