//! The XO-CHIP dispatch layer: scroll-up, inclusive register ranges, the
//! 16-bit index load, the audio pattern buffer and plane selection. Tried
//! before the Super-CHIP layer so its narrower patterns win.

use crate::processor::{Decoded, Processor};

impl Processor {
    /// The 16-byte audio pattern most recently captured by the `AUDIO`
    /// instruction. The driver turns this into a 1-bit waveform.
    #[must_use]
    pub fn audio_pattern_buffer(&self) -> &[u8; 16] {
        &self.audio_pattern_buffer
    }

    pub(crate) fn execute_xochip(&mut self, decoded: Decoded) -> bool {
        match self.opcode & 0xf000 {
            0x0000 => self.xochip_family_0(decoded),
            0x5000 => self.xochip_family_5(decoded),
            0xf000 => self.xochip_family_f(decoded),
            _ => false,
        }
    }

    fn xochip_family_0(&mut self, decoded: Decoded) -> bool {
        let Decoded { n, y, .. } = decoded;
        match y {
            0xd => {
                self.op_00dn(n);
                true
            }
            _ => false,
        }
    }

    fn xochip_family_5(&mut self, decoded: Decoded) -> bool {
        let Decoded { n, x, y, .. } = decoded;
        match n {
            2 => self.op_5xy2(x, y),
            3 => self.op_5xy3(x, y),
            _ => return false,
        }
        true
    }

    fn xochip_family_f(&mut self, decoded: Decoded) -> bool {
        let Decoded { nnn, nn, x, .. } = decoded;
        match nnn {
            0x000 => self.op_f000(),
            0x002 => self.op_f002(),
            _ => match nn {
                0x01 => self.op_fn01(x),
                _ => return false,
            },
        }
        true
    }

    /// SCUP: scroll the selected planes up 0-15 pixels.
    fn op_00dn(&mut self, n: u8) {
        self.mnemonic = format!("SCUP {n:X}");
        self.display.scroll_up(usize::from(n));
    }

    /// SAVE Vx-Vy: store an inclusive register range to memory at I,
    /// walking down when x > y. I itself does not move.
    fn op_5xy2(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("SAVE V{x:X}-V{y:X}");
        let step: isize = if x > y { -1 } else { 1 };
        let mut address = usize::from(self.i);
        let mut index = x as isize;
        loop {
            self.memory.set(address, self.v[index as usize]);
            address += 1;
            if index == y as isize {
                break;
            }
            index += step;
        }
    }

    /// LOAD Vx-Vy: the mirror of SAVE Vx-Vy.
    fn op_5xy3(&mut self, x: usize, y: usize) {
        self.mnemonic = format!("LOAD V{x:X}-V{y:X}");
        let step: isize = if x > y { -1 } else { 1 };
        let mut address = usize::from(self.i);
        let mut index = x as isize;
        loop {
            self.v[index as usize] = self.memory.get(address);
            address += 1;
            if index == y as isize {
                break;
            }
            index += step;
        }
    }

    /// LD I,NNNN: a four-nibble opcode; the next word is a full 16-bit
    /// address for I, and the program counter steps over it.
    fn op_f000(&mut self) {
        let address = self.memory.word(usize::from(self.pc));
        self.mnemonic = format!("LD I,{address:04X}");
        self.i = address;
        self.pc = self.pc.wrapping_add(2);
    }

    /// AUDIO: capture 16 bytes at I into the audio pattern buffer.
    fn op_f002(&mut self) {
        self.mnemonic = "AUDIO".into();
        let address = usize::from(self.i);
        for (offset, value) in self.audio_pattern_buffer.iter_mut().enumerate() {
            *value = self.memory.get(address + offset);
        }
    }

    /// PLANE n: select drawing planes straight from the bitmask in the
    /// opcode's X nibble; zero planes is legal.
    fn op_fn01(&mut self, n: usize) {
        self.mnemonic = format!("PLANE {n:X}");
        self.display.set_plane_mask(n as u8);
    }
}
