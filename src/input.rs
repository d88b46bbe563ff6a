//! Key state for the 16-key hex pad. The driver reports presses and
//! releases as they happen; the processor polls the state when executing
//! the skip-on-key and wait-for-key instructions. Mapping physical keys to
//! pad indices is entirely the driver's concern.

/// Number of keys on the pad, indexed 0x0 to 0xF.
pub const KEY_COUNT: usize = 16;

/// Current state of the hex pad.
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keyboard {
    state: [bool; KEY_COUNT],
}

impl Keyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key going down (`pressed` true) or up (`pressed` false).
    pub fn update(&mut self, key_code: u8, pressed: bool) {
        self.state[usize::from(key_code)] = pressed;
    }

    /// Whether the given key is currently held.
    #[must_use]
    pub fn is_key_pressed(&self, key_code: u8) -> bool {
        self.state[usize::from(key_code)]
    }

    /// The lowest-numbered key currently held, if any. Used by the
    /// wait-for-key state to resolve the suspension.
    #[must_use]
    pub fn first_pressed(&self) -> Option<u8> {
        self.state
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }
}
