use bitflags::bitflags;
use starguard_common::key::Key;

/// DOM `KeyboardEvent.keyCode` values the game listens for.
pub const KEY_CODE_LEFT: u32 = 37;
pub const KEY_CODE_RIGHT: u32 = 39;
pub const KEY_CODE_FIRE: u32 = 32;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const FIRE = 1 << 2;
    }
}

impl Buttons {
    pub fn from_key_code(code: u32) -> Buttons {
        match code {
            KEY_CODE_LEFT => Buttons::LEFT,
            KEY_CODE_RIGHT => Buttons::RIGHT,
            KEY_CODE_FIRE => Buttons::FIRE,
            _ => Buttons::empty(),
        }
    }

    pub fn from_key(key: Key) -> Buttons {
        match key {
            Key::A | Key::Left => Buttons::LEFT,
            Key::D | Key::Right => Buttons::RIGHT,
            Key::Space => Buttons::FIRE,
            _ => Buttons::empty(),
        }
    }
}

/// Held state of the three game buttons, written by key events and read once
/// per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: Buttons,
}

impl InputState {
    pub fn set(&mut self, buttons: Buttons, pressed: bool) {
        self.held.set(buttons, pressed);
    }

    pub fn held(&self, buttons: Buttons) -> bool {
        self.held.contains(buttons)
    }

    /// Apply a DOM key code. Returns whether the code is one of ours.
    pub fn apply_key_code(&mut self, code: u32, pressed: bool) -> bool {
        let buttons = Buttons::from_key_code(code);
        if buttons.is_empty() {
            return false;
        }
        self.set(buttons, pressed);
        true
    }

    /// Apply a frontend-neutral key. Returns whether the key is one of ours.
    pub fn apply_key(&mut self, key: Key, pressed: bool) -> bool {
        let buttons = Buttons::from_key(key);
        if buttons.is_empty() {
            return false;
        }
        self.set(buttons, pressed);
        true
    }

    pub fn release_all(&mut self) {
        self.held = Buttons::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_codes_map_to_buttons() {
        let mut input = InputState::default();
        assert!(input.apply_key_code(37, true));
        assert!(input.apply_key_code(32, true));
        assert!(input.held(Buttons::LEFT));
        assert!(input.held(Buttons::FIRE));
        assert!(!input.held(Buttons::RIGHT));

        assert!(input.apply_key_code(37, false));
        assert!(!input.held(Buttons::LEFT));
        assert!(input.held(Buttons::FIRE));
    }

    #[test]
    fn unknown_key_codes_are_ignored() {
        let mut input = InputState::default();
        assert!(!input.apply_key_code(65, true));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn repeated_presses_are_idempotent() {
        let mut input = InputState::default();
        input.apply_key_code(39, true);
        input.apply_key_code(39, true);
        input.apply_key_code(39, false);
        assert!(!input.held(Buttons::RIGHT));
    }

    #[test]
    fn desktop_keys_share_the_same_buttons() {
        let mut input = InputState::default();
        assert!(input.apply_key(Key::A, true));
        assert!(input.held(Buttons::LEFT));
        assert!(input.apply_key(Key::Right, true));
        assert!(input.held(Buttons::LEFT | Buttons::RIGHT));
        assert!(!input.apply_key(Key::Escape, true));
        input.release_all();
        assert!(!input.held(Buttons::LEFT));
    }
}
