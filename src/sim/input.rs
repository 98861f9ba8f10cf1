//! Held movement keys
//!
//! The session owns the input set; the tick only reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKey {
    Up,
    Left,
    Down,
    Right,
}

impl MoveKey {
    /// Map a raw keyboard key to a movement key. Case-insensitive; anything
    /// other than w/a/s/d is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MoveKey::Up),
            "a" => Some(MoveKey::Left),
            "s" => Some(MoveKey::Down),
            "d" => Some(MoveKey::Right),
            _ => None,
        }
    }

    /// Unit step in arena coordinates (y grows downward, like the viewport)
    pub fn step(self) -> Vec2 {
        match self {
            MoveKey::Up => Vec2::new(0.0, -1.0),
            MoveKey::Left => Vec2::new(-1.0, 0.0),
            MoveKey::Down => Vec2::new(0.0, 1.0),
            MoveKey::Right => Vec2::new(1.0, 0.0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            MoveKey::Up => 1,
            MoveKey::Left => 2,
            MoveKey::Down => 4,
            MoveKey::Right => 8,
        }
    }
}

/// Set of currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: u8,
}

impl InputState {
    pub const ALL_KEYS: [MoveKey; 4] = [MoveKey::Up, MoveKey::Left, MoveKey::Down, MoveKey::Right];

    pub fn press(&mut self, key: MoveKey) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held &= !key.bit();
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held & key.bit() != 0
    }

    pub fn clear(&mut self) {
        self.held = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.held == 0
    }

    /// Raw key down. Returns false when the key is not a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match MoveKey::from_key(key) {
            Some(k) => {
                self.press(k);
                true
            }
            None => false,
        }
    }

    /// Raw key up. Returns false when the key is not a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        match MoveKey::from_key(key) {
            Some(k) => {
                self.release(k);
                true
            }
            None => false,
        }
    }

    /// Iterate held keys in w, a, s, d order
    pub fn held(&self) -> impl Iterator<Item = MoveKey> {
        let input = *self;
        Self::ALL_KEYS.into_iter().filter(move |k| input.is_held(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization() {
        let mut input = InputState::default();
        assert!(input.key_down("W"));
        assert!(input.key_down("d"));
        assert!(!input.key_down("ArrowUp"));
        assert!(!input.key_down("q"));
        assert!(input.is_held(MoveKey::Up));
        assert!(input.is_held(MoveKey::Right));
        assert!(!input.is_held(MoveKey::Left));

        assert!(input.key_up("w"));
        assert!(!input.is_held(MoveKey::Up));
        assert_eq!(input.held().collect::<Vec<_>>(), vec![MoveKey::Right]);
    }

    #[test]
    fn test_repeat_keydown_is_idempotent() {
        let mut input = InputState::default();
        input.key_down("s");
        input.key_down("s");
        input.key_up("s");
        assert!(input.is_empty());
    }
}
