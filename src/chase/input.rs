//! Movement key state, fed by keydown / keyup and read once per tick.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

    /// Map a DOM `KeyboardEvent.key` value (arrow or WASD) to a logical key.
    /// Case-insensitive so Caps Lock / Shift do not drop input.
    pub fn from_dom_key(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(Key::Up),
            "arrowdown" | "s" => Some(Key::Down),
            "arrowleft" | "a" => Some(Key::Left),
            "arrowright" | "d" => Some(Key::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputTracker {
    pressed: [bool; 4],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and changes nothing) for keys that are not movement keys.
    pub fn set_key(&mut self, id: &str, pressed: bool) -> bool {
        match Key::from_dom_key(id) {
            Some(key) => {
                self.set(key, pressed);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.pressed[key.index()] = pressed;
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_are_synonyms() {
        for (name, key) in [
            ("ArrowUp", Key::Up),
            ("w", Key::Up),
            ("W", Key::Up),
            ("arrowdown", Key::Down),
            ("s", Key::Down),
            ("ArrowLeft", Key::Left),
            ("a", Key::Left),
            ("ArrowRight", Key::Right),
            ("D", Key::Right),
        ] {
            assert_eq!(Key::from_dom_key(name), Some(key), "{name}");
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputTracker::new();
        assert!(!input.set_key("Enter", true));
        assert!(!input.set_key("q", true));
        assert!(Key::ALL.iter().all(|k| !input.is_pressed(*k)));
    }

    #[test]
    fn press_and_release() {
        let mut input = InputTracker::new();
        assert!(input.set_key("ArrowLeft", true));
        assert!(input.set_key("w", true));
        assert!(input.is_pressed(Key::Left));
        assert!(input.is_pressed(Key::Up));
        input.set_key("a", false);
        assert!(!input.is_pressed(Key::Left));
        input.release_all();
        assert!(!input.is_pressed(Key::Up));
    }
}
