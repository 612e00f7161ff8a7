//! Translation from keys to the application's logical buttons.

use core::fmt;

use crate::scancode::Key;

/// A logical button identifier as understood by the application, e.g. `"A"`,
/// `"SHIFT"` or `","`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Button(&'static str);

impl Button {
    /// Creates a button from its identifier.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The identifier of the button.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl PartialEq<&str> for Button {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Both shift keys act as one `SHIFT` button; punctuation keys map to the
/// character they type.
pub const STANDARD_ALIASES: &[(Key, &str)] = &[
    (Key::LShift, "SHIFT"),
    (Key::RShift, "SHIFT"),
    (Key::Minus, "-"),
    (Key::Grave, "`"),
    (Key::Comma, ","),
    (Key::Period, "."),
    (Key::Slash, "/"),
    (Key::Semicolon, ";"),
    (Key::Apostrophe, "'"),
    (Key::Equals, "="),
    (Key::Backslash, "\\"),
    (Key::LeftBracket, "["),
    (Key::RightBracket, "]"),
];

/// `BACKSPACE` is reported as `DELETE` and the shift keys keep their own names.
pub const SPLIT_SHIFT_ALIASES: &[(Key, &str)] = &[
    (Key::Backspace, "DELETE"),
    (Key::Minus, "-"),
    (Key::Grave, "`"),
    (Key::Comma, ","),
    (Key::Period, "."),
    (Key::Slash, "/"),
    (Key::Semicolon, ";"),
    (Key::Apostrophe, "'"),
    (Key::Equals, "="),
    (Key::Backslash, "\\"),
    (Key::LeftBracket, "["),
    (Key::RightBracket, "]"),
];

/// Buttons accepted by the standard preset.
pub const STANDARD_BUTTONS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "-", "`", ",", ".", "/", ";", "'", "=", "\\", "[", "]", "SPACE", "SHIFT", "ENTER",
    "BACKSPACE", "TAB", "ESCAPE", "UP", "DOWN", "LEFT", "RIGHT",
];

/// Buttons accepted by the split shift preset.
pub const SPLIT_SHIFT_BUTTONS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
    "-", "`", ",", ".", "/", ";", "'", "=", "\\", "[", "]", "SPACE", "LSHIFT", "RSHIFT",
    "ENTER", "DELETE", "TAB", "ESCAPE", "UP", "DOWN", "LEFT", "RIGHT",
];

/// Maps keys onto the logical buttons of one deployment.
///
/// A key is first looked up in the alias table; without an alias its own name is
/// used. The result is only reported if the button set contains it, so keys the
/// application has no use for are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRemap {
    aliases: &'static [(Key, &'static str)],
    buttons: &'static [&'static str],
}

impl KeyRemap {
    /// Combined `SHIFT`, `BACKSPACE` kept as is.
    pub const STANDARD: Self = Self::new(STANDARD_ALIASES, STANDARD_BUTTONS);

    /// Separate `LSHIFT`/`RSHIFT`, `BACKSPACE` reported as `DELETE`.
    pub const SPLIT_SHIFT: Self = Self::new(SPLIT_SHIFT_ALIASES, SPLIT_SHIFT_BUTTONS);

    /// Creates a remap from an alias table and the application's button set.
    pub const fn new(
        aliases: &'static [(Key, &'static str)],
        buttons: &'static [&'static str],
    ) -> Self {
        Self { aliases, buttons }
    }

    /// Returns the alias configured for `key`, if any.
    pub fn alias(&self, key: Key) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(aliased, _)| *aliased == key)
            .map(|(_, name)| *name)
    }

    /// Resolves a key to a logical button.
    pub fn button(&self, key: Key) -> Option<Button> {
        let name = self.alias(key).unwrap_or(key.name());
        self.buttons
            .iter()
            .find(|button| **button == name)
            .map(|button| Button::new(*button))
    }

    /// Decodes a raw scancode into a logical button.
    ///
    /// Scancode 0 is the chip's "no key" value and never yields a button.
    pub fn decode(&self, scancode: u8) -> Option<Button> {
        if scancode == 0 {
            return None;
        }
        self.button(Key::from_scancode(scancode))
    }
}

impl Default for KeyRemap {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Decodes a raw scancode with the standard remap.
pub fn decode(scancode: u8) -> Option<Button> {
    KeyRemap::STANDARD.decode(scancode)
}
