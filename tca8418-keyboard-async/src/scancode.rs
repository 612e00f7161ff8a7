//! Scancode table of the keyboard matrix wired to the TCA8418.
//!
//! The chip reports keys as `row * 10 + column + 1`. This table maps those raw
//! numbers onto the keys printed on the keycaps.

/// A semantic key, as printed on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Reserved "no key" entry at scancode 0.
    Nothing,
    /// Escape key.
    Escape,
    /// Square symbol key.
    Square,
    /// Triangle symbol key.
    Triangle,
    /// Cross symbol key.
    Cross,
    /// Circle symbol key.
    Circle,
    /// Cloud symbol key.
    Cloud,
    /// Diamond symbol key.
    Diamond,
    /// Backspace key.
    Backspace,
    /// Digit `0`.
    Digit0,
    /// Digit `1`.
    Digit1,
    /// Digit `2`.
    Digit2,
    /// Digit `3`.
    Digit3,
    /// Digit `4`.
    Digit4,
    /// Digit `5`.
    Digit5,
    /// Digit `6`.
    Digit6,
    /// Digit `7`.
    Digit7,
    /// Digit `8`.
    Digit8,
    /// Digit `9`.
    Digit9,
    /// `-` key.
    Minus,
    /// `` ` `` key.
    Grave,
    /// Tab key.
    Tab,
    /// Letter `A`.
    A,
    /// Letter `B`.
    B,
    /// Letter `C`.
    C,
    /// Letter `D`.
    D,
    /// Letter `E`.
    E,
    /// Letter `F`.
    F,
    /// Letter `G`.
    G,
    /// Letter `H`.
    H,
    /// Letter `I`.
    I,
    /// Letter `J`.
    J,
    /// Letter `K`.
    K,
    /// Letter `L`.
    L,
    /// Letter `M`.
    M,
    /// Letter `N`.
    N,
    /// Letter `O`.
    O,
    /// Letter `P`.
    P,
    /// Letter `Q`.
    Q,
    /// Letter `R`.
    R,
    /// Letter `S`.
    S,
    /// Letter `T`.
    T,
    /// Letter `U`.
    U,
    /// Letter `V`.
    V,
    /// Letter `W`.
    W,
    /// Letter `X`.
    X,
    /// Letter `Y`.
    Y,
    /// Letter `Z`.
    Z,
    /// Function modifier.
    Fn,
    /// Left shift.
    LShift,
    /// Right shift.
    RShift,
    /// `,` key.
    Comma,
    /// `.` key.
    Period,
    /// `/` key.
    Slash,
    /// `;` key.
    Semicolon,
    /// `'` key.
    Apostrophe,
    /// `=` key.
    Equals,
    /// `\` key.
    Backslash,
    /// `[` key.
    LeftBracket,
    /// `]` key.
    RightBracket,
    /// Left arrow.
    Left,
    /// Down arrow.
    Down,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Enter key.
    Enter,
    /// Left control.
    LCtrl,
    /// Left GUI (system) key.
    LGui,
    /// Alt key.
    Alt,
    /// Space bar, wired to three matrix positions.
    Space,
    /// A position in the matrix with no key fitted.
    Unknown,
}

/// Number of entries in [`SCANCODE_TABLE`], one per 7-bit scancode.
pub const SCANCODE_TABLE_LEN: usize = 128;

/// Highest scancode with a key fitted.
pub const LAST_POPULATED_SCANCODE: u8 = 0x50;

const POPULATED: [Key; LAST_POPULATED_SCANCODE as usize + 1] = [
    Key::Nothing,      // 0x00
    Key::Escape,       // 0x01
    Key::Square,       // 0x02
    Key::Triangle,     // 0x03
    Key::Cross,        // 0x04
    Key::Circle,       // 0x05
    Key::Cloud,        // 0x06
    Key::Diamond,      // 0x07
    Key::Backspace,    // 0x08
    Key::Digit0,       // 0x09
    Key::Minus,        // 0x0a
    Key::Grave,        // 0x0b
    Key::Digit1,       // 0x0c
    Key::Digit2,       // 0x0d
    Key::Digit3,       // 0x0e
    Key::Digit4,       // 0x0f
    Key::Digit5,       // 0x10
    Key::Digit6,       // 0x11
    Key::Digit7,       // 0x12
    Key::Digit8,       // 0x13
    Key::Digit9,       // 0x14
    Key::Tab,          // 0x15
    Key::Q,            // 0x16
    Key::W,            // 0x17
    Key::E,            // 0x18
    Key::R,            // 0x19
    Key::T,            // 0x1a
    Key::Y,            // 0x1b
    Key::U,            // 0x1c
    Key::I,            // 0x1d
    Key::O,            // 0x1e
    Key::Fn,           // 0x1f
    Key::A,            // 0x20
    Key::S,            // 0x21
    Key::D,            // 0x22
    Key::F,            // 0x23
    Key::G,            // 0x24
    Key::H,            // 0x25
    Key::J,            // 0x26
    Key::K,            // 0x27
    Key::L,            // 0x28
    Key::LShift,       // 0x29
    Key::Z,            // 0x2a
    Key::X,            // 0x2b
    Key::C,            // 0x2c
    Key::V,            // 0x2d
    Key::B,            // 0x2e
    Key::N,            // 0x2f
    Key::M,            // 0x30
    Key::Comma,        // 0x31
    Key::Period,       // 0x32
    Key::Left,         // 0x33
    Key::Down,         // 0x34
    Key::Right,        // 0x35
    Key::Slash,        // 0x36
    Key::Up,           // 0x37
    Key::RShift,       // 0x38
    Key::Semicolon,    // 0x39
    Key::Apostrophe,   // 0x3a
    Key::Enter,        // 0x3b
    Key::Equals,       // 0x3c
    Key::LCtrl,        // 0x3d
    Key::LGui,         // 0x3e
    Key::Alt,          // 0x3f
    Key::Backslash,    // 0x40
    Key::Space,        // 0x41
    Key::Space,        // 0x42
    Key::Space,        // 0x43
    Key::Alt,          // 0x44
    Key::P,            // 0x45
    Key::LeftBracket,  // 0x46
    Key::Unknown,      // 0x47
    Key::Unknown,      // 0x48
    Key::Unknown,      // 0x49
    Key::Unknown,      // 0x4a
    Key::Unknown,      // 0x4b
    Key::Unknown,      // 0x4c
    Key::Unknown,      // 0x4d
    Key::Unknown,      // 0x4e
    Key::Unknown,      // 0x4f
    Key::RightBracket, // 0x50
];

/// Scancode to key lookup, indexed by the raw 7-bit scancode.
pub const SCANCODE_TABLE: [Key; SCANCODE_TABLE_LEN] = {
    let mut table = [Key::Unknown; SCANCODE_TABLE_LEN];
    let mut i = 0;
    while i < POPULATED.len() {
        table[i] = POPULATED[i];
        i += 1;
    }
    table
};

impl Key {
    /// Looks up the key for a raw scancode.
    ///
    /// Scancodes outside the table decode to [`Key::Unknown`].
    pub fn from_scancode(scancode: u8) -> Self {
        SCANCODE_TABLE
            .get(scancode as usize)
            .copied()
            .unwrap_or(Key::Unknown)
    }

    /// The stable name of the key, e.g. `"LSHIFT"` or `"7"`.
    pub const fn name(self) -> &'static str {
        match self {
            Key::Nothing => "NOTHING",
            Key::Escape => "ESCAPE",
            Key::Square => "SQUARE",
            Key::Triangle => "TRIANGLE",
            Key::Cross => "CROSS",
            Key::Circle => "CIRCLE",
            Key::Cloud => "CLOUD",
            Key::Diamond => "DIAMOND",
            Key::Backspace => "BACKSPACE",
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::Minus => "MINUS",
            Key::Grave => "GRAVE",
            Key::Tab => "TAB",
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Fn => "FN",
            Key::LShift => "LSHIFT",
            Key::RShift => "RSHIFT",
            Key::Comma => "COMMA",
            Key::Period => "PERIOD",
            Key::Slash => "SLASH",
            Key::Semicolon => "SEMICOLON",
            Key::Apostrophe => "APOSTROPHE",
            Key::Equals => "EQUALS",
            Key::Backslash => "BACKSLASH",
            Key::LeftBracket => "LEFTBRACKET",
            Key::RightBracket => "RIGHTBRACKET",
            Key::Left => "LEFT",
            Key::Down => "DOWN",
            Key::Right => "RIGHT",
            Key::Up => "UP",
            Key::Enter => "ENTER",
            Key::LCtrl => "LCTRL",
            Key::LGui => "LGUI",
            Key::Alt => "ALT",
            Key::Space => "SPACE",
            Key::Unknown => "UNKNOWN",
        }
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
