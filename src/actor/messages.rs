//! Message types flowing into the runtime loop.
//!
//! [`Event`]s come from the terminal through the event pump; callbacks
//! come from producer threads through the bridge.

use bitflags::bitflags;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character (the key's rune).
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// Null (Ctrl+Space on some terminals).
    Null,
}

bitflags! {
    /// Modifier keys held during a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0001;
        /// Control key held.
        const CONTROL = 0b0010;
        /// Alt/Option key held.
        const ALT = 0b0100;
        /// Super/Command/Windows key held.
        const META = 0b1000;
    }
}

bitflags! {
    /// Buttons held (or wheel direction) during a mouse event.
    ///
    /// An empty set is plain motion or a release.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const LEFT = 0b0000_0001;
        /// Middle button.
        const MIDDLE = 0b0000_0010;
        /// Secondary button.
        const RIGHT = 0b0000_0100;
        /// Wheel scrolled up.
        const WHEEL_UP = 0b0000_1000;
        /// Wheel scrolled down.
        const WHEEL_DOWN = 0b0001_0000;
        /// Wheel scrolled left.
        const WHEEL_LEFT = 0b0010_0000;
        /// Wheel scrolled right.
        const WHEEL_RIGHT = 0b0100_0000;
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the keypress.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a key event.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// The character typed, if this is a printable key.
    pub const fn rune(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// A pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
    /// Buttons held or wheel direction.
    pub buttons: MouseButtons,
    /// Key modifiers held during the event.
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// The event position as `(x, y)`.
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// Events produced by a terminal and consumed by the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The surface was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// A key was pressed.
    Key(KeyEvent),

    /// Mouse button, motion or wheel.
    Mouse(MouseEvent),

    /// Bracketed paste.
    Paste(String),
}

/// Work scheduled onto the runtime loop by another thread.
///
/// The callback runs on the UI thread with exclusive access to the root
/// widget. It has no way to report failure back to the loop.
pub type Callback<W> = Box<dyn FnOnce(&mut W) + Send>;
