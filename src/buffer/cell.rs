//! Cell: The atomic unit of terminal display.
//!
//! A cell is one character plus a [`Style`]. Styling is deliberately
//! limited to a foreground/background pair.

/// A 24-bit color.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// A color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { r, g, b } = self;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// `0xRRGGBB`; the top byte is ignored.
impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::new(r, g, b)
    }
}

/// Foreground/background attribute pair.
///
/// `None` means "whatever the terminal's default color is".
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Debug)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
}

impl Style {
    /// Terminal default colors.
    pub const DEFAULT: Self = Self { fg: None, bg: None };

    /// With foreground `fg`.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// With background `bg`.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }
}

/// A single terminal cell.
///
/// Wide characters (CJK) occupy two columns: the character itself in the
/// first cell and a continuation cell in the second. Continuation cells are
/// never emitted on their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    ch: char,
    style: Style,
    width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space with default colors).
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: Style::DEFAULT,
        width: 1,
    };

    /// Create a cell for `ch` with the given style.
    ///
    /// Zero-width and control characters are stored as a space so that the
    /// cell always advances the cursor by its display width.
    #[inline]
    pub fn new(ch: char, style: Style) -> Self {
        match unicode_width::UnicodeWidthChar::width(ch) {
            Some(2) => Self { ch, style, width: 2 },
            Some(1) => Self { ch, style, width: 1 },
            _ => Self { ch: ' ', style, width: 1 },
        }
    }

    /// Create the trailing half of a wide character.
    #[inline]
    pub const fn continuation(style: Style) -> Self {
        Self { ch: ' ', style, width: 0 }
    }

    /// The character stored in this cell.
    #[inline]
    pub const fn ch(&self) -> char {
        self.ch
    }

    /// The cell's style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Display width (0 for a continuation, 1 or 2 otherwise).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.width
    }

    /// Whether this is the right half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return f.write_str("Cell(continuation)");
        }
        write!(f, "Cell({:?}, {:?})", self.ch, self.style)
    }
}
