//! Rect: The region a widget may draw into and hit-test against.

/// Position and size of a region of the surface, in cells.
///
/// Rects are plain values. They are handed down the widget tree on every
/// draw and mouse call and must not be cached by widgets, since the surface
/// may have been resized in between.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Leftmost column.
    pub x: u16,
    /// Topmost row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle covering a whole surface of the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The empty rect at the origin.
    pub const ZERO: Self = Self::from_size(0, 0);

    /// No cells at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Hit test: whether the cell at (x, y) lies inside. Widgets use this
    /// with the rect they were handed to decide if a click is theirs.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        (x >= self.x && x < self.right()) && (y >= self.y && y < self.bottom())
    }

    /// A `width` x `height` rectangle centered inside this one.
    ///
    /// Each axis is handled independently. When the requested extent
    /// exceeds the available one, the full extent is used. Odd remainders
    /// put the extra cell after the content: available 10, content 3
    /// leaves 3 columns before and 4 after.
    #[must_use]
    pub const fn centered(&self, width: u16, height: u16) -> Self {
        let (x, width) = center_axis(self.x, self.width, width);
        let (y, height) = center_axis(self.y, self.height, height);
        Self::new(x, y, width, height)
    }
}

const fn center_axis(origin: u16, available: u16, wanted: u16) -> (u16, u16) {
    if wanted >= available {
        (origin, available)
    } else {
        (origin + (available - wanted) / 2, wanted)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { x, y, width, height } = self;
        write!(f, "Rect({x}, {y} {width}x{height})")
    }
}
