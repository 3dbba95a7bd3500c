//! Buffer: The off-screen cell grid a surface draws into.
//!
//! One `Vec<Cell>`, row after row. Rows are handed out as slices so the
//! diff and the resize logic can work a line at a time.

use super::cell::{Cell, Style};

/// A `width` x `height` grid of cells.
///
/// A zero-sized grid is valid (a terminal can report 0 rows while being
/// resized); every lookup simply finds nothing.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// A grid of empty cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells of row `y`.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let width = usize::from(self.width);
        let start = usize::from(y) * width;
        (y < self.height).then(|| &self.cells[start..start + width])
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    /// Put a character at (x, y).
    ///
    /// Wide characters also claim (x+1, y) as a continuation cell. A wide
    /// character that would straddle the right edge is replaced by a space.
    ///
    /// Returns the number of columns used, 0 if out of bounds.
    pub fn set(&mut self, x: u16, y: u16, ch: char, style: Style) -> u16 {
        let Some(at) = self.offset(x, y) else {
            return 0;
        };

        let cell = Cell::new(ch, style);
        if cell.display_width() < 2 {
            self.cells[at] = cell;
            return 1;
        }
        match self.offset(x + 1, y) {
            Some(next) => {
                self.cells[at] = cell;
                self.cells[next] = Cell::continuation(style);
                2
            }
            None => {
                self.cells[at] = Cell::new(' ', style);
                1
            }
        }
    }

    /// Set every cell to `ch` in `style`. A wide `ch` fills with spaces.
    pub fn fill(&mut self, ch: char, style: Style) {
        let cell = Cell::new(ch, style);
        let cell = if cell.display_width() == 1 {
            cell
        } else {
            Cell::new(' ', style)
        };
        self.cells.fill(cell);
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Change the dimensions. The top-left region that fits in both the
    /// old and new size keeps its content; everything else starts empty.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }

        let mut resized = Self::new(width, height);
        let keep = usize::from(self.width.min(width));
        for y in 0..self.height.min(height) {
            let start = usize::from(y) * usize::from(width);
            if let Some(old) = self.row(y) {
                resized.cells[start..start + keep].copy_from_slice(&old[..keep]);
            }
        }
        *self = resized;
    }

    /// Overwrite this grid with `other`, which must be the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells.copy_from_slice(&other.cells);
    }

    /// The characters of row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .unwrap_or_default()
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(Cell::ch)
            .collect()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Buffer({}x{})", self.width, self.height)
    }
}
