//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the displayed (front) and drawn (back) buffers
//! 2. Generate escape sequences for changed cells only
//! 3. Skip cursor moves between adjacent cells
//! 4. Track color state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one write.

use super::{Buffer, Cell, Rgb, Style};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// This tracks what the terminal currently shows for cursor position and
/// colors so repeated sequences can be skipped.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    /// Last emitted style; `None` when the terminal state is unknown.
    style: Option<Style>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: u16::MAX,
            cursor_y: u16::MAX,
            style: None,
        }
    }

    /// Forget everything (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.style = None;
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were written.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two buffers into `output`.
///
/// Only cells where `current` and `next` differ are written. Both buffers
/// must have the same dimensions.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();

    for y in 0..next.height() {
        let (Some(shown), Some(drawn)) = (current.row(y), next.row(y)) else {
            continue;
        };
        for (x, (old, new)) in (0u16..).zip(shown.iter().zip(drawn)) {
            if old != new && !new.is_continuation() {
                emit_cell(output, state, x, y, new, &mut result);
            }
        }
    }

    if result.cells_changed > 0 {
        output.extend_from_slice(b"\x1b[0m");
        state.style = None;
    }

    result
}

/// Repaint every cell of `buffer` (no diffing).
///
/// This is used after a resize or whenever the terminal contents are
/// unknown.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) -> DiffResult {
    state.reset();
    output.extend_from_slice(b"\x1b[0m\x1b[2J");

    let mut result = DiffResult::default();

    for y in 0..buffer.height() {
        let cells = buffer.row(y).unwrap_or_default();
        for (x, cell) in (0u16..).zip(cells) {
            if !cell.is_continuation() {
                emit_cell(output, state, x, y, cell, &mut result);
            }
        }
    }

    output.extend_from_slice(b"\x1b[0m");
    state.style = None;
    result
}

fn emit_cell(
    output: &mut Vec<u8>,
    state: &mut DiffState,
    x: u16,
    y: u16,
    cell: &Cell,
    result: &mut DiffResult,
) {
    result.cells_changed += 1;

    if (state.cursor_x, state.cursor_y) != (x, y) {
        move_cursor(output, x, y);
        state.cursor_x = x;
        state.cursor_y = y;
        result.cursor_moves += 1;
    }

    let style = cell.style();
    let last = state.style;
    if last.map(|s| s.fg) != Some(style.fg) {
        set_color(output, Layer::Foreground, style.fg);
        result.color_changes += 1;
    }
    if last.map(|s| s.bg) != Some(style.bg) {
        set_color(output, Layer::Background, style.bg);
        result.color_changes += 1;
    }
    state.style = Some(style);

    let mut utf8 = [0u8; 4];
    output.extend_from_slice(cell.ch().encode_utf8(&mut utf8).as_bytes());
    state.cursor_x = state.cursor_x.saturating_add(u16::from(cell.display_width().max(1)));
}

/// CUP to (x, y), 1-based on the wire. Omits parameters that are 1.
#[inline]
fn move_cursor(output: &mut Vec<u8>, x: u16, y: u16) {
    let _ = match (u32::from(y) + 1, u32::from(x) + 1) {
        (1, 1) => output.write_all(b"\x1b[H"),
        (row, 1) => write!(output, "\x1b[{row}H"),
        (row, col) => write!(output, "\x1b[{row};{col}H"),
    };
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

/// SGR for one color layer: truecolor, or the terminal default for `None`.
#[inline]
fn set_color(output: &mut Vec<u8>, layer: Layer, color: Option<Rgb>) {
    let base = match layer {
        Layer::Foreground => 30,
        Layer::Background => 40,
    };
    let _ = match color {
        Some(Rgb { r, g, b }) => write!(output, "\x1b[{};2;{r};{g};{b}m", base + 8),
        None => write!(output, "\x1b[{}m", base + 9),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_identical_buffers() {
        let a = Buffer::new(10, 5);
        let b = Buffer::new(10, 5);
        let mut output = Vec::new();
        let mut state = DiffState::new();

        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_diff_single_cell_change() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.set(5, 2, 'X', Style::DEFAULT);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 1);
        assert_eq!(result.cursor_moves, 1);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[3;6H"));
        assert!(output_str.contains('X'));
    }

    #[test]
    fn test_diff_adjacent_cells_share_one_cursor_move() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        b.set(0, 1, 'A', Style::DEFAULT);
        b.set(1, 1, 'B', Style::DEFAULT);
        b.set(2, 1, 'C', Style::DEFAULT);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 3);
        assert_eq!(result.cursor_moves, 1);
    }

    #[test]
    fn test_diff_color_tracking() {
        let a = Buffer::new(10, 5);
        let mut b = Buffer::new(10, 5);
        let red = Style::DEFAULT.fg(Rgb::new(255, 0, 0));
        b.set(0, 0, 'A', red);
        b.set(1, 0, 'B', red);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        // fg and bg for the first cell, nothing for the second
        assert_eq!(result.color_changes, 2);
        assert!(String::from_utf8_lossy(&output).contains("\x1b[38;2;255;0;0m"));
    }

    #[test]
    fn test_wide_character_advances_two_columns() {
        let a = Buffer::new(6, 1);
        let mut b = Buffer::new(6, 1);
        b.set(0, 0, '日', Style::DEFAULT);
        b.set(2, 0, 'x', Style::DEFAULT);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_diff(&a, &b, &mut output, &mut state);

        assert_eq!(result.cells_changed, 2);
        assert_eq!(result.cursor_moves, 1);
    }

    #[test]
    fn test_render_full_writes_every_cell() {
        let mut buffer = Buffer::new(3, 2);
        buffer.fill('.', Style::DEFAULT);

        let mut output = Vec::new();
        let mut state = DiffState::new();
        let result = render_full(&buffer, &mut output, &mut state);

        assert_eq!(result.cells_changed, 6);
        let output_str = String::from_utf8_lossy(&output);
        assert!(output_str.starts_with("\x1b[0m\x1b[2J"));
        assert_eq!(output_str.matches('.').count(), 6);
    }

    #[test]
    fn test_cursor_moves_are_compact() {
        let encode = |x, y| {
            let mut output = Vec::new();
            move_cursor(&mut output, x, y);
            String::from_utf8(output).unwrap()
        };
        assert_eq!(encode(0, 0), "\x1b[H");
        assert_eq!(encode(0, 5), "\x1b[6H");
        assert_eq!(encode(10, 5), "\x1b[6;11H");
        assert_eq!(encode(u16::MAX, 0), "\x1b[1;65536H");
    }

    #[test]
    fn test_default_colors_reset_layer() {
        let mut output = Vec::new();
        set_color(&mut output, Layer::Foreground, None);
        set_color(&mut output, Layer::Background, Some(Rgb::new(1, 2, 3)));
        assert_eq!(String::from_utf8(output).unwrap(), "\x1b[39m\x1b[48;2;1;2;3m");
    }
}
