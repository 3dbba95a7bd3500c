//! TerminalSurface: The crossterm-backed default surface.
//!
//! Double-buffered: widgets draw into the back buffer, [`Surface::show`]
//! diffs it against the front buffer (what the terminal shows) and writes
//! the changes in a single syscall.

use super::convert::convert_event;
use super::surface::{EventSource, Surface};
use crate::actor::Event;
use crate::buffer::diff::{render_diff, render_full, DiffResult, DiffState};
use crate::buffer::{Buffer, Style};
use crate::error::{Error, Result};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a [`TerminalSurface`].
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to hide the cursor while the surface is active.
    pub hide_cursor: bool,
    /// How often a blocked event source rechecks whether the surface was
    /// finalized.
    pub poll_timeout: Duration,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            hide_cursor: true,
            poll_timeout: Duration::from_millis(50),
        }
    }
}

/// Output statistics for debugging/profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Number of diff flushes.
    pub shows: u64,
    /// Number of full repaints.
    pub syncs: u64,
    /// Cells written by the last flush or repaint.
    pub last_cells: usize,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
}

/// State shared between the surface and the event sources it hands out.
struct Shared {
    closed: AtomicBool,
    /// An event source has yet to report the starting size.
    initial_resize: AtomicBool,
    /// Latest known size, packed as `width << 16 | height`.
    size: AtomicU32,
}

impl Shared {
    fn new(width: u16, height: u16) -> Self {
        Self {
            closed: AtomicBool::new(false),
            initial_resize: AtomicBool::new(true),
            size: AtomicU32::new(pack(width, height)),
        }
    }

    fn size(&self) -> (u16, u16) {
        unpack(self.size.load(Ordering::Acquire))
    }

    fn observe(&self, event: &Event) {
        if let Event::Resize { width, height } = *event {
            self.size.store(pack(width, height), Ordering::Release);
        }
    }

    /// The first event any source hands out: the size at startup, so the
    /// loop paints a frame before the user does anything.
    fn take_initial_resize(&self) -> Option<Event> {
        self.initial_resize.swap(false, Ordering::AcqRel).then(|| {
            let (width, height) = self.size();
            Event::Resize { width, height }
        })
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

const fn pack(width: u16, height: u16) -> u32 {
    ((width as u32) << 16) | height as u32
}

#[allow(clippy::cast_possible_truncation)]
const fn unpack(packed: u32) -> (u16, u16) {
    ((packed >> 16) as u16, packed as u16)
}

enum Input {
    /// Real terminal events via crossterm.
    Tty,
    /// Events fed in through [`TerminalSurface::injector`].
    Injected(Sender<Event>, Receiver<Event>),
}

/// A double-buffered terminal surface.
pub struct TerminalSurface<W: Write = Stdout> {
    writer: W,
    config: SurfaceConfig,
    /// What the terminal currently shows.
    front: Buffer,
    /// What widgets are drawing.
    back: Buffer,
    diff_state: DiffState,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    shared: Arc<Shared>,
    input: Input,
    /// Whether this surface owns a real tty (raw mode, size queries).
    tty: bool,
    raw_mode: bool,
    alternate: bool,
    mouse: bool,
    paste: bool,
    /// The next flush must repaint everything.
    needs_full: bool,
    finalized: bool,
    stats: SurfaceStats,
}

impl TerminalSurface<Stdout> {
    /// Create a surface on stdout sized to the current terminal.
    ///
    /// Nothing about the terminal changes until [`init`](Self::init).
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        let (width, height) = terminal::size().map_err(Error::SurfaceCreate)?;
        let mut surface = Self::build(io::stdout(), width, height, config, Input::Tty);
        surface.tty = true;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Create a headless surface writing ANSI output to `writer`.
    ///
    /// No raw mode and no tty queries. Events come only from
    /// [`injector`](Self::injector).
    pub fn with_writer(writer: W, width: u16, height: u16, config: SurfaceConfig) -> Self {
        let (tx, rx) = unbounded();
        Self::build(writer, width, height, config, Input::Injected(tx, rx))
    }

    fn build(writer: W, width: u16, height: u16, config: SurfaceConfig, input: Input) -> Self {
        Self {
            writer,
            config,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            shared: Arc::new(Shared::new(width, height)),
            input,
            tty: false,
            raw_mode: false,
            alternate: false,
            mouse: false,
            paste: false,
            needs_full: true,
            finalized: false,
            stats: SurfaceStats::default(),
        }
    }

    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn init(&mut self) -> Result<()> {
        if self.tty {
            terminal::enable_raw_mode().map_err(Error::SurfaceInit)?;
            self.raw_mode = true;
        }
        if self.config.alternate_screen {
            execute!(self.writer, EnterAlternateScreen).map_err(Error::SurfaceInit)?;
            self.alternate = true;
        }
        if self.config.hide_cursor {
            execute!(self.writer, cursor::Hide).map_err(Error::SurfaceInit)?;
        }
        self.needs_full = true;
        self.shared.initial_resize.store(true, Ordering::Release);
        tracing::debug!(size = ?self.shared.size(), tty = self.tty, "terminal surface initialized");
        Ok(())
    }

    /// A sender for feeding events to a headless surface.
    ///
    /// Returns `None` for a surface attached to a real terminal.
    pub fn injector(&self) -> Option<Sender<Event>> {
        match &self.input {
            Input::Tty => None,
            Input::Injected(tx, _) => Some(tx.clone()),
        }
    }

    /// The cells drawn since the last clear (not necessarily flushed).
    pub const fn back_buffer(&self) -> &Buffer {
        &self.back
    }

    /// Output statistics.
    pub const fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// The underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Bring both buffers to the latest size reported by the event source.
    fn apply_pending_size(&mut self) {
        let (width, height) = self.shared.size();
        if width != self.back.width() || height != self.back.height() {
            self.back.resize(width, height);
            self.front.resize(width, height);
            self.needs_full = true;
        }
    }

    fn flush_output(&mut self, result: DiffResult) {
        self.stats.last_cells = result.cells_changed;
        if self.output.is_empty() {
            return;
        }
        let written = self
            .writer
            .write_all(&self.output)
            .and_then(|()| self.writer.flush());
        match written {
            Ok(()) => self.stats.bytes_written += self.output.len() as u64,
            Err(e) => tracing::warn!(error = %e, "terminal write failed"),
        }
        self.front.copy_from(&self.back);
    }

}

fn log_failure(what: &str, result: io::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "{what} failed");
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn enable_mouse(&mut self) {
        let result = execute!(self.writer, EnableMouseCapture);
        self.mouse = result.is_ok();
        log_failure("enable mouse", result);
    }

    fn enable_paste(&mut self) {
        let result = execute!(self.writer, EnableBracketedPaste);
        self.paste = result.is_ok();
        log_failure("enable paste", result);
    }

    fn clear(&mut self) {
        self.apply_pending_size();
        self.back.clear();
    }

    fn fill(&mut self, ch: char, style: Style) {
        self.back.fill(ch, style);
    }

    fn set_content(&mut self, x: u16, y: u16, ch: char, style: Style) -> u16 {
        self.back.set(x, y, ch, style)
    }

    fn size(&self) -> (u16, u16) {
        self.shared.size()
    }

    fn sync(&mut self) {
        self.apply_pending_size();
        self.output.clear();
        let result = render_full(&self.back, &mut self.output, &mut self.diff_state);
        self.needs_full = false;
        self.stats.syncs += 1;
        self.flush_output(result);
    }

    fn show(&mut self) {
        if self.needs_full {
            self.sync();
            return;
        }
        self.output.clear();
        let result = render_diff(&self.front, &self.back, &mut self.output, &mut self.diff_state);
        self.stats.shows += 1;
        self.flush_output(result);
    }

    fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.shared.closed.store(true, Ordering::Release);

        if self.mouse {
            let result = execute!(self.writer, DisableMouseCapture);
            log_failure("disable mouse", result);
        }
        if self.paste {
            let result = execute!(self.writer, DisableBracketedPaste);
            log_failure("disable paste", result);
        }
        if self.config.hide_cursor {
            let result = execute!(self.writer, cursor::Show);
            log_failure("show cursor", result);
        }
        if self.alternate {
            let result = execute!(self.writer, LeaveAlternateScreen);
            log_failure("leave alternate screen", result);
        }
        if self.raw_mode {
            let result = terminal::disable_raw_mode();
            log_failure("disable raw mode", result);
        }
        tracing::debug!(stats = ?self.stats, "terminal surface finalized");
    }

    fn event_source(&mut self) -> Box<dyn EventSource> {
        let shared = Arc::clone(&self.shared);
        let poll_timeout = self.config.poll_timeout;
        match &self.input {
            Input::Tty => Box::new(CrosstermEvents { shared, poll_timeout }),
            Input::Injected(_, rx) => Box::new(InjectedEvents {
                shared,
                poll_timeout,
                rx: rx.clone(),
            }),
        }
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        // Restore terminal state even if the owner forgot to finalize.
        self.finalize();
    }
}

impl<W: Write> std::fmt::Debug for TerminalSurface<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("size", &self.shared.size())
            .field("tty", &self.tty)
            .field("finalized", &self.finalized)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Reads real terminal events through crossterm.
struct CrosstermEvents {
    shared: Arc<Shared>,
    poll_timeout: Duration,
}

impl EventSource for CrosstermEvents {
    fn poll_event(&mut self) -> Option<Event> {
        loop {
            if self.shared.is_closed() {
                return None;
            }
            if let Some(event) = self.shared.take_initial_resize() {
                return Some(event);
            }
            match crossterm::event::poll(self.poll_timeout) {
                Ok(true) => match crossterm::event::read() {
                    Ok(raw) => {
                        if let Some(event) = convert_event(raw) {
                            self.shared.observe(&event);
                            return Some(event);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "reading terminal event failed");
                        return None;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "polling terminal events failed");
                    return None;
                }
            }
        }
    }
}

/// Reads events injected into a headless surface.
struct InjectedEvents {
    shared: Arc<Shared>,
    poll_timeout: Duration,
    rx: Receiver<Event>,
}

impl EventSource for InjectedEvents {
    fn poll_event(&mut self) -> Option<Event> {
        loop {
            if self.shared.is_closed() {
                return None;
            }
            if let Some(event) = self.shared.take_initial_resize() {
                return Some(event);
            }
            match self.rx.recv_timeout(self.poll_timeout) {
                Ok(event) => {
                    self.shared.observe(&event);
                    return Some(event);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}
