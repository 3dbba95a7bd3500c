//! Test doubles shared by the unit tests: a surface that records what the
//! runtime does to it and a widget that records what it is asked to do.

use crate::actor::{Event, KeyEvent, MouseEvent};
use crate::buffer::{Buffer, Style};
use crate::layout::Rect;
use crate::terminal::{EventSource, Surface};
use crate::widget::Widget;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Ordered, thread-safe record of everything that happened.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }

    /// Entries with the surface's drawing noise (clear/fill) removed.
    pub fn significant(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e != "clear" && !e.starts_with("fill"))
            .collect()
    }
}

/// A surface that logs every call and takes events from a channel.
pub struct RecordingSurface {
    log: Log,
    buffer: Buffer,
    size: Arc<Mutex<(u16, u16)>>,
    closed: Arc<AtomicBool>,
    events: Receiver<Event>,
    finalize_count: usize,
}

impl RecordingSurface {
    /// Returns the surface and the sender feeding its event source.
    /// Dropping the sender makes the event source yield `None`.
    pub fn new(width: u16, height: u16, log: &Log) -> (Self, Sender<Event>) {
        let (tx, rx) = unbounded();
        let surface = Self {
            log: log.clone(),
            buffer: Buffer::new(width, height),
            size: Arc::new(Mutex::new((width, height))),
            closed: Arc::new(AtomicBool::new(false)),
            events: rx,
            finalize_count: 0,
        };
        (surface, tx)
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub const fn finalize_count(&self) -> usize {
        self.finalize_count
    }
}

impl Surface for RecordingSurface {
    fn enable_mouse(&mut self) {
        self.log.push("enable_mouse");
    }

    fn enable_paste(&mut self) {
        self.log.push("enable_paste");
    }

    fn clear(&mut self) {
        let (width, height) = *self.size.lock().unwrap();
        self.buffer.resize(width, height);
        self.buffer.clear();
        self.log.push("clear");
    }

    fn fill(&mut self, ch: char, _style: Style) {
        self.buffer.fill(ch, Style::DEFAULT);
        self.log.push(format!("fill {ch:?}"));
    }

    fn set_content(&mut self, x: u16, y: u16, ch: char, style: Style) -> u16 {
        self.buffer.set(x, y, ch, style)
    }

    fn size(&self) -> (u16, u16) {
        *self.size.lock().unwrap()
    }

    fn sync(&mut self) {
        self.log.push("sync");
    }

    fn show(&mut self) {
        self.log.push("show");
    }

    fn finalize(&mut self) {
        self.finalize_count += 1;
        self.closed.store(true, Ordering::SeqCst);
        self.log.push("finalize");
    }

    fn event_source(&mut self) -> Box<dyn EventSource> {
        Box::new(RecordingEvents {
            rx: self.events.clone(),
            size: Arc::clone(&self.size),
            closed: Arc::clone(&self.closed),
        })
    }
}

struct RecordingEvents {
    rx: Receiver<Event>,
    size: Arc<Mutex<(u16, u16)>>,
    closed: Arc<AtomicBool>,
}

impl EventSource for RecordingEvents {
    fn poll_event(&mut self) -> Option<Event> {
        loop {
            if self.closed.load(Ordering::SeqCst) {
                return None;
            }
            match self.rx.recv_timeout(Duration::from_millis(5)) {
                Ok(event) => {
                    if let Event::Resize { width, height } = event {
                        *self.size.lock().unwrap() = (width, height);
                    }
                    return Some(event);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}

/// A widget that logs its calls and answers key/mouse with fixed results.
pub struct Probe {
    pub name: &'static str,
    pub log: Log,
    pub size: (u16, u16),
    pub consume: bool,
    pub focused: bool,
    pub value: u32,
}

impl Probe {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            size: (u16::MAX, u16::MAX),
            consume: false,
            focused: false,
            value: 0,
        }
    }

    pub fn sized(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }
}

impl Widget for Probe {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.log.push(format!("{} focus {focused}", self.name));
    }

    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.log.push(format!("{} key {:?}", self.name, event.code));
        self.consume
    }

    fn handle_mouse(&mut self, rect: Rect, event: &MouseEvent) -> bool {
        self.log.push(format!(
            "{} mouse {},{} in {rect:?}",
            self.name, event.x, event.y
        ));
        self.consume
    }

    fn draw(&self, rect: Rect, _surface: &mut dyn Surface) {
        self.log.push(format!("{} draw {rect:?} value={}", self.name, self.value));
    }

    fn display_size(&self, _width: u16, _height: u16) -> (u16, u16) {
        self.size
    }
}
