//! App: The runtime loop that owns the widget tree and the surface.
//!
//! All widget code runs on the thread that calls [`App::run`]. Other threads
//! reach the UI only through the callback bridge (see [`crate::actor`]).
//!
//! # Loop
//!
//! The default loop waits until at least one of these is ready, then takes
//! exactly one item, in this order:
//!
//! 1. cancellation: the loop returns
//! 2. a callback: it runs with `&mut` access to the root widget
//! 3. a terminal event: it is dispatched to the hooks and the root widget
//!
//! Every processed callback or event costs exactly one redraw pass. Events
//! are redrawn *before* they are dispatched, so the screen always shows the
//! state the event was aimed at.

use crate::actor::{Callback, CallbackReceiver, CancelToken, Event, EventPump, KeyEvent, MouseEvent};
use crate::buffer::Style;
use crate::error::Result;
use crate::layout::Rect;
use crate::terminal::{Surface, SurfaceConfig, TerminalSurface};
use crate::widget::Widget;
use crossbeam_channel::{never, Receiver, Select, TryRecvError};
use std::panic::{self, AssertUnwindSafe};

/// A loop body that replaces [`default_loop`].
pub type LoopFn<W> = Box<dyn FnMut(&mut App<W>, &CancelToken, &mut dyn Surface)>;

type ResizeHook = Box<dyn FnMut(u16, u16)>;
type KeyHook = Box<dyn FnMut(&KeyEvent) -> bool>;
type MouseHook = Box<dyn FnMut(&MouseEvent) -> bool>;

/// The application runtime.
///
/// Only the root widget is required. Everything else is optional and set
/// with the builder methods before calling [`run`](Self::run).
pub struct App<W: Widget = Box<dyn Widget>> {
    root: W,
    rect: Rect,
    fill_rune: char,
    fill_style: Style,
    custom_loop: Option<LoopFn<W>>,
    callbacks: Option<Receiver<Callback<W>>>,
    on_resize: Option<ResizeHook>,
    on_key: Option<KeyHook>,
    on_mouse: Option<MouseHook>,
}

impl<W: Widget> App<W> {
    /// Create an app around `root`. Redraws fill with spaces in the
    /// default style.
    pub const fn new(root: W) -> Self {
        Self {
            root,
            rect: Rect::ZERO,
            fill_rune: ' ',
            fill_style: Style::DEFAULT,
            custom_loop: None,
            callbacks: None,
            on_resize: None,
            on_key: None,
            on_mouse: None,
        }
    }

    /// Fill every redraw with `rune` in `style` before the root draws.
    #[must_use]
    pub const fn with_fill(mut self, rune: char, style: Style) -> Self {
        self.fill_rune = rune;
        self.fill_style = style;
        self
    }

    /// Accept callbacks posted through the matching [`CallbackSender`].
    ///
    /// [`CallbackSender`]: crate::actor::CallbackSender
    #[must_use]
    pub fn with_callbacks(mut self, callbacks: CallbackReceiver<W>) -> Self {
        self.callbacks = Some(callbacks.into_channel());
        self
    }

    /// Called with the new size after a resize, before the full repaint.
    #[must_use]
    pub fn on_resize<F>(mut self, hook: F) -> Self
    where
        F: FnMut(u16, u16) + 'static,
    {
        self.on_resize = Some(Box::new(hook));
        self
    }

    /// Gets every key event before the root widget. Returning `true`
    /// keeps the event from reaching the widget.
    #[must_use]
    pub fn on_key<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&KeyEvent) -> bool + 'static,
    {
        self.on_key = Some(Box::new(hook));
        self
    }

    /// Gets every mouse event before the root widget. Returning `true`
    /// keeps the event from reaching the widget.
    #[must_use]
    pub fn on_mouse<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&MouseEvent) -> bool + 'static,
    {
        self.on_mouse = Some(Box::new(hook));
        self
    }

    /// Replace the default loop entirely. The custom loop can still call
    /// [`default_loop`] itself.
    #[must_use]
    pub fn with_custom_loop<F>(mut self, body: F) -> Self
    where
        F: FnMut(&mut Self, &CancelToken, &mut dyn Surface) + 'static,
    {
        self.custom_loop = Some(Box::new(body));
        self
    }

    /// The root widget.
    #[inline]
    pub const fn root(&self) -> &W {
        &self.root
    }

    /// The root widget, mutably.
    #[inline]
    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// The geometry the root is drawn into.
    #[inline]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Override the geometry. [`run`](Self::run) starts from the surface
    /// size and resize events replace it; custom loops may set their own.
    #[inline]
    pub const fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Run until `cancel` fires.
    ///
    /// Enables mouse and paste reporting, focuses the root, runs the custom
    /// loop if one is set (otherwise [`default_loop`]), and finalizes the
    /// surface exactly once on the way out. A panic in a hook, callback or
    /// widget is re-raised after the surface has been finalized.
    pub fn run(&mut self, cancel: &CancelToken, surface: &mut dyn Surface) {
        tracing::info!(size = ?surface.size(), "runtime starting");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            surface.enable_mouse();
            surface.enable_paste();
            self.root.set_focused(true);
            let (width, height) = surface.size();
            self.rect = Rect::from_size(width, height);

            if let Some(mut body) = self.custom_loop.take() {
                body(self, cancel, surface);
                self.custom_loop = Some(body);
            } else {
                default_loop(self, cancel, surface);
            }
        }));

        surface.finalize();

        match outcome {
            Ok(()) => tracing::info!("runtime stopped"),
            Err(payload) => {
                tracing::warn!("runtime stopped by a panic");
                panic::resume_unwind(payload);
            }
        }
    }

    /// Create a terminal surface with the default configuration, take over
    /// the terminal and [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be created or initialized.
    /// The loop itself cannot fail.
    pub fn run_terminal(&mut self, cancel: &CancelToken) -> Result<()> {
        self.run_terminal_with(cancel, SurfaceConfig::default())
    }

    /// Like [`run_terminal`](Self::run_terminal) with an explicit config.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be created or initialized.
    pub fn run_terminal_with(&mut self, cancel: &CancelToken, config: SurfaceConfig) -> Result<()> {
        let mut surface = TerminalSurface::new(config)?;
        surface.init()?;
        self.run(cancel, &mut surface);
        Ok(())
    }

    /// One redraw pass: clear, fill, draw the root, flush the changes.
    pub fn redraw(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.fill(self.fill_rune, self.fill_style);
        self.root.draw(self.rect, surface);
        surface.show();
        tracing::trace!(rect = ?self.rect, "redraw");
    }

    /// Run one callback, then redraw.
    pub fn process_callback(&mut self, callback: Callback<W>, surface: &mut dyn Surface) {
        callback(&mut self.root);
        self.redraw(surface);
    }

    /// Redraw, then dispatch one event.
    pub fn process_event(&mut self, event: Event, surface: &mut dyn Surface) {
        self.redraw(surface);

        match event {
            Event::Resize { width, height } => {
                self.rect = Rect::from_size(width, height);
                if let Some(hook) = self.on_resize.as_mut() {
                    hook(width, height);
                }
                surface.sync();
                tracing::debug!(width, height, "resized");
            }
            Event::Key(key) => {
                if self.on_key.as_mut().is_some_and(|hook| hook(&key)) {
                    tracing::debug!(code = ?key.code, "key consumed by hook");
                } else {
                    self.root.handle_key(&key);
                }
            }
            Event::Mouse(mouse) => {
                if self.on_mouse.as_mut().is_some_and(|hook| hook(&mouse)) {
                    tracing::debug!(x = mouse.x, y = mouse.y, "mouse consumed by hook");
                } else {
                    self.root.handle_mouse(self.rect, &mouse);
                }
            }
            Event::Paste(text) => {
                tracing::debug!(len = text.len(), "paste");
            }
        }
    }
}

impl<W: Widget> std::fmt::Debug for App<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("rect", &self.rect)
            .field("fill_rune", &self.fill_rune)
            .field("custom_loop", &self.custom_loop.is_some())
            .field("callbacks", &self.callbacks.is_some())
            .field("on_resize", &self.on_resize.is_some())
            .field("on_key", &self.on_key.is_some())
            .field("on_mouse", &self.on_mouse.is_some())
            .finish_non_exhaustive()
    }
}

/// The standard loop body. Returns once `cancel` fires.
///
/// Spawns an [`EventPump`] on the surface's event source, then processes
/// one item per wake-up in priority order: cancellation, callback, event.
/// A source whose channel disconnects simply stops waking the loop.
pub fn default_loop<W: Widget>(app: &mut App<W>, cancel: &CancelToken, surface: &mut dyn Surface) {
    let pump = EventPump::spawn(surface.event_source(), cancel.clone());
    let mut events = pump.receiver().clone();
    let mut callbacks = app.callbacks.clone().unwrap_or_else(never);

    let (width, height) = surface.size();
    app.rect = Rect::from_size(width, height);

    loop {
        wait_ready(cancel, &callbacks, &events);

        if cancel.is_cancelled() {
            tracing::debug!("cancelled, leaving loop");
            break;
        }

        match callbacks.try_recv() {
            Ok(callback) => {
                app.process_callback(callback, surface);
                continue;
            }
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("callback bridge disconnected");
                callbacks = never();
            }
            Err(TryRecvError::Empty) => {}
        }

        match events.try_recv() {
            Ok(event) => app.process_event(event, surface),
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("event pump finished");
                events = never();
            }
            Err(TryRecvError::Empty) => {}
        }
    }

    // The pump exits on its own once the surface is finalized.
    drop(pump);
}

/// Block until any source is ready, without taking anything from it.
fn wait_ready<T, U>(cancel: &CancelToken, callbacks: &Receiver<T>, events: &Receiver<U>) {
    let mut select = Select::new();
    select.recv(cancel.receiver());
    select.recv(callbacks);
    select.recv(events);
    select.ready();
}
