//! Shared state: A producer thread owns the data, the UI only reads it.
//!
//! The producer bumps a counter behind an `RwLock` twice a second. A 15 fps
//! ticker posts callbacks that take a read lock and refresh the label. The
//! lock is needed because the callback and the producer run on different
//! threads; the bridge only keeps the callback off the UI's toes.
//!
//! Press `q`, Esc or Ctrl+C to quit. Set `DOS_LOG=debug` to write a log
//! to `dos-shared-state.log`.

use crossbeam_channel::{select, tick};
use dos::{
    bridge, Align, App, CancelToken, Center, KeyCode, KeyModifiers, Label, Rgb, Style, Ticker,
};
use std::fs::File;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

type Root = Center<Label>;

#[derive(Debug, Default)]
struct State {
    counter: u64,
    elapsed: Duration,
}

fn init_logging() {
    let Ok(filter) = EnvFilter::try_from_env("DOS_LOG") else {
        return;
    };
    match File::create("dos-shared-state.log") {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_names(true)
            .init(),
        Err(e) => eprintln!("cannot open log file: {e}"),
    }
}

/// Update `state` every half second until `cancel` fires.
fn spawn_producer(state: Arc<RwLock<State>>, cancel: CancelToken) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("producer".to_string())
        .spawn(move || {
            let started = Instant::now();
            let ticks = tick(Duration::from_millis(500));
            loop {
                select! {
                    recv(ticks) -> _ => {
                        let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
                        state.counter += 1;
                        state.elapsed = started.elapsed();
                    }
                    recv(cancel.receiver()) -> _ => return,
                }
            }
        })
        .expect("Failed to spawn producer thread")
}

fn main() -> dos::Result<()> {
    init_logging();

    let cancel = CancelToken::new();
    let state = Arc::new(RwLock::new(State::default()));
    let producer = spawn_producer(Arc::clone(&state), cancel.clone());

    let (tx, rx) = bridge::<Root>();
    let refresh = Ticker::spawn(Duration::from_secs(1) / 15, tx, cancel.clone(), move |_| {
        let state = Arc::clone(&state);
        move |root: &mut Root| {
            let state = state.read().unwrap_or_else(PoisonError::into_inner);
            root.child_mut().set_text(format!(
                "We're at {} now.\nRunning for {:.1}s.",
                state.counter,
                state.elapsed.as_secs_f64()
            ));
        }
    });

    let label = Label::new("")
        .with_align(Align::Center)
        .with_style(Style::DEFAULT.fg(Rgb::new(120, 200, 255)));

    let quit = cancel.clone();
    let mut app = App::new(Center::new(label))
        .with_callbacks(rx)
        .on_key(move |key| {
            let stop = match key.code {
                KeyCode::Esc | KeyCode::Char('q') => true,
                KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
                _ => false,
            };
            if stop {
                quit.cancel();
            }
            stop
        });

    let result = app.run_terminal(&cancel);
    cancel.cancel();

    refresh.join();
    let _ = producer.join();
    result
}
