//! Counter: A centered label rewritten by a ticker twice a second.
//!
//! Press `q`, Esc or Ctrl+C to quit. Set `DOS_LOG=debug` to write a log
//! to `dos-counter.log`.

use dos::{bridge, App, CancelToken, Center, KeyCode, KeyModifiers, Label, Ticker};
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

type Root = Center<Label>;

fn init_logging() {
    let Ok(filter) = EnvFilter::try_from_env("DOS_LOG") else {
        return;
    };
    match File::create("dos-counter.log") {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_names(true)
            .init(),
        Err(e) => eprintln!("cannot open log file: {e}"),
    }
}

fn main() -> dos::Result<()> {
    init_logging();

    let cancel = CancelToken::new();
    let (tx, rx) = bridge::<Root>();

    let ticker = Ticker::spawn(Duration::from_millis(500), tx, cancel.clone(), |frame| {
        move |root: &mut Root| {
            root.child_mut()
                .set_text(format!("We're at {} now.\nPress q to quit.", frame + 1));
        }
    });

    let quit = cancel.clone();
    let mut app = App::new(Center::new(Label::new("Starting...")))
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

    let posted = ticker.join();
    tracing::info!(posted, "counter demo finished");
    result
}
