//! Redraw benchmark: Measure the clear, fill, draw, flush pass.
//!
//! Runs the real `App` redraw against a headless `TerminalSurface` that
//! writes to `io::sink()`, plus the raw diff for comparison.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dos::buffer::diff::{render_diff, DiffState};
use dos::{App, Buffer, Center, Label, Rgb, Style, SurfaceConfig, TerminalSurface};
use std::io;

fn headless(width: u16, height: u16) -> TerminalSurface<io::Sink> {
    let config = SurfaceConfig {
        alternate_screen: false,
        hide_cursor: false,
        ..SurfaceConfig::default()
    };
    TerminalSurface::with_writer(io::sink(), width, height, config)
}

/// Buffer with deterministic, varied content.
fn create_test_buffer(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let ch = char::from(b'A' + ((x + y + seed) % 26) as u8);
            let style = Style::DEFAULT.fg(Rgb::new((x * 3 % 256) as u8, (y * 7 % 256) as u8, 200));
            buffer.set(x, y, ch, style);
        }
    }
    buffer
}

fn redraw_unchanged(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw_unchanged");

    for (width, height) in [(80u16, 24u16), (200, 50)] {
        let app = App::new(Center::new(Label::new("We're at 42 now.\nThe time is now.")));
        let mut surface = headless(width, height);
        app.redraw(&mut surface);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(),
            |b, ()| b.iter(|| app.redraw(black_box(&mut surface))),
        );
    }

    group.finish();
}

fn redraw_text_change(c: &mut Criterion) {
    let mut app = App::new(Center::new(Label::new("")));
    let mut surface = headless(200, 50);
    let mut frame = 0u64;

    c.bench_function("redraw_200x50_label_update", |b| {
        b.iter(|| {
            frame += 1;
            app.root_mut().child_mut().set_text(format!("We're at {frame} now."));
            app.redraw(black_box(&mut surface));
        });
    });
}

fn diff_full_change(c: &mut Criterion) {
    let current = create_test_buffer(200, 50, 0);
    let next = create_test_buffer(200, 50, 1);

    c.bench_function("diff_200x50_full_change", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            let mut state = DiffState::new();
            render_diff(
                black_box(&current),
                black_box(&next),
                &mut output,
                &mut state,
            )
        });
    });
}

criterion_group!(benches, redraw_unchanged, redraw_text_change, diff_full_change);
criterion_main!(benches);
