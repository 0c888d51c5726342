//! Sink benchmark: Measure escape-sequence encoding for drawn glyphs.
//!
//! Target: < 1ms for a full 200x60 frame

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io;
use termpipes::terminal::OutputBuffer;
use termpipes::{Grid, Ink, Position, RenderSink, TerminalSink};

fn sink_draw_colored(c: &mut Criterion) {
    let mut sink = TerminalSink::with_size(io::sink(), Grid::new(200, 60));
    let ink = Some(Ink {
        color: 3,
        vivid: true,
    });

    c.bench_function("sink_draw_colored", |b| {
        b.iter(|| {
            sink.draw(black_box(Position::new(17, 9)), black_box('┃'), ink);
            sink.clear();
            sink.flush().unwrap();
        })
    });
}

fn sink_full_frame(c: &mut Criterion) {
    let grid = Grid::new(200, 60);
    let mut sink = TerminalSink::with_size(io::sink(), grid);

    c.bench_function("sink_full_frame", |b| {
        b.iter(|| {
            for y in 0..i32::from(grid.height) {
                for x in 0..i32::from(grid.width) {
                    sink.draw(Position::new(x, y), '━', None);
                }
            }
            sink.clear();
            sink.flush().unwrap();
        })
    });
}

fn output_cursor_move(c: &mut Criterion) {
    let mut out = OutputBuffer::with_capacity(64 * 1024);

    c.bench_function("output_cursor_move", |b| {
        b.iter(|| {
            out.clear();
            for i in 0..100u16 {
                out.cursor_move(black_box(i), black_box(i / 2));
            }
        })
    });
}

criterion_group!(benches, sink_draw_colored, sink_full_frame, output_cursor_move);
criterion_main!(benches);
