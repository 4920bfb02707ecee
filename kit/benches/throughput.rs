use cursorkit::{
    ByteCursor, ByteSets, ByteStreamCursor, CharCursor, CursorConfig, Retention, RunMatcher,
    ScriptedSource, UnitCursor, Utf8Cursor, Utf8StreamCursor,
};
use divan::{Bencher, black_box, counter::BytesCount};

fn main() {
    divan::main();
}

const SAMPLE_LINES: &[&str] = &[
    "let total = items.iter().map(|x| x.price).sum();\n",
    "∀x ∈ S, ∃y ∈ T : f(x) = y\n",
    "schön   \t  grüße aus köln\n",
    "おはよう ございます\n",
];

fn generate_text(lines: usize) -> String {
    let mut text = String::with_capacity(lines * 40);
    for i in 0..lines {
        text.push_str(SAMPLE_LINES[i % SAMPLE_LINES.len()]);
    }
    text
}

fn drain<C: UnitCursor>(mut cursor: C) -> usize {
    let mut count = 0;
    while cursor.read().is_ok() {
        count += 1;
    }
    count
}

#[divan::bench(name = "read_utf8_fixed", args = [100, 10_000, 100_000])]
fn bench_utf8_fixed(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| Utf8Cursor::new(text.as_str()))
        .bench_values(|cursor| black_box(drain(cursor)));
}

#[divan::bench(name = "read_chars_fixed", args = [100, 10_000, 100_000])]
fn bench_chars_fixed(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| CharCursor::from_text(&text))
        .bench_values(|cursor| black_box(drain(cursor)));
}

#[divan::bench(name = "read_utf8_stream", args = [100, 10_000, 100_000])]
fn bench_utf8_stream(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| ScriptedSource::new().chunked(text.as_bytes(), 4096).end())
        .bench_values(|source| black_box(drain(Utf8StreamCursor::new(source))));
}

#[divan::bench(name = "read_utf8_stream_windowed", args = [100, 10_000, 100_000])]
fn bench_utf8_stream_windowed(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    let config = CursorConfig::new()
        .with_read_chunk_size(4096)
        .with_retention(Retention::Window);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| ScriptedSource::new().chunked(text.as_bytes(), 4096).end())
        .bench_values(|source| black_box(drain(Utf8StreamCursor::with_config(source, config))));
}

#[divan::bench(name = "read_bytes_stream", args = [100, 10_000, 100_000])]
fn bench_bytes_stream(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| ScriptedSource::new().chunked(text.as_bytes(), 4096).end())
        .bench_values(|source| black_box(drain(ByteStreamCursor::new(source))));
}

#[divan::bench(name = "words_utf8_fixed", args = [100, 10_000, 100_000])]
fn bench_words(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| RunMatcher::new(Utf8Cursor::new(text.as_str())))
        .bench_values(|mut matcher| {
            let mut words = 0;
            loop {
                if matcher.discard_whitespace().is_err() || matcher.discard_word().is_err() {
                    break;
                }
                words += 1;
            }
            black_box(words)
        });
}

#[divan::bench(name = "named_set_bytes_fixed", args = [100, 10_000, 100_000])]
fn bench_named_sets(bencher: Bencher, n: usize) {
    let text = generate_text(n);
    let mut sets = ByteSets::new();
    sets.add_from_text("ident", "abcdefghijklmnopqrstuvwxyz_");
    let sets = std::sync::Arc::new(sets);

    bencher
        .counter(BytesCount::new(text.len()))
        .with_inputs(|| {
            let mut cursor = ByteCursor::new(text.as_bytes());
            cursor.attach_sets(sets.clone());
            cursor
        })
        .bench_values(|mut cursor| {
            let mut runs = 0;
            while cursor.discard_matching_set("ident").is_ok()
                && cursor.discard_not_matching_set("ident").is_ok()
            {
                runs += 1;
            }
            black_box(runs)
        });
}
