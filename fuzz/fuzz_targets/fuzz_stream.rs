#![no_main]

use arbitrary::Arbitrary;
use cursorkit::{CursorConfig, ScriptedSource, UnitCursor, Utf8Cursor, Utf8StreamCursor};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct SplitInput {
    bytes: Vec<u8>,
    cuts: Vec<u8>,
    config: CursorConfig,
}

fuzz_target!(|input: SplitInput| {
    // Keep the chunk buffer small so arbitrary configs stay cheap.
    let config = input
        .config
        .with_read_chunk_size(input.config.read_chunk_size % 64)
        .with_initial_capacity(input.config.initial_capacity % 1024)
        .with_history_capacity(input.config.history_capacity % 32);

    let mut source = ScriptedSource::new();
    let mut rest = input.bytes.as_slice();
    for &cut in &input.cuts {
        if rest.is_empty() {
            break;
        }
        let at = (usize::from(cut) % rest.len()) + 1;
        let (piece, tail) = rest.split_at(at);
        source = source.bytes(piece);
        rest = tail;
    }
    if !rest.is_empty() {
        source = source.bytes(rest);
    }

    let mut fixed = Utf8Cursor::from_bytes(input.bytes.clone())
        .with_history_capacity(config.history_capacity);
    let mut stream = Utf8StreamCursor::with_config(source.end(), config);

    loop {
        assert_eq!(fixed.position(), stream.position());
        match (fixed.read(), stream.read()) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => {
                assert_eq!(a.to_string(), b.to_string());
                break;
            }
            (a, b) => panic!("fixed and stream diverged: {a:?} vs {b:?}"),
        }
    }

    // Both retract identically within the history.
    for _ in 0..config.history_capacity {
        match (fixed.unread(), stream.unread()) {
            (Ok(()), Ok(())) => assert_eq!(fixed.position(), stream.position()),
            (Err(_), Err(_)) => break,
            (a, b) => panic!("unread diverged: {a:?} vs {b:?}"),
        }
    }
});
