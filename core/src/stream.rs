//! Cursors over an incrementally produced byte stream.
//!
//! Both stream cursors sit on a shared buffer that pulls fixed-size
//! chunks from a [`ByteSource`] only when the consumer runs out of buffered
//! bytes. A code point whose bytes straddle two refills is completed by
//! refilling before decoding is retried, so the split is never visible.
//!
#![cfg_attr(feature = "docs", doc = simple_mermaid::mermaid!("../docs/diagrams/refill.mmd"))]
//!
//! # Retention
//!
//! Under [`Retention::Full`] every byte read from the source stays buffered.
//! Under [`Retention::Window`] the buffer is compacted before each refill,
//! down to the earliest byte still reachable by `unread` or by an active
//! bookend. Positions stay absolute either way.

use crate::config::{CursorConfig, Retention};
use crate::error::Error;
use crate::history::WidthHistory;
use crate::traits::{ByteSource, CursorState, Fill, UnitCursor};
use crate::utf8::{Decoded, decode_first, decode_last};

/// Buffered bytes pulled from a source, addressed by absolute offset.
#[derive(Debug)]
struct StreamBuffer<S> {
    source: S,
    /// `bytes[0]` sits at absolute offset `base`.
    bytes: Vec<u8>,
    chunk: Box<[u8]>,
    base: usize,
    /// Index into `bytes` of the next unread byte.
    pos: usize,
    finished: bool,
    retention: Retention,
}

impl<S: ByteSource> StreamBuffer<S> {
    fn new(source: S, config: &CursorConfig) -> Self {
        Self {
            source,
            bytes: Vec::with_capacity(config.initial_capacity),
            chunk: vec![0; config.chunk_size()].into_boxed_slice(),
            base: 0,
            pos: 0,
            finished: false,
            retention: config.retention,
        }
    }

    #[inline]
    fn offset(&self) -> usize {
        self.base + self.pos
    }

    #[inline]
    fn pending(&self) -> &[u8] {
        &self.bytes[self.pos..]
    }

    #[inline]
    fn consumed(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    #[inline]
    fn retreat(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    /// Pulls one chunk from the source.
    ///
    /// Returns `Ok(false)` once the source has reported end of data; the
    /// source is not polled again after that. `keep_from` is the earliest
    /// absolute offset that must survive compaction.
    fn refill(&mut self, keep_from: usize) -> Result<bool, Error> {
        if self.finished {
            return Ok(false);
        }
        if self.retention == Retention::Window {
            self.compact(keep_from);
        }
        match self.source.fill(&mut self.chunk) {
            Ok(Fill::End) => {
                tracing::debug!(offset = self.offset(), "byte source reported end of data");
                self.finished = true;
                Ok(false)
            }
            Ok(Fill::Bytes(0)) => {
                let reason = "source returned no bytes without signaling end of data";
                tracing::warn!(reason, "byte source protocol violation");
                Err(Error::ProtocolViolation { reason })
            }
            Ok(Fill::Bytes(n)) if n > self.chunk.len() => {
                let reason = "source reported more bytes than the buffer holds";
                tracing::warn!(
                    reason,
                    reported = n,
                    capacity = self.chunk.len(),
                    "byte source protocol violation"
                );
                Err(Error::ProtocolViolation { reason })
            }
            Ok(Fill::Bytes(n)) => {
                self.bytes.extend_from_slice(&self.chunk[..n]);
                tracing::trace!(added = n, buffered = self.bytes.len(), "refilled stream buffer");
                Ok(true)
            }
            Err(error) => {
                tracing::warn!(%error, offset = self.offset(), "byte source failed");
                Err(Error::Source(error))
            }
        }
    }

    /// Drops buffered bytes before `keep_from`, never past the read position.
    fn compact(&mut self, keep_from: usize) {
        let drop = keep_from.saturating_sub(self.base).min(self.pos);
        if drop == 0 {
            return;
        }
        self.bytes.drain(..drop);
        self.base += drop;
        self.pos -= drop;
        tracing::debug!(
            dropped = drop,
            base = self.base,
            buffered = self.bytes.len(),
            "compacted stream buffer"
        );
    }

    /// Bytes between two absolute offsets.
    ///
    /// Fails with [`Error::AtStreamStart`] if `start` has been compacted away.
    fn slice(&self, start: usize, end: usize) -> Result<&[u8], Error> {
        if start >= end {
            return Ok(&[]);
        }
        if start < self.base {
            return Err(Error::AtStreamStart);
        }
        let from = start - self.base;
        let to = (end - self.base).min(self.bytes.len());
        Ok(self.bytes.get(from..to).unwrap_or_default())
    }
}

/// A byte cursor over a [`ByteSource`].
///
/// # Example
///
/// ```ignore
/// let source = ReaderSource::new(std::io::Cursor::new(vec![0u8, 1, 2]));
/// let mut cursor = ByteStreamCursor::new(source);
/// assert_eq!(cursor.read_count(3).unwrap(), vec![0, 1, 2]);
/// assert!(cursor.is_at_end().unwrap());
/// ```
#[derive(Debug)]
pub struct ByteStreamCursor<S> {
    buffer: StreamBuffer<S>,
    /// Consumed bytes kept reachable by `unread` under [`Retention::Window`].
    history_capacity: usize,
    state: CursorState<u8>,
}

impl<S: ByteSource> ByteStreamCursor<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CursorConfig::DEFAULT)
    }

    pub fn with_config(source: S, config: CursorConfig) -> Self {
        Self {
            buffer: StreamBuffer::new(source, &config),
            history_capacity: config.history_capacity,
            state: CursorState::new(),
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.buffer.source
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.buffer.source
    }

    #[inline]
    pub fn into_source(self) -> S {
        self.buffer.source
    }

    /// Bytes currently held in memory, consumed or not.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffer.bytes.len()
    }

    fn keep_from(&self) -> usize {
        let reachable = self.buffer.offset().saturating_sub(self.history_capacity);
        self.state
            .bookend()
            .mark()
            .map_or(reachable, |mark| mark.min(reachable))
    }
}

impl<S: ByteSource> UnitCursor for ByteStreamCursor<S> {
    type Unit = u8;

    #[inline]
    fn read(&mut self) -> Result<u8, Error> {
        let byte = self.peek()?;
        self.buffer.advance(1);
        Ok(byte)
    }

    fn unread(&mut self) -> Result<(), Error> {
        if self.buffer.pos == 0 {
            return Err(Error::AtStreamStart);
        }
        self.buffer.retreat(1);
        Ok(())
    }

    fn peek(&mut self) -> Result<u8, Error> {
        if self.buffer.pending().is_empty() {
            let keep_from = self.keep_from();
            if !self.buffer.refill(keep_from)? {
                return Err(Error::EndOfStream);
            }
        }
        self.buffer
            .pending()
            .first()
            .copied()
            .ok_or(Error::EndOfStream)
    }

    #[inline]
    fn position(&self) -> usize {
        self.buffer.offset()
    }

    fn units_between(&self, start: usize, end: usize) -> Result<Vec<u8>, Error> {
        self.buffer.slice(start, end).map(<[u8]>::to_vec)
    }

    #[inline]
    fn state(&self) -> &CursorState<u8> {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<u8> {
        &mut self.state
    }
}

/// A code point cursor over a UTF-8 [`ByteSource`].
///
/// Positions are absolute byte offsets into the stream. A sequence cut short
/// by end of data is reported as [`Error::InvalidEncoding`] at its first
/// byte; a sequence cut short by a refill boundary is completed first.
///
/// # Example
///
/// ```ignore
/// let encoded = "\u{2200}".as_bytes();
/// let source = ScriptedSource::new()
///     .bytes(&encoded[..1])
///     .bytes(&encoded[1..])
///     .end();
/// let mut cursor = Utf8StreamCursor::new(source);
/// assert_eq!(cursor.read().unwrap(), '\u{2200}');
/// assert!(cursor.read().unwrap_err().is_end_of_stream());
/// ```
#[derive(Debug)]
pub struct Utf8StreamCursor<S> {
    buffer: StreamBuffer<S>,
    history: WidthHistory,
    state: CursorState<char>,
}

impl<S: ByteSource> Utf8StreamCursor<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, CursorConfig::DEFAULT)
    }

    pub fn with_config(source: S, config: CursorConfig) -> Self {
        Self {
            buffer: StreamBuffer::new(source, &config),
            history: WidthHistory::new(config.history_capacity),
            state: CursorState::new(),
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.buffer.source
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.buffer.source
    }

    #[inline]
    pub fn into_source(self) -> S {
        self.buffer.source
    }

    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffer.bytes.len()
    }

    fn keep_from(&self) -> usize {
        let reachable = self
            .buffer
            .offset()
            .saturating_sub(self.history.retained_bytes());
        self.state
            .bookend()
            .mark()
            .map_or(reachable, |mark| mark.min(reachable))
    }

    /// Decodes the next code point, refilling as needed, without consuming it.
    fn fill_next(&mut self) -> Result<(char, usize), Error> {
        loop {
            match decode_first(self.buffer.pending()) {
                Decoded::Char(ch, width) => return Ok((ch, width)),
                Decoded::Invalid => {
                    return Err(Error::InvalidEncoding {
                        offset: self.buffer.offset(),
                    });
                }
                Decoded::Incomplete => {
                    // Each successful refill adds at least one byte, so this
                    // settles within four refills.
                    let keep_from = self.keep_from();
                    if !self.buffer.refill(keep_from)? {
                        return Err(if self.buffer.pending().is_empty() {
                            Error::EndOfStream
                        } else {
                            Error::InvalidEncoding {
                                offset: self.buffer.offset(),
                            }
                        });
                    }
                }
            }
        }
    }
}

impl<S: ByteSource> UnitCursor for Utf8StreamCursor<S> {
    type Unit = char;

    fn read(&mut self) -> Result<char, Error> {
        let (ch, width) = self.fill_next()?;
        self.buffer.advance(width);
        self.history.push(width);
        Ok(ch)
    }

    fn unread(&mut self) -> Result<(), Error> {
        if self.buffer.pos == 0 {
            return Err(Error::AtStreamStart);
        }
        let width = match self.history.pop() {
            Some(width) => width,
            None => match decode_last(self.buffer.consumed()) {
                Some((_, width)) => width,
                None => {
                    return Err(Error::InvalidEncoding {
                        offset: self.buffer.offset(),
                    });
                }
            },
        };
        self.buffer.retreat(width);
        Ok(())
    }

    #[inline]
    fn peek(&mut self) -> Result<char, Error> {
        self.fill_next().map(|(ch, _)| ch)
    }

    #[inline]
    fn position(&self) -> usize {
        self.buffer.offset()
    }

    fn units_between(&self, start: usize, end: usize) -> Result<Vec<char>, Error> {
        let span = self.buffer.slice(start, end)?;
        std::str::from_utf8(span)
            .map(|text| text.chars().collect())
            .map_err(|e| Error::InvalidEncoding {
                offset: start + e.valid_up_to(),
            })
    }

    #[inline]
    fn state(&self) -> &CursorState<char> {
        &self.state
    }

    #[inline]
    fn state_mut(&mut self) -> &mut CursorState<char> {
        &mut self.state
    }
}
