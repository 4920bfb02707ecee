use std::collections::VecDeque;
use std::io;

/// Outcome of a single [`ByteSource::fill`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// This many bytes were written to the front of the buffer.
    ///
    /// Must be positive and no larger than the buffer; anything else is
    /// reported by the cursor as [`Error::ProtocolViolation`](crate::Error::ProtocolViolation).
    Bytes(usize),
    /// No more data will arrive.
    End,
}

/// A sequential byte producer feeding the streaming cursors.
///
/// Each call is one refill. Implementations block until they can report
/// bytes, end of data, or a fault; the cursor imposes no timeout of its own.
pub trait ByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).fill(buf)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).fill(buf)
    }
}

/// Adapts any [`io::Read`] into a [`ByteSource`].
///
/// A zero-length read is end of data. Interrupted reads are retried.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: io::Read> ReaderSource<R> {
    #[inline]
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for ReaderSource<R> {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(Fill::End),
                Ok(n) => return Ok(Fill::Bytes(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// One scripted response of a [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver these bytes. Longer than the refill buffer, the remainder is
    /// kept for the next call.
    Bytes(Vec<u8>),
    /// Report end of data.
    End,
    /// Report zero bytes without end of data, breaking the contract.
    Empty,
    /// Fail with an I/O error of this kind.
    Fault(io::ErrorKind),
}

/// A deterministic [`ByteSource`] replaying a queue of [`Step`]s.
///
/// Once the script is exhausted every further call reports [`Fill::End`].
///
/// # Example
///
/// ```ignore
/// let source = ScriptedSource::new()
///     .bytes("\u{2200}".as_bytes()[..1].to_vec())
///     .bytes("\u{2200}".as_bytes()[1..].to_vec())
///     .end();
/// let mut cursor = Utf8StreamCursor::new(source);
/// assert_eq!(cursor.read().unwrap(), '\u{2200}');
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    calls: usize,
}

impl ScriptedSource {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a delivery of `bytes`.
    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.steps.push_back(Step::Bytes(bytes.into()));
        self
    }

    /// Queues one delivery per chunk of `bytes`, each at most `chunk` long.
    pub fn chunked(mut self, bytes: &[u8], chunk: usize) -> Self {
        for piece in bytes.chunks(chunk.max(1)) {
            self.steps.push_back(Step::Bytes(piece.to_vec()));
        }
        self
    }

    pub fn end(mut self) -> Self {
        self.steps.push_back(Step::End);
        self
    }

    pub fn empty(mut self) -> Self {
        self.steps.push_back(Step::Empty);
        self
    }

    pub fn fault(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fault(kind));
        self
    }

    /// Number of `fill` calls made so far.
    #[inline]
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Steps not yet replayed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl ByteSource for ScriptedSource {
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        self.calls += 1;
        match self.steps.pop_front() {
            None | Some(Step::End) => Ok(Fill::End),
            Some(Step::Empty) => Ok(Fill::Bytes(0)),
            Some(Step::Fault(kind)) => Err(io::Error::new(kind, "scripted fault")),
            Some(Step::Bytes(mut bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    self.steps.push_front(Step::Bytes(bytes.split_off(n)));
                }
                Ok(Fill::Bytes(n))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_source_reports_end_on_empty_read() {
        let mut source = ReaderSource::new(io::Cursor::new(vec![1u8, 2, 3]));
        let mut buf = [0u8; 2];
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(2));
        assert_eq!(buf, [1, 2]);
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(1));
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::End);
    }

    #[test]
    fn test_scripted_source_splits_long_deliveries() {
        let mut source = ScriptedSource::new().bytes(vec![1u8, 2, 3, 4, 5]).end();
        let mut buf = [0u8; 2];
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(2));
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(2));
        assert_eq!(buf, [3, 4]);
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(1));
        assert_eq!(buf[0], 5);
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::End);
        assert_eq!(source.calls(), 4);
    }

    #[test]
    fn test_scripted_source_contract_breaks() {
        let mut source = ScriptedSource::new()
            .empty()
            .fault(io::ErrorKind::ConnectionReset);
        let mut buf = [0u8; 4];
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::Bytes(0));
        let err = source.fill(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(source.fill(&mut buf).unwrap(), Fill::End);
    }

    #[test]
    fn test_chunked_script() {
        let source = ScriptedSource::new().chunked(b"abcdefg", 3).end();
        assert_eq!(source.remaining(), 4);
    }
}
