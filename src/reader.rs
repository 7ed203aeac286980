use std::io::{self, BufRead};

/// Line stream with one line of lookahead.
///
/// Lines are returned with their terminator so callers can tell a blank
/// line (`"\n"`) from the end of the stream.
pub(crate) struct LineReader<R> {
    inner: R,
    peeked: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
        }
    }

    /// Look at the next line without consuming it.
    pub(crate) fn peek_line(&mut self) -> io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_raw()?;
        }
        Ok(self.peeked.as_deref())
    }

    pub(crate) fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_raw(),
        }
    }

    /// Invalid UTF-8 is replaced rather than failing the whole read.
    fn read_raw(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}
