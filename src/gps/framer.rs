// src/gps/framer.rs
//! Byte stream to NMEA line framing with `$` resynchronization

use tracing::trace;

/// Sentence start marker
pub const SENTENCE_START: u8 = b'$';

/// Default limit for an unterminated `$`-prefixed fragment
pub const DEFAULT_MAX_LINE_LEN: usize = 256;

/// Accumulates raw receiver bytes and cuts them into complete sentences.
///
/// Anything before a `$` is noise and is dropped. A fragment that starts with
/// `$` but grows past `max_line_len` without a line feed loses its marker so
/// the buffer never grows without bound.
#[derive(Debug, Clone)]
pub struct LineFramer {
    buffer: Vec<u8>,
    max_line_len: usize,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::with_max_line_len(DEFAULT_MAX_LINE_LEN)
    }

    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_line_len: max_line_len.max(1),
        }
    }

    /// Append `bytes` and return every sentence completed by them, in order.
    ///
    /// Returned lines exclude the `\n` terminator and a preceding `\r`.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        loop {
            self.resync();
            if self.buffer.is_empty() {
                break;
            }

            match self.buffer.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    let mut line = &self.buffer[..end];
                    if let Some(stripped) = line.strip_suffix(b"\r") {
                        line = stripped;
                    }
                    lines.push(String::from_utf8_lossy(line).into_owned());
                    self.buffer.drain(..=end);
                }
                None if self.buffer.len() > self.max_line_len => {
                    trace!(len = self.buffer.len(), "dropping unterminated sentence fragment");
                    self.buffer.remove(0);
                }
                None => break,
            }
        }

        lines
    }

    /// Bytes held while waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop everything up to the next sentence start
    fn resync(&mut self) {
        let start = self
            .buffer
            .iter()
            .position(|&b| b == SENTENCE_START)
            .unwrap_or(self.buffer.len());
        if start > 0 {
            trace!(dropped = start, "resyncing on sentence start");
            self.buffer.drain(..start);
        }
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}
