//! Operator console.
//!
//! The console reads digit-only numbers from lines of input and writes
//! prompts and listings. It works over any buffered reader and writer, so
//! the session does not care whether it is attached to a terminal, a pipe
//! or an in-memory buffer.
//!
//! Input is handled as raw bytes: anything that is not an ASCII digit is
//! skipped, whatever its encoding.

use std::io::{self, BufRead, Read, Write};

use crate::error::Result;

/// Longest line the console keeps, in bytes.
///
/// Bytes past this limit are discarded up to the end of the line.
pub const MAX_LINE_LEN: u64 = 80;

/// Parse the ASCII digits of `line` into a number.
///
/// Other bytes are skipped, so an empty or non-numeric line yields 0.
/// Values too large for `u32` saturate.
#[must_use]
pub fn parse_digits(line: &[u8]) -> u32 {
    line.iter()
        .filter(|b| b.is_ascii_digit())
        .fold(0_u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}

/// Line-oriented operator console.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: Vec::new(),
        }
    }

    /// Read one line and return its digits as a number.
    ///
    /// Returns `Ok(None)` at end of input. Only the first
    /// [`MAX_LINE_LEN`] bytes of a line are looked at.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the output or reading the input fails.
    pub fn read_number(&mut self) -> Result<Option<u32>> {
        self.output.flush()?;
        self.line.clear();

        let read = self
            .input
            .by_ref()
            .take(MAX_LINE_LEN)
            .read_until(b'\n', &mut self.line)?;
        if read == 0 {
            return Ok(None);
        }
        if self.line.last() != Some(&b'\n') {
            self.discard_line()?;
        }
        Ok(Some(parse_digits(&self.line)))
    }

    /// Skip input up to and including the next newline, or to end of input.
    fn discard_line(&mut self) -> Result<()> {
        loop {
            let available = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                return Ok(());
            }
            if let Some(newline) = available.iter().position(|&b| b == b'\n') {
                self.input.consume(newline + 1);
                return Ok(());
            }
            let len = available.len();
            self.input.consume(len);
        }
    }

    /// Write text to the output as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Consume the console, returning the output.
    pub fn into_output(self) -> W {
        self.output
    }
}
