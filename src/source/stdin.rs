//! Stdin-based capture source for piped input.

use super::trim_line_ending;
use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};

/// Line reader over piped stdin (or any reader).
///
/// Tracks EOF via the `complete` flag.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
    complete: bool,
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

impl StdinSource<std::io::Stdin> {
    /// Create a new StdinSource from stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal, so
    /// the binary does not block waiting for typed input.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source over any reader, bypassing the terminal check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            complete: false,
        }
    }

    /// Read the next raw line, without its line terminator.
    ///
    /// Bytes are not checked for UTF-8 here. A final line lacking a newline
    /// is still returned. Returns `None` and sets the `complete` flag at EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn poll(&mut self) -> Result<Option<Vec<u8>>, InputError> {
        if self.complete {
            return Ok(None);
        }

        let mut buffer = Vec::new();
        if self.reader.read_until(b'\n', &mut buffer)? == 0 {
            self.complete = true;
            return Ok(None);
        }

        Ok(Some(trim_line_ending(buffer)))
    }

    /// Read every remaining raw line.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn read_to_end(&mut self) -> Result<Vec<Vec<u8>>, InputError> {
        let mut lines = Vec::new();
        while let Some(line) = self.poll()? {
            lines.push(line);
        }
        Ok(lines)
    }

    /// Check if EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
