//! Capture input sources.
//!
//! - File loading for read-once capture files
//! - Stdin for piped captures
//! - Unified [`InputSource`] enum for both
//!
//! Sources hand out raw byte lines. Decoding (UTF-8, then JSON) happens per
//! line in [`crate::integration::process_lines`], so one bad line never
//! rejects a whole capture.

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for capture lines.
#[derive(Debug)]
pub enum InputSource {
    /// Read-once capture file
    File(FileSource),
    /// Piped stdin
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read every remaining raw line from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn read_all_lines(&mut self) -> Result<Vec<Vec<u8>>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.read_to_end(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// 1. If a file path is provided: create FileSource (loads on construction)
/// 2. If stdin is piped: use StdinSource
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a terminal.
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Strip a trailing `\n` and then a trailing `\r`.
fn trim_line_ending(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}
