//! File-based capture source.
//!
//! Captures are static; the whole file is read on construction and drained
//! once.

use super::trim_line_ending;
use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read-once capture file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: Option<Vec<Vec<u8>>>,
}

impl FileSource {
    /// Open and read the capture file at `path`.
    ///
    /// Lines are kept as raw bytes; a line that is not UTF-8 is reported
    /// later, per line, instead of failing the whole read.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let lines = reader
            .split(b'\n')
            .map(|line| line.map(trim_line_ending))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            lines: Some(lines),
        })
    }

    /// Path the capture was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All raw lines on the first call, empty afterwards.
    pub fn drain_lines(&mut self) -> Vec<Vec<u8>> {
        self.lines.take().unwrap_or_default()
    }
}
