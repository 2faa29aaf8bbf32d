//! Check-in log reader.
//!
//! A log holds one callsign per line; a blank line closes a section. Every
//! line is upper-cased and trimmed before it reaches the classifier.

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use tracing::{trace, warn};

use crate::error::{Error, Result};

/// Normalizes one raw log line into a token. The empty string is a
/// section boundary.
pub fn normalize(line: &str) -> String {
    line.trim().to_uppercase()
}

/// Lazy token stream over a check-in log.
///
/// A read failure ends the stream; call [`CheckinSource::finish`] to
/// surface it.
pub struct CheckinSource<R> {
    lines: Lines<R>,
    origin: PathBuf,
    error: Option<Error>,
}

impl CheckinSource<BufReader<File>> {
    /// Opens the log at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        trace!(path = %path.display(), "opened check-in log");
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> CheckinSource<R> {
    /// Wraps any buffered reader; `origin` names the source in errors.
    pub fn from_reader(reader: R, origin: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            origin: origin.into(),
            error: None,
        }
    }

    /// Consumes the source, returning the read error that ended it early.
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: BufRead> Iterator for CheckinSource<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        match self.lines.next()? {
            Ok(line) => {
                trace!(line = %line, "read check-in line");
                Some(normalize(&line))
            }
            Err(err) => {
                warn!(path = %self.origin.display(), error = %err, "check-in log read failed");
                self.error = Some(Error::io(&self.origin, err));
                None
            }
        }
    }
}

/// Reads every token of the log at `path`.
pub fn read_tokens(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut source = CheckinSource::open(path)?;
    let tokens: Vec<String> = source.by_ref().collect();
    source.finish()?;
    Ok(tokens)
}
