use std::io::{self, BufRead};

use tracing::{debug, warn};

use crate::domain::error::RecordError;
use crate::domain::record::DependencyRecord;

/// Reads co-change dependency files line by line.
///
/// Usage mirrors a cursor: call [`scan`](Self::scan) until it returns false,
/// read each accepted line with [`record`](Self::record), then check
/// [`err`](Self::err) for a read failure that ended the scan early.
pub struct RecordScanner<R> {
    reader: R,
    buf: Vec<u8>,
    line: Option<String>,
    line_number: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> RecordScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: None,
            line_number: 0,
            error: None,
        }
    }

    /// Advance to the next non-blank line.
    ///
    /// Returns false at end of input or after a read failure; once false it
    /// stays false.
    pub fn scan(&mut self) -> bool {
        self.line = None;
        if self.error.is_some() {
            return false;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return false,
                Ok(_) => {
                    self.line_number += 1;
                    let line = String::from_utf8_lossy(strip_line_ending(&self.buf));
                    if line.trim().is_empty() {
                        debug!(line = self.line_number, "skipping blank line");
                        continue;
                    }
                    self.line = Some(line.into_owned());
                    return true;
                }
                Err(e) => {
                    warn!(line = self.line_number + 1, error = %e, "read failed");
                    self.error = Some(e);
                    return false;
                }
            }
        }
    }

    /// First read failure, if any. Reaching end of input is not a failure.
    pub fn err(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// The line most recently accepted by `scan`, without its terminator.
    pub fn line(&self) -> &str {
        self.line.as_deref().unwrap_or_default()
    }

    /// 1-based physical line number of the current line (blank lines count).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Parse the current line into a dependency record.
    pub fn record(&self) -> Result<DependencyRecord, RecordError> {
        let line = self.line.as_deref().ok_or(RecordError::NoCurrentLine)?;
        DependencyRecord::parse(line).inspect_err(|e| {
            debug!(line = self.line_number, error = %e, "rejected record line");
        })
    }

    /// Borrowing iterator over the remaining records.
    ///
    /// Iteration ends at end of input or on a read failure; the scanner stays
    /// usable afterwards so [`err`](Self::err) can be checked.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { scanner: self }
    }

    /// Consume the scanner, keeping only its first read failure.
    pub fn into_err(self) -> Option<io::Error> {
        self.error
    }
}

/// Iterator returned by [`RecordScanner::records`].
pub struct Records<'a, R> {
    scanner: &'a mut RecordScanner<R>,
}

impl<R: BufRead> Iterator for Records<'_, R> {
    type Item = Result<DependencyRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.scanner.scan() {
            Some(self.scanner.record())
        } else {
            None
        }
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
