//! Import-side counterpart to the export writer: iterate records back out of
//! a line-oriented export stream.
//!
//! Used by downstream import jobs and by round-trip verification. Blank
//! lines are skipped; a line that fails to parse surfaces as an error item
//! rather than ending iteration, so the caller chooses skip-or-abort the
//! same way it does for write failures.

use std::io::BufRead;

use crate::error::Result;
use crate::record::Record;

/// Streaming reader over newline-delimited export records.
pub struct ExportLineReader<R: BufRead> {
    input: R,
    line: String,
}

impl<R: BufRead> ExportLineReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for ExportLineReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = self.line.trim_end_matches('\n');
                    if line.is_empty() {
                        continue;
                    }
                    return Some(Record::from_line(line));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
