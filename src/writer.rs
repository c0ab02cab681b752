//! Transform-and-append writer: one enriched JSONL line per record.
//!
//! The host pipeline constructs one writer per output partition, calls
//! [`RecordTransformWriter::write`] once per record in arrival order, and
//! calls [`RecordTransformWriter::close`] exactly once when the partition is
//! exhausted. The stream is owned exclusively by the writer from construction
//! to close; nothing else may append to it.

use std::io::Write;

use crate::error::{ExportError, Result};
use crate::record::Record;
use crate::transform::enrich_record;

const NEWLINE: u8 = b'\n';

/// Writes enriched export records to a caller-supplied byte stream.
///
/// Each `write` enriches the record in place, serializes it to one line of
/// self-describing JSON, and appends the line plus a single `\n` to the
/// stream. Writes are synchronous and independent: there is no buffering
/// policy or cross-record state here, and no retry on failure.
///
/// The `&mut self` receivers make the single-caller-per-instance contract of
/// the host framework compile-time-checked; serialize-and-append is a single
/// critical section by construction, so lines are never interleaved.
pub struct RecordTransformWriter<W: Write> {
    /// `None` once the stream has been closed.
    out: Option<W>,
    records_written: u64,
}

impl<W: Write> RecordTransformWriter<W> {
    /// Bind the writer to an already-open output stream.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            records_written: 0,
        }
    }

    /// Enrich `record` with `last_timestamp_range_id`, then append it to the
    /// stream as one newline-terminated line.
    ///
    /// The record is mutated in place (the derived attribute is visible to
    /// the caller afterwards) but no reference to it is retained. Line bytes
    /// and the trailing newline go to the stream in one `write_all` call, so
    /// a successful write never leaves an unterminated partial line.
    ///
    /// # Errors
    /// Returns `ExportError::Closed` if `close` has already been called,
    /// `ExportError::Encode` if the record cannot be serialized, and
    /// `ExportError::Io` if the stream rejects the append. Failed records
    /// are not written; the host decides whether to skip or abort.
    pub fn write(&mut self, record: &mut Record) -> Result<()> {
        let out = self.out.as_mut().ok_or(ExportError::Closed)?;

        let range_id = enrich_record(record);
        let mut line = record.to_line()?;
        line.push(NEWLINE);

        out.write_all(&line)?;
        self.records_written += 1;

        tracing::trace!(
            "wrote record {} ({} bytes, range_id: {})",
            self.records_written,
            line.len(),
            range_id
        );
        Ok(())
    }

    /// Flush and close the owned stream.
    ///
    /// The stream is released exactly once; a second `close` is an idempotent
    /// no-op. Any `write` after `close` fails fast without touching
    /// previously written lines.
    ///
    /// # Errors
    /// Returns `ExportError::Io` if the final flush fails, which may indicate
    /// unflushed or truncated output even when every prior write succeeded.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut out) = self.out.take() else {
            return Ok(());
        };
        out.flush()?;
        drop(out);

        tracing::debug!("closed export stream after {} records", self.records_written);
        Ok(())
    }

    /// Whether `close` has already been called.
    pub fn is_closed(&self) -> bool {
        self.out.is_none()
    }
}
