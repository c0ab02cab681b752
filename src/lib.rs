// ddb2jsonl - DynamoDB export record enrichment and JSONL serialization
//
// This crate is the transform-and-serialize step of a bulk table export
// pipeline. The host batch framework owns scheduling, partitioning, and the
// output file lifecycle; this crate owns exactly one thing per record:
// derive `last_timestamp_range_id` from two existing attributes, serialize
// the enriched record as one self-describing JSON line, and append it to
// the partition's stream.
//
// The transform and the serialization are pure and independently testable;
// the writer composes them around the stream append.

mod error;
pub mod field_names;
mod reader;
mod record;
mod transform;
mod writer;

pub use error::{ExportError, Result};
pub use reader::ExportLineReader;
pub use record::{AttributeValue, Record};
pub use transform::{derive_range_id, enrich_record};
pub use writer::RecordTransformWriter;
