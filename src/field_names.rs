//! Contract constants for the export enrichment step.
//!
//! These names are fixed by the downstream consumers of the exported files
//! and are not runtime-configurable. Keeping them in one place keeps the
//! contract auditable.

/// Source attribute holding the row's last-modified epoch, stored as a
/// DynamoDB numeric string (`N` tag).
pub const LAST_TIMESTAMP: &str = "last_timestamp";

/// Source attribute holding the video identifier (`S` tag).
pub const VIDEO_GUID: &str = "video_guid";

/// Synthetic attribute added to every exported record.
pub const LAST_TIMESTAMP_RANGE_ID: &str = "last_timestamp_range_id";

/// Separator between the two halves of the derived value.
pub const RANGE_ID_SEPARATOR: &str = "::";
