//! mt103-core: SWIFT MT103 message parsing library.
//!
//! Converts a raw MT103 (single customer credit transfer) message — the
//! brace-delimited, tag-delimited SWIFT text format — into a canonical
//! in-memory document, plus a serialization pass producing the JSON shape
//! consumed by downstream back-office tooling.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`parse()`] -- raw message text to [`Mt103Document`]
//! - [`to_json()`] -- [`Mt103Document`] to `serde_json::Value`
//! - [`split_blocks()`] -- raw message text to the five numbered blocks
//! - [`segment_fields()`] -- block 4 body to ordered [`FieldSpan`]s
//!
//! Parsing is deliberately lenient: a missing block, a malformed header,
//! or a field that does not match its grammar produces an absent key in
//! the output rather than an error. `parse()` is total.

pub mod blocks;
pub mod document;
pub mod fields;
pub mod headers;
pub mod segment;
pub mod serialize;

// ── Convenience re-exports ───────────────────────────────────────────

pub use blocks::{split_blocks, RawBlocks};
pub use document::{parse, Mt103Document};
pub use fields::TextFields;
pub use headers::{ApplicationHeader, BasicHeader, UserHeader};
pub use segment::{segment_fields, FieldSpan};
pub use serialize::to_json;
