//! Persistence adapter: wire records, import validation, the model codec,
//! and the store interface.
//!
//! The wire shape is flat JSON: positions as 3-tuples, camelCase field
//! names, `hasChainLift` defaulting on. Serialization round-trips the
//! track model exactly; deserialization repairs rather than rejects
//! (dangling loop references are dropped, missing pitch defaults).

mod codec;
mod import;
mod record;
mod store;

pub use codec::{decode, encode, DecodedCoaster};
pub use import::{parse_import, ImportError};
pub use record::{CoasterRecord, CoasterSummary, LoopSegmentRecord, NewCoaster, TrackPointRecord};
pub use store::{export_json, CoasterStore, MemoryStore};
