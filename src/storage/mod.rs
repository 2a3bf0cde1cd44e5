//! Storage layer for publish log records.
//!
//! Records are read-only JSON files; this module only enumerates and orders them.

pub mod collections;
pub mod session;

pub use collections::CollectionStore;
pub use session::Session;
