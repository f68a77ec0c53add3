// src/extractors/mod.rs
pub mod embedded;
pub mod locator;
pub mod record;
pub mod table;

// Re-export key extraction types for convenience
pub use record::{ExtractionMode, ResultSet, UserAgentEntry, UserAgentRecord};
pub use table::TableKind;
