//! Board export functionality.
//!
//! Flattens a fetched board into the shapes report renderers consume and
//! serializes the whole board for backup.

pub mod exporter;
pub mod models;

pub use exporter::BoardExporter;
pub use models::{BoardExport, CardRow, CardSummary, ListSummary};
