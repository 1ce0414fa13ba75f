pub mod cleanup;
pub mod operations;
pub mod title_service;

pub use cleanup::{CardDecision, CleanupFailure, CleanupPrompt, CleanupReport, CleanupState};
pub use operations::{ExportSession, ExportedBoard};
pub use title_service::{EnrichmentStats, TitleEnrichmentService};
