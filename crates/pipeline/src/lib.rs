//! Database-backed orchestration of the demand calculation.
//!
//! [`sync::SyncService`] recomputes and persists every state's vaccine
//! demand; [`summary::LivestockSummaryService`] serves the population
//! totals behind the livestock summary view. Both load submissions through
//! `vaxdemand_db` and delegate all arithmetic to `vaxdemand_core`.

pub mod error;
pub mod summary;
pub mod sync;

pub use error::PipelineError;
pub use summary::{LivestockSummary, LivestockSummaryService};
pub use sync::{SyncReport, SyncService};
