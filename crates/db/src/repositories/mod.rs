//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod form_submission_repo;
pub mod state_repo;
pub mod vaccine_demand_report_repo;

pub use form_submission_repo::FormSubmissionRepo;
pub use state_repo::StateRepo;
pub use vaccine_demand_report_repo::VaccineDemandReportRepo;
