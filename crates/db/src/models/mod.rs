//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create/upsert DTO for writes

pub mod form_submission;
pub mod state;
pub mod vaccine_demand_report;
