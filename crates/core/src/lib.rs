//! Pure domain logic for livestock vaccine demand forecasting.
//!
//! This crate has no database or HTTP dependencies. Submission payloads are
//! passed in by the caller through [`fields::FieldSource`], and every
//! computation here is deterministic and side-effect free apart from logging.

pub mod aggregation;
pub mod demand;
pub mod error;
pub mod fields;
pub mod types;
pub mod vaccine;
