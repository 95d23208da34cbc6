pub mod form_submissions;
pub mod livestock_summaries;
pub mod reports;
pub mod states;
