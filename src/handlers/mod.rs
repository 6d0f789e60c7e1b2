// Handler modules
pub mod check;
pub mod list_rules;

// Re-export all handler functions
pub use check::{CheckOptions, CheckSummary, filter_violations, handle_check};
pub use list_rules::handle_list_rules;
