//! `oficina-billing` — monthly revenue summary over one user's document.

pub mod summary;

pub use summary::{MonthlySummary, monthly_summary};
