//! Batch evaluation over question datasets

pub mod harness;
pub mod report;

pub use harness::EvaluationHarness;
pub use report::{print_summary, render_summary, write_report};
