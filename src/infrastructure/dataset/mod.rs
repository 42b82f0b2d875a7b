//! Dataset loading and sampling

pub mod hotpotqa;

pub use hotpotqa::{load_questions, load_splits, DatasetSplits, SplitSizes};
