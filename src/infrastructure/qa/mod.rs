//! Question-answering pipelines

pub mod direct;
pub mod pipeline;
pub mod signatures;

pub use direct::DirectQaAgent;
pub use pipeline::MultiHopPipeline;
